//! Asset matrix generation: size catalog resolution, cross-product
//! enumeration with creative naming, pivoting by size and count projection.

pub mod generator;
pub mod naming;
pub mod options;
pub mod projection;
pub mod session;
pub mod sizes;

pub use generator::{LanguageRule, MatrixGenerator};
pub use naming::CreativeNamer;
pub use options::{OfferSheet, OptionSet};
pub use projection::{project_assets, AssetProjection};
pub use session::MatrixSession;
pub use sizes::{resolve_sizes, SizeCatalog};
