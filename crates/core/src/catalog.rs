//! Compiled-in lookup tables: lines of business, platforms and their sizes,
//! matrix types and the stock option lists offered to planners.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

// ─── Lines of business ──────────────────────────────────────────────────────

/// Client/product code pair used in every creative name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LobCodes {
    pub client: &'static str,
    pub product: &'static str,
}

/// Business unit selector. Each one maps to a fixed code pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOfBusiness {
    ConnectedHome,
    ConsumerWireless,
    RogersBusiness,
    RogersBank,
    CorporateBrand,
    ShawDirect,
}

impl LineOfBusiness {
    pub const ALL: [LineOfBusiness; 6] = [
        LineOfBusiness::ConnectedHome,
        LineOfBusiness::ConsumerWireless,
        LineOfBusiness::RogersBusiness,
        LineOfBusiness::RogersBank,
        LineOfBusiness::CorporateBrand,
        LineOfBusiness::ShawDirect,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LineOfBusiness::ConnectedHome => "Connected Home",
            LineOfBusiness::ConsumerWireless => "Consumer Wireless",
            LineOfBusiness::RogersBusiness => "Rogers Business",
            LineOfBusiness::RogersBank => "Rogers Bank",
            LineOfBusiness::CorporateBrand => "Corporate Brand",
            LineOfBusiness::ShawDirect => "Shaw Direct",
        }
    }

    pub fn codes(&self) -> LobCodes {
        let (client, product) = match self {
            LineOfBusiness::ConnectedHome => ("RHE", "IGN"),
            LineOfBusiness::ConsumerWireless => ("RCS", "WLS"),
            LineOfBusiness::RogersBusiness => ("RNS", "BRA"),
            LineOfBusiness::RogersBank => ("RBG", "RBK"),
            LineOfBusiness::CorporateBrand => ("RCP", "RCB"),
            LineOfBusiness::ShawDirect => ("RSH", "CBL"),
        };
        LobCodes { client, product }
    }

    /// Reverse lookup from a client/product code pair, ignoring case.
    pub fn from_codes(client: &str, product: &str) -> Option<Self> {
        LineOfBusiness::ALL.into_iter().find(|lob| {
            let codes = lob.codes();
            codes.client.eq_ignore_ascii_case(client.trim())
                && codes.product.eq_ignore_ascii_case(product.trim())
        })
    }
}

impl fmt::Display for LineOfBusiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for LineOfBusiness {
    type Err = MatrixError;

    /// Accepts the display name in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        LineOfBusiness::ALL
            .into_iter()
            .find(|lob| normalize_label(lob.display_name()) == wanted)
            .ok_or_else(|| MatrixError::UnknownLineOfBusiness(s.to_string()))
    }
}

// ─── Platforms ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Meta,
    Pinterest,
    Reddit,
    Display,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Meta,
        Platform::Pinterest,
        Platform::Reddit,
        Platform::Display,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Meta => "Meta",
            Platform::Pinterest => "Pinterest",
            Platform::Reddit => "Reddit",
            Platform::Display => "Display",
        }
    }

    /// Size labels deliverable on this platform.
    pub fn sizes(&self) -> &'static [&'static str] {
        match self {
            Platform::Meta => &["1x1 Meta", "9x16 Story", "9x16 Reel"],
            Platform::Pinterest => &["2x3 Pinterest", "1x1 Pinterest", "9x16 Pinterest"],
            Platform::Reddit => &["1x1 Reddit", "4x5 Reddit", "16x9 Reddit"],
            Platform::Display => &["300x250", "728x90", "160x600", "300x600", "970x250"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Platform::ALL
            .into_iter()
            .find(|p| normalize_label(p.name()) == wanted)
            .ok_or_else(|| MatrixError::UnknownPlatform(s.to_string()))
    }
}

// ─── Matrix types ───────────────────────────────────────────────────────────

/// Which size catalog a matrix draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixType {
    /// Standard display sizes; platform selection is ignored.
    #[default]
    Display,
    /// Sizes come from the selected social platforms.
    Social,
}

impl MatrixType {
    pub fn label(&self) -> &'static str {
        match self {
            MatrixType::Display => "Display",
            MatrixType::Social => "Social",
        }
    }

    pub fn is_platform_based(&self) -> bool {
        matches!(self, MatrixType::Social)
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MatrixType {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "display" | "standard" => Ok(MatrixType::Display),
            "social" => Ok(MatrixType::Social),
            _ => Err(MatrixError::UnknownMatrixType(s.to_string())),
        }
    }
}

// ─── Stock options ──────────────────────────────────────────────────────────

pub const STOCK_FUNNELS: &[&str] = &["AWR", "CON", "CNV"];
pub const STOCK_REGIONS: &[&str] = &["ON", "QC", "AB", "BC", "ATL"];
pub const STOCK_LANGUAGES: &[&str] = &["EN", "FR"];
pub const STOCK_DURATIONS: &[&str] = &["6s", "15s", "30s"];

fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', '-'], " ")
}
