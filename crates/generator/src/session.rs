use tracing::{info, warn};

use matrix_core::{MatrixOutcome, MatrixRequest, MatrixResult, MatrixSummary};

use crate::generator::MatrixGenerator;

/// Holds the most recent matrix. A successful generation replaces it, a
/// failed one leaves it as it was.
#[derive(Debug, Default)]
pub struct MatrixSession {
    generator: MatrixGenerator,
    current: Option<MatrixResult>,
}

impl MatrixSession {
    pub fn new(generator: MatrixGenerator) -> Self {
        Self {
            generator,
            current: None,
        }
    }

    pub fn generate(&mut self, request: &MatrixRequest) -> MatrixOutcome<&MatrixResult> {
        match self.generator.generate(request) {
            Ok(result) => Ok(&*self.current.insert(result)),
            Err(e) => {
                warn!(error = %e, kept_previous = self.current.is_some(), "generation rejected");
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&MatrixResult> {
        self.current.as_ref()
    }

    pub fn summary(&self) -> Option<MatrixSummary> {
        self.current.as_ref().map(MatrixResult::summary)
    }

    /// Drop the current matrix.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            info!("asset matrix cleared");
        }
    }
}
