use thiserror::Error;

/// Engine-wide error taxonomy.
///
/// Every public operation distinguishes caller faults from internal
/// failures:
///
/// - [`EngineError::Validation`]: precondition or input fault, always
///   detectable before any heavy computation. Never retried.
/// - [`EngineError::Processing`]: unexpected failure during parsing or
///   computation, wrapped with the name of the operation that raised it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{operation} failed: {source}")]
    Processing {
        operation: String,
        #[source]
        source: anyhow::Error,
    },
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn processing(
        operation: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Processing {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// True for caller/input faults; transport layers map these to
    /// client errors and everything else to server errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_distinguishable() {
        let validation = EngineError::validation("no data loaded");
        assert!(validation.is_validation());
        assert_eq!(
            validation.to_string(),
            "validation error: no data loaded"
        );

        let processing =
            EngineError::processing("model fit", anyhow::anyhow!("singular system"));
        assert!(!processing.is_validation());
        assert_eq!(processing.to_string(), "model fit failed: singular system");
    }
}
