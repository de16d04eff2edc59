use crate::well::WellId;

/// Errors surfaced by the catalog, repository and session.
///
/// Missing history for a well is never an error: it is an empty series.
#[derive(Debug, thiserror::Error)]
pub enum WellError {
    /// The store could not be reached or a query against it failed.
    #[error("could not load data ({context}): {source}")]
    DataSource {
        /// What was being read when the failure happened.
        context: String,
        /// The underlying store error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A catalog lookup referenced a well that was never loaded.
    #[error("well {0} is not in the catalog")]
    NotFound(WellId),
}

impl WellError {
    /// Wrap a store failure with a short description of the read in progress.
    pub fn data_source(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        WellError::DataSource {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = WellError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_source_message_includes_context_and_cause() {
        let err = WellError::data_source("production", "disk I/O error");
        assert_eq!(
            err.to_string(),
            "could not load data (production): disk I/O error"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn data_source_accepts_anyhow_errors() {
        let cause = anyhow::anyhow!("no such table: production");
        let err = WellError::data_source("production", cause);
        assert!(matches!(err, WellError::DataSource { .. }));
    }

    #[test]
    fn not_found_names_the_well() {
        let err = WellError::NotFound("X-9:UI".to_string());
        assert_eq!(err.to_string(), "well X-9:UI is not in the catalog");
    }
}
