use thiserror::Error;

/// Errors that can occur while selecting records or encoding a DATEV export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatevError {
    /// The export request is malformed or incomplete.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No invoice matched the selection criteria.
    #[error("no invoices found for {criteria}")]
    NoRecordsFound {
        /// Human-readable description of the attempted filter.
        criteria: String,
    },

    /// No partner qualified for the Debitoren/Kreditoren export.
    #[error("no partners found for {criteria}")]
    NoPartnersFound {
        /// Human-readable description of the attempted filter.
        criteria: String,
    },

    /// The ledger collaborator failed to answer a query.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error.
    #[error("archive error: {0}")]
    Archive(String),
}

impl DatevError {
    /// Whether this error reports an empty result set rather than a fault.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::NoRecordsFound { .. } | Self::NoPartnersFound { .. }
        )
    }
}
