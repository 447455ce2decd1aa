use thiserror::Error;

#[derive(Debug, Error)]
pub enum KfdxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required column '{column}' in {table}")]
    MissingColumn { column: String, table: String },

    #[error("Line {line}: {column} is empty")]
    EmptyField { line: u64, column: &'static str },

    #[error("Line {line}: {source}")]
    InvalidCategory {
        line: u64,
        #[source]
        source: UnknownCategory,
    },

    #[error("Line {line}: PubMed_Count '{value}' is not a non-negative integer")]
    InvalidCount { line: u64, value: String },

    #[error("Duplicate Symbol '{0}' in gene signature")]
    DuplicateSymbol(String),

    #[error("Gene signature has no rows")]
    EmptyInput,

    #[error("All PubMed_Count values are zero; evidence normalisation is undefined")]
    DegenerateEvidence,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A categorical value outside its closed enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {column} value '{value}' (expected one of: {allowed})")]
pub struct UnknownCategory {
    pub column: &'static str,
    pub value: String,
    pub allowed: String,
}

/// Coarse error taxonomy used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing/unparseable input, bad columns, out-of-enumeration values.
    InputIntegrity,
    /// Structurally valid input that cannot be scored (all-zero evidence).
    DegenerateInput,
    Configuration,
    Io,
}

impl KfdxError {
    pub fn class(&self) -> ErrorClass {
        match self {
            KfdxError::Io(_) => ErrorClass::Io,
            KfdxError::Csv(e) if e.is_io_error() => ErrorClass::Io,
            KfdxError::Csv(_)
            | KfdxError::MissingColumn { .. }
            | KfdxError::EmptyField { .. }
            | KfdxError::InvalidCategory { .. }
            | KfdxError::InvalidCount { .. }
            | KfdxError::DuplicateSymbol(_)
            | KfdxError::EmptyInput => ErrorClass::InputIntegrity,
            KfdxError::DegenerateEvidence => ErrorClass::DegenerateInput,
            KfdxError::Serialization(_) | KfdxError::Config(_) => ErrorClass::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, KfdxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(KfdxError::EmptyInput.class(), ErrorClass::InputIntegrity);
        assert_eq!(KfdxError::DegenerateEvidence.class(), ErrorClass::DegenerateInput);
        assert_eq!(
            KfdxError::Config("weights".into()).class(),
            ErrorClass::Configuration
        );
        let json = serde_json::from_str::<u32>("not json").unwrap_err();
        assert_eq!(KfdxError::from(json).class(), ErrorClass::Configuration);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(KfdxError::from(io).class(), ErrorClass::Io);
    }

    #[test]
    fn test_invalid_category_message_names_line_and_value() {
        let err = KfdxError::InvalidCategory {
            line: 7,
            source: UnknownCategory {
                column: "Pathway",
                value: "renal".into(),
                allowed: "endothelial, coagulation".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Line 7:"), "{msg}");
        assert!(msg.contains("'renal'"), "{msg}");
    }
}
