use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JrdError {
    /// The server answered with a JRD-shaped body carrying an `error` field.
    #[error("{message}")]
    ServerReported { message: String },

    #[error("unknown response from server")]
    UnknownResponseShape,
}

/// Returned when a string does not name one of the indexed relations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported rel {0}")]
pub struct UnknownRelation(pub String);
