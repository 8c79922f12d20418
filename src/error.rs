use thiserror::Error;

pub type OptionResult<T> = Result<T, OptionError>;

#[derive(Debug, Error)]
pub enum OptionError {
    #[error("legend has {legend} entries but series data has {series}")]
    LengthMismatch { legend: usize, series: usize },

    #[error("option has no field `{path}`")]
    MissingField { path: String },

    #[error("`{path}` is not an object")]
    NotAnObject { path: String },

    #[error("`{path}` is not an array")]
    NotAnArray { path: String },

    #[error("index {index} out of range for `{field}` (len {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("option root must be a JSON object")]
    InvalidRoot,

    #[error("unknown chart kind: {0}")]
    UnknownChartKind(String),

    #[error("failed to serialize option: {0}")]
    Serialize(#[from] serde_json::Error),
}
