use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed Key: {0}")]
    MalformedKey(String),

    #[error("Invalid Configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Corpus Unavailable: {0}")]
    CorpusUnavailable(String),
}

pub type CfResult<T> = Result<T, CipherForgeError>;
