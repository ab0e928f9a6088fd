use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtendError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// tokenizers::Error is a boxed trait object, so only the message is kept
    #[error("tokenizer: {0}")]
    Tokenizer(String),

    #[error("Tokenizer model is not BPE, only BPE vocabularies can be merged.")]
    NotBpe,

    #[error("Invalid vocabulary: {0}")]
    InvalidVocab(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Language code must not be empty.")]
    EmptyLanguage,
}

impl ExtendError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtendError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ExtendError::Json { path: path.into(), source }
    }
}

impl From<tokenizers::Error> for ExtendError {
    fn from(err: tokenizers::Error) -> Self {
        ExtendError::Tokenizer(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtendError>;
