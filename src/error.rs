use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeachkitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TeachkitError>;
