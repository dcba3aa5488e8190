use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenAIError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("OpenAI API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, OpenAIError>;
