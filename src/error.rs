use sqlparser::tokenizer::TokenizerError;

/// Failures of the fallible steps underneath [`crate::Parser`]. None of them
/// reach a caller of the parser: the lexer recovers from tokenizer errors and
/// an unknown dialect falls back to the generic one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tokenizer error: {0}")]
    Tokenize(#[from] TokenizerError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
