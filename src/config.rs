use crate::*;
use confique::Config as _;
use sqlparser::dialect::{Dialect, GenericDialect, dialect_from_str};
use std::sync::OnceLock;

pub const DEFAULT_DIALECT: &str = "generic";

#[derive(confique::Config)]
pub struct Config {
    /// Dialect handed to the tokenizer, by its `sqlparser` name
    /// (`generic`, `postgresql`, `mysql`, `sqlite`, `mssql`, ...).
    #[config(env = "SQLSTYLE_DIALECT", default = "generic")]
    pub dialect: String,
}

impl Config {
    /// The configured tokenizer dialect. Unknown names fall back to the
    /// generic dialect.
    pub fn dialect(&self) -> Box<dyn Dialect> {
        dialect_named(&self.dialect).unwrap_or_else(|err| {
            warn!("{err}, using the {DEFAULT_DIALECT} dialect");
            Box::new(GenericDialect {})
        })
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder().env().load().unwrap_or_else(|err| {
            error!("Failed to load configuration from the environment: {err}");
            Config {
                dialect: DEFAULT_DIALECT.to_string(),
            }
        })
    })
}

/// Resolve a dialect by name, case-insensitively.
pub fn dialect_named(name: &str) -> Result<Box<dyn Dialect>> {
    let dialect = dialect_from_str(name.trim())
        .ok_or_else(|| Error::Config(format!("Unknown SQL dialect `{name}`")))?;
    debug!("Tokenizing with the {name} dialect");
    Ok(dialect)
}
