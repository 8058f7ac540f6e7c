use thiserror::Error;

/// Failures while loading configuration or a lab catalog. The composition engine itself never errors.
#[derive(Debug, Error)]
pub enum AlchemyError {
    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse failed: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("duplicate lab id in catalog: {0}")]
    DuplicateLab(String),
}
