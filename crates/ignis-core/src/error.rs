pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid CNPJ: {raw:?}")]
    InvalidIdentifier { raw: String },

    #[error("invalid configuration value at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("configuration JSON error: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("configuration YAML error: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
}
