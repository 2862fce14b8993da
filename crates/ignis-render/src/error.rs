#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
