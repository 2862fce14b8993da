use crate::auth::Role;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid CNPJ: {raw:?}")]
    InvalidIdentifier { raw: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("undecodable response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("the {view} view requires the {required} role (current role: {actual})")]
    Forbidden {
        view: &'static str,
        required: Role,
        actual: Role,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] ignis_core::Error),

    #[error(transparent)]
    Render(#[from] ignis_render::Error),
}

impl Error {
    pub(crate) fn transport(url: &url::Url, err: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(url: &url::Url, err: &reqwest::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// `true` for failures of the remote call itself (transport, status, body).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }
}
