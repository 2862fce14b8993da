#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains a link with a missing endpoint: {link_id}")]
    MissingEndpoint { link_id: String },
    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
