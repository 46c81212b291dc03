#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node {node} has a connection to a missing node: {target}")]
    MissingTarget { node: usize, target: usize },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },

    #[error(
        "no free cell found for node {node} after {attempts} attempts (grid size {grid_size})"
    )]
    Capacity {
        node: usize,
        attempts: usize,
        grid_size: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
