use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("given repetition name not found: {name}")]
    InvalidRepetitionName { name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
