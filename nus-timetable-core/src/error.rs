use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("upstream catalog unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
