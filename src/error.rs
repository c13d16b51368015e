use thiserror::Error;

pub type FunnelResult<T> = Result<T, FunnelError>;

#[derive(Debug, Error)]
pub enum FunnelError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unrecognized csv format: {0}")]
    Format(String),

    #[error("invalid config: {0}")]
    Config(String),
}
