#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
	Err(Error::InvalidConfiguration(msg.into()))
}
