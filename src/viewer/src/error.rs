#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sim(#[from] xpbd::Error),
	#[error("surface: {0}")]
	Surface(String),
	#[error("config: {0}")]
	Config(#[from] serde_json::Error),
	#[error("encode: {0}")]
	Encode(#[from] bincode::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
