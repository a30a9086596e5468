use thiserror::Error;

pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    /// A segment read failed. Fatal for the fetch request that hit it.
    #[error("Storage fault ({context}): {source}")]
    Storage {
        context: String,
        #[source]
        source: BoxedSource,
    },
}

impl Error {
    pub fn storage<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        Error::Storage { context: context.into(), source: source.into() }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
