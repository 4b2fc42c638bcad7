use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawnExt, SpawnError};
use thiserror::Error;

use crate::accessor::IngestError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Failure anywhere along a fetch chain. Its text becomes the `error-message` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Remote store client. Resolves to the decoded response body.
pub trait FetchClient {
    fn request(
        &self,
        url: &str,
    ) -> LocalBoxFuture<'static, Result<serde_json::Value, FetchError>>;
}

/// Runs fetch chains on the host's single-threaded executor.
pub trait Spawner {
    /// # Errors
    ///
    /// Returns [`SpawnError`] when the executor is shut down.
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError>;
}

impl Spawner for futures::executor::LocalSpawner {
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError> {
        LocalSpawnExt::spawn_local(self, fut)
    }
}
