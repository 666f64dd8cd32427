use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::mutation::Mutation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded {code}: {message}")]
    Status { code: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

/// Fetch collaborator: returns the full result set for one screen.
#[async_trait]
pub trait RowSource<R>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError>;
}

/// Mutation collaborator. Success means the owning view must refetch.
#[async_trait]
pub trait MutationPort: Send + Sync {
    async fn apply(&self, mutation: &Mutation) -> Result<(), SourceError>;
}
