//! Output port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// Port for persisting a downloaded body.
#[async_trait]
pub trait OutputPort: Send + Sync {
    /// Writes `contents` to `file_name`, replacing any existing file, and
    /// returns the path written.
    async fn write(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, FetchError>;
}
