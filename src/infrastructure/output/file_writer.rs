//! Filesystem output writer.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::errors::FetchError;
use crate::domain::ports::OutputPort;

/// Writes downloads into a directory, the working directory by default.
///
/// Existing files are truncated and rewritten in place; the write is not
/// atomic.
#[derive(Debug, Clone, Default)]
pub struct FileOutputWriter {
    dir: Option<PathBuf>,
}

impl FileOutputWriter {
    /// Creates writer for the current working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { dir: None }
    }

    /// Creates writer for a specific directory.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn target(&self, file_name: &str) -> PathBuf {
        self.dir
            .as_ref()
            .map_or_else(|| PathBuf::from(file_name), |dir| dir.join(file_name))
    }
}

#[async_trait]
impl OutputPort for FileOutputWriter {
    async fn write(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, FetchError> {
        let path = self.target(file_name);
        debug!(path = %path.display(), bytes = contents.len(), "Writing output file");

        let mut file = File::create(&path).await?;
        file.write_all(contents).await?;
        file.flush().await?;

        Ok(path)
    }
}
