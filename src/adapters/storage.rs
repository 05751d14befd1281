use crate::domain::DocumentSink;
use crate::utils::error::{PassError, Result};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Only a bare file name is accepted, so every write stays inside `base_path`.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut components = Path::new(path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.base_path.join(name)),
            _ => Err(PassError::storage(format!(
                "refusing to write '{}': not a plain file name",
                path
            ))),
        }
    }
}

impl DocumentSink for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.resolve(path)?;
        tokio::fs::create_dir_all(&self.base_path).await?;

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path.to_string_lossy().into_owned())
    }
}
