//! Read-only asset stores: logical path in, raster bytes out.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ValleyError};

/// A read-only mapping from logical asset path to encoded image bytes.
pub trait AssetStore: Send + Sync {
    /// Read the raw bytes stored under `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Assets stored as files beneath a root directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a logical path onto the root, refusing anything that escapes it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let logical = Path::new(path);
        let escapes = logical
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ValleyError::Asset {
                path: path.to_string(),
                message: "asset paths must be relative and stay inside the asset root".to_string(),
            });
        }
        Ok(self.root.join(logical))
    }
}

impl AssetStore for DirStore {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| ValleyError::Asset {
            path: path.to_string(),
            message: match e.kind() {
                ErrorKind::NotFound => format!("not found under {}", self.root.display()),
                _ => e.to_string(),
            },
        })
    }
}

/// Assets held in memory, e.g. bundled resources or test fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryStore {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| ValleyError::Asset {
            path: path.to_string(),
            message: "not found in memory store".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dir_store_reads_nested_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Tails")).unwrap();
        fs::write(dir.path().join("Tails/Classic.PNG"), b"png-bytes").unwrap();

        let store = DirStore::new(dir.path());
        assert_eq!(store.read("Tails/Classic.PNG").unwrap(), b"png-bytes");
    }

    #[test]
    fn test_dir_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = DirStore::new(dir.path());

        let err = store.read("Eyes/Happy.PNG").unwrap_err();
        assert!(matches!(err, ValleyError::Asset { ref path, .. } if path == "Eyes/Happy.PNG"));
    }

    #[test]
    fn test_dir_store_rejects_escaping_paths() {
        let dir = tempdir().unwrap();
        let store = DirStore::new(dir.path());

        assert!(store.read("../secret.png").is_err());
        assert!(store.read("/etc/passwd").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.insert("Base/Base.PNG", vec![1, 2, 3]);

        assert_eq!(store.read("Base/Base.PNG").unwrap(), vec![1, 2, 3]);
        assert!(store.read("Base/Other.PNG").is_err());
        assert_eq!(store.len(), 1);
    }
}
