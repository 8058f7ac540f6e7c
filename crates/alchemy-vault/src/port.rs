//! Key-value persistence port and its adapters: sled on disk behind a DashMap
//! hot cache, or DashMap alone for tests and throwaway sessions.

use crate::error::VaultError;
use dashmap::DashMap;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

/// Byte-oriented store keyed by string. Implementations must be safe to share.
pub trait KeyValuePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), VaultError>;
    fn remove(&self, key: &str) -> Result<(), VaultError>;
}

/// Sled database with a write-through in-memory cache.
pub struct SledPort {
    db: Db,
    /// Checked before sled.
    cache: Arc<DashMap<String, Vec<u8>>>,
}

impl SledPort {
    /// Opens or creates a sled database at `path`.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, VaultError> {
        let db = sled::open(path)?;
        Ok(Self {
            db,
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Database removed when dropped.
    pub fn temporary() -> Result<Self, VaultError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self {
            db,
            cache: Arc::new(DashMap::new()),
        })
    }

    pub fn flush(&self) -> Result<(), VaultError> {
        self.db.flush()?;
        Ok(())
    }
}

impl KeyValuePort for SledPort {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError> {
        if let Some(v) = self.cache.get(key) {
            return Ok(Some(v.clone()));
        }
        let out = self.db.get(key.as_bytes())?.map(|iv| iv.to_vec());
        if let Some(ref bytes) = out {
            self.cache.insert(key.to_string(), bytes.clone());
        }
        Ok(out)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), VaultError> {
        self.db.insert(key.as_bytes(), value)?;
        self.cache.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), VaultError> {
        self.db.remove(key.as_bytes())?;
        self.cache.remove(key);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPort {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValuePort for MemoryPort {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), VaultError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), VaultError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: KeyValuePort + ?Sized> KeyValuePort for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), VaultError> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), VaultError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(port: &dyn KeyValuePort) {
        assert!(port.get("alchemy.test").unwrap().is_none());
        port.put("alchemy.test", b"{\"a\":1}").unwrap();
        assert_eq!(port.get("alchemy.test").unwrap().as_deref(), Some(&b"{\"a\":1}"[..]));
        port.put("alchemy.test", b"[]").unwrap();
        assert_eq!(port.get("alchemy.test").unwrap().as_deref(), Some(&b"[]"[..]));
        port.remove("alchemy.test").unwrap();
        assert!(port.get("alchemy.test").unwrap().is_none());
    }

    #[test]
    fn memory_port_roundtrip() {
        let port = MemoryPort::new();
        exercise(&port);
        assert!(port.is_empty());
    }

    #[test]
    fn sled_port_roundtrip() {
        let port = SledPort::temporary().unwrap();
        exercise(&port);
    }

    #[test]
    fn sled_port_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let port = SledPort::open_path(dir.path()).unwrap();
            port.put("alchemy.drafts.v1", b"{}").unwrap();
            port.flush().unwrap();
        }
        // The lock is released by sled's flusher shortly after the drop.
        let port = (0..20)
            .find_map(|_| {
                SledPort::open_path(dir.path()).ok().or_else(|| {
                    std::thread::sleep(std::time::Duration::from_millis(50));
                    None
                })
            })
            .expect("sled store reopens");
        assert_eq!(port.get("alchemy.drafts.v1").unwrap().as_deref(), Some(&b"{}"[..]));
    }
}
