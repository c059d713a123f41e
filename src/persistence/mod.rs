//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, then rename over the save)
//! - Missing file is not an error for callers that want defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current on-disk format version
pub const SAVE_VERSION: u32 = 1;

/// Wrapper written around every persisted payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            version: SAVE_VERSION,
            payload,
        }
    }

    /// Unwrap the payload, rejecting unknown versions
    pub fn into_payload(self) -> Result<T> {
        if self.version != SAVE_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(self.payload)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `payload` to `path` inside a versioned envelope
pub fn save<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(&Envelope::new(payload)).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(|source| Error::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Parse any JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an envelope from `path`, rejecting unknown versions
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    read_json::<Envelope<T>>(path)?.into_payload()
}

/// Like [`load`], but a missing file yields `Ok(None)`
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match load(path) {
        Ok(value) => Ok(Some(value)),
        Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("panzer-dash-{}-{}", std::process::id(), name))
            .join("save.json")
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip");
        save(&path, &vec![3u32, 1, 4]).unwrap();
        let back: Vec<u32> = load(&path).unwrap();
        assert_eq!(back, vec![3, 1, 4]);
        assert!(!tmp_path(&path).exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = scratch("missing");
        let loaded: Option<u32> = load_optional(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let path = scratch("version");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"version": 99, "payload": 7}"#).unwrap();
        let err = load::<u32>(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { found: 99, .. }));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_garbage_is_json_error() {
        let path = scratch("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load::<u32>(&path), Err(Error::Json { .. })));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
