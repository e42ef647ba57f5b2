//! Host list persistence - save and load lists to/from disk.
//!
//! A list file is a JSON array of host strings, pretty-printed so each host
//! sits on its own line, in list order.

use std::fs;
use std::io;
use std::path::Path;

use crate::base::context::{IoResultExt, JsonResultExt};
use crate::base::error::CrumbError;
use crate::hostlist::HostList;

/// Load a list file. A missing file is an empty list.
pub fn load_hosts(path: &Path) -> Result<HostList, CrumbError> {
    let json = match fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "list file missing, starting empty");
            return Ok(HostList::new());
        }
        other => other.list_context(path)?,
    };

    let hosts: Vec<String> = serde_json::from_str(&json).format_context(path)?;
    Ok(HostList::from_entries(hosts))
}

/// Save a list, replacing the file.
pub fn save_hosts(path: &Path, list: &HostList) -> Result<(), CrumbError> {
    let json = serde_json::to_string_pretty(list.entries()).format_context(path)?;
    fs::write(path, json + "\n").list_context(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");

        let mut list = HostList::new();
        list.insert("zeta.com");
        list.insert(".alpha.com");
        save_hosts(&path, &list).unwrap();

        let loaded = load_hosts(&path).unwrap();
        assert_eq!(loaded.entries(), [".zeta.com", ".alpha.com"]);
        assert!(!loaded.is_dirty());

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(body.lines().filter(|l| l.contains(".com")).count(), 2);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let list = load_hosts(&dir.path().join("nope.json")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_loads_legacy_unnormalized_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("whitelist.json");
        fs::write(&path, r#"["a.com", ".a.com", ".b.com"]"#).unwrap();

        let list = load_hosts(&path).unwrap();
        assert_eq!(list.entries(), [".a.com", ".b.com"]);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("whitelist.json");
        fs::write(&path, "not json").unwrap();

        let err = load_hosts(&path).unwrap_err();
        assert!(matches!(err, CrumbError::ListFormat { .. }));
    }
}
