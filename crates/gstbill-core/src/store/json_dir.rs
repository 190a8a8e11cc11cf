//! Bill records stored as JSON files, one directory per tenant.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::bill::Bill;

use super::BillStore;

/// Read-only view of `<root>/<tenant>/*.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NumberOnly {
    #[serde(default)]
    bill_number: String,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn tenant_dir(&self, tenant: &str) -> PathBuf {
        self.root.join(tenant)
    }

    /// JSON files for a tenant, sorted by path. Missing directory is empty.
    fn bill_files(&self, tenant: &str) -> Result<Vec<PathBuf>> {
        let dir = self.tenant_dir(tenant);
        if !dir.is_dir() {
            debug!("No bill directory for tenant {} at {}", tenant, dir.display());
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| read_error(&dir, e))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Load every readable bill for a tenant.
    pub fn load_bills(&self, tenant: &str) -> Result<Vec<Bill>> {
        Ok(self
            .bill_files(tenant)?
            .iter()
            .filter_map(|path| read_json::<Bill>(path))
            .collect())
    }
}

impl BillStore for JsonDirStore {
    fn list_bill_numbers(&self, tenant: &str) -> Result<Vec<String>> {
        Ok(self
            .bill_files(tenant)?
            .iter()
            .filter_map(|path| read_json::<NumberOnly>(path))
            .map(|record| record.bill_number)
            .filter(|number| !number.is_empty())
            .collect())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

fn read_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lists_numbers_and_skips_bad_files() {
        let root = tempfile::tempdir().unwrap();
        let tenant = root.path().join("shop");
        fs::create_dir_all(&tenant).unwrap();
        fs::write(tenant.join("a.json"), r#"{"billNumber": "SR/2025-26/1"}"#).unwrap();
        fs::write(tenant.join("b.json"), r#"{"billNumber": "SR/ES/2025-26/1", "billType": "estimate"}"#).unwrap();
        fs::write(tenant.join("broken.json"), "{ not json").unwrap();
        fs::write(tenant.join("notes.txt"), "SR/2025-26/99").unwrap();

        let store = JsonDirStore::new(root.path());
        let numbers = store.list_bill_numbers("shop").unwrap();
        assert_eq!(numbers, vec!["SR/2025-26/1".to_string(), "SR/ES/2025-26/1".to_string()]);

        let bills = store.load_bills("shop").unwrap();
        assert_eq!(bills.len(), 2);
    }

    #[test]
    fn test_missing_tenant_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let store = JsonDirStore::new(root.path());
        assert!(store.list_bill_numbers("nobody").unwrap().is_empty());
    }
}
