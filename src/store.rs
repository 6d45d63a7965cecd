//! Persistence for the one field narrative synthesis writes: a bill's
//! referred committee.

use crate::error::{Error, Result};
use crate::types::Bill;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::NamedTempFile;
use tracing::debug;

/// Somewhere bills can be saved back to
pub trait BillStore {
    fn save_bill(&self, bill: &Bill) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Bills held in memory, keyed by id
#[derive(Debug, Default)]
pub struct MemoryBillStore {
    bills: Mutex<HashMap<u32, Bill>>,
    writes: Mutex<usize>,
}

impl MemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<Bill> {
        lock(&self.bills).get(&id).cloned()
    }

    /// Number of saves that changed a stored bill
    pub fn writes(&self) -> usize {
        *lock(&self.writes)
    }
}

impl BillStore for MemoryBillStore {
    fn save_bill(&self, bill: &Bill) -> Result<()> {
        let mut bills = lock(&self.bills);
        if bills.get(&bill.id) == Some(bill) {
            return Ok(());
        }
        bills.insert(bill.id, bill.clone());
        *lock(&self.writes) += 1;
        Ok(())
    }
}

/// Saves bills back into the dossier files they were loaded from.
///
/// Writes to the same bill are serialised and a file is only rewritten when
/// the stored bill differs from the one being saved.
#[derive(Debug, Default)]
pub struct JsonBillStore {
    paths: Mutex<HashMap<u32, PathBuf>>,
    locks: Mutex<HashMap<u32, Arc<Mutex<()>>>>,
}

impl JsonBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember which file holds the bill
    pub fn register(&self, bill_id: u32, path: impl Into<PathBuf>) {
        lock(&self.paths).insert(bill_id, path.into());
    }

    fn path_for(&self, bill_id: u32) -> Result<PathBuf> {
        lock(&self.paths)
            .get(&bill_id)
            .cloned()
            .ok_or_else(|| Error::missing("bill file", bill_id))
    }

    fn bill_lock(&self, bill_id: u32) -> Arc<Mutex<()>> {
        lock(&self.locks).entry(bill_id).or_default().clone()
    }

    fn rewrite(path: &Path, bill: &Bill) -> Result<bool> {
        let contents = std::fs::read_to_string(path)?;
        let mut dossier: serde_json::Value = serde_json::from_str(&contents)?;
        let updated = serde_json::to_value(bill)?;

        let Some(slot) = dossier.get_mut("bill") else {
            return Err(Error::Path(format!(
                "Dossier has no bill record: {}",
                path.display()
            )));
        };
        if *slot == updated {
            return Ok(false);
        }
        *slot = updated;

        // Stage beside the dossier, then rename over it
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(serde_json::to_string_pretty(&dossier)?.as_bytes())?;
        staged.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(true)
    }
}

impl BillStore for JsonBillStore {
    fn save_bill(&self, bill: &Bill) -> Result<()> {
        let path = self.path_for(bill.id)?;
        let bill_lock = self.bill_lock(bill.id);
        let _guard = lock(bill_lock.as_ref());

        if Self::rewrite(&path, bill)? {
            debug!(bill = %bill.url, path = %path.display(), "saved bill");
        }
        Ok(())
    }
}
