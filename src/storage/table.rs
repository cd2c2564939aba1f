//! Generic id-keyed JSON table
//!
//! Most resources are a flat list of records with store-assigned numeric ids.
//! `Table<T>` keeps them in memory behind a lock and persists them as
//! `{ "next_id": N, "records": [...] }`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};

use super::file_io::{read_json, write_json_atomic};

/// A record that can live in a `Table`
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Ord + From<u64> + Into<u64> + std::fmt::Display;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
struct TableFile<T> {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    records: Vec<T>,
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            records: Vec::new(),
        }
    }
}

fn first_id() -> u64 {
    1
}

struct TableState<T: Record> {
    next_id: u64,
    records: BTreeMap<T::Id, T>,
}

/// Repository for one resource file
pub struct Table<T: Record> {
    path: PathBuf,
    state: RwLock<TableState<T>>,
}

impl<T: Record> Table<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(TableState {
                next_id: first_id(),
                records: BTreeMap::new(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> FintrackResult<RwLockReadGuard<'_, TableState<T>>> {
        self.state
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FintrackResult<RwLockWriteGuard<'_, TableState<T>>> {
        self.state
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing whatever is in memory
    pub fn load(&self) -> FintrackResult<()> {
        let file: TableFile<T> = read_json(&self.path)?;
        let mut state = self.write()?;

        state.records = file.records.into_iter().map(|r| (r.id(), r)).collect();
        // Never hand out an id that is already on disk, even if the counter
        // was edited by hand
        let highest: u64 = state
            .records
            .values()
            .map(|r| r.id().into())
            .max()
            .unwrap_or(0);
        state.next_id = file.next_id.max(highest + 1);
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let state = self.read()?;
        let file = TableFile {
            next_id: state.next_id,
            records: state.records.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file)
    }

    /// Reserve the next id. Ids are never reused, even after deletes.
    pub fn next_id(&self) -> FintrackResult<T::Id> {
        let mut state = self.write()?;
        let id = state.next_id;
        state.next_id += 1;
        Ok(T::Id::from(id))
    }

    pub fn get(&self, id: T::Id) -> FintrackResult<Option<T>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    /// All records in id order
    pub fn get_all(&self) -> FintrackResult<Vec<T>> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    /// Records matching `predicate`, in id order
    pub fn filter<F>(&self, predicate: F) -> FintrackResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    pub fn find<F>(&self, predicate: F) -> FintrackResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read()?.records.values().find(|r| predicate(r)).cloned())
    }

    pub fn any<F>(&self, predicate: F) -> FintrackResult<bool>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read()?.records.values().any(predicate))
    }

    pub fn upsert(&self, record: T) -> FintrackResult<()> {
        self.write()?.records.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> FintrackResult<Option<T>> {
        Ok(self.write()?.records.remove(&id))
    }

    pub fn count(&self) -> FintrackResult<usize> {
        Ok(self.read()?.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pocket, PocketId};
    use tempfile::TempDir;

    fn table(dir: &TempDir) -> Table<Pocket> {
        Table::new(dir.path().join("pockets.json"))
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let dir = TempDir::new().unwrap();
        let t = table(&dir);

        let a = t.next_id().unwrap();
        t.upsert(Pocket::new(a, "Housing")).unwrap();
        let b = t.next_id().unwrap();
        t.upsert(Pocket::new(b, "Food")).unwrap();
        assert_eq!(a, PocketId::new(1));
        assert_eq!(b, PocketId::new(2));

        t.delete(b).unwrap();
        t.save().unwrap();

        let reloaded = table(&dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.next_id().unwrap(), PocketId::new(3));
        assert_eq!(reloaded.count().unwrap(), 1);
    }

    #[test]
    fn test_counter_repaired_from_records() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pockets.json"),
            r#"{"next_id":1,"records":[{"id":7,"name":"Food","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();

        let t = table(&dir);
        t.load().unwrap();
        assert_eq!(t.next_id().unwrap(), PocketId::new(8));
    }

    #[test]
    fn test_filter_and_find() {
        let dir = TempDir::new().unwrap();
        let t = table(&dir);
        for name in ["Housing", "Food", "Health"] {
            let id = t.next_id().unwrap();
            t.upsert(Pocket::new(id, name)).unwrap();
        }

        let h: Vec<_> = t
            .filter(|p| p.name.starts_with('H'))
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(h, vec!["Housing", "Health"]);
        assert!(t.find(|p| p.name == "Food").unwrap().is_some());
        assert!(!t.any(|p| p.name == "Travel").unwrap());
    }
}
