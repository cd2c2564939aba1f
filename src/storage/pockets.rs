//! Pocket repository (`pockets.json`)

use crate::error::FintrackResult;
use crate::models::{Pocket, PocketId};

use super::table::{Record, Table};

impl Record for Pocket {
    type Id = PocketId;

    fn id(&self) -> PocketId {
        self.id
    }
}

pub type PocketRepository = Table<Pocket>;

impl Table<Pocket> {
    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> FintrackResult<Option<Pocket>> {
        let wanted = name.trim().to_lowercase();
        self.find(|p| p.name.trim().to_lowercase() == wanted)
    }

    pub fn get_active(&self) -> FintrackResult<Vec<Pocket>> {
        self.filter(|p| p.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_by_name_ignores_case() {
        let dir = TempDir::new().unwrap();
        let repo = PocketRepository::new(dir.path().join("pockets.json"));
        let id = repo.next_id().unwrap();
        repo.upsert(Pocket::new(id, "Housing")).unwrap();

        assert!(repo.get_by_name("housing").unwrap().is_some());
        assert!(repo.get_by_name(" HOUSING ").unwrap().is_some());
        assert!(repo.get_by_name("Food").unwrap().is_none());
    }

    #[test]
    fn test_get_active() {
        let dir = TempDir::new().unwrap();
        let repo = PocketRepository::new(dir.path().join("pockets.json"));
        let mut old = Pocket::new(repo.next_id().unwrap(), "Old");
        old.set_active(false);
        repo.upsert(old).unwrap();
        repo.upsert(Pocket::new(repo.next_id().unwrap(), "Food")).unwrap();

        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Food");
    }
}
