//! Salary repository (`income.json`)
//!
//! One salary record per month, keyed by the month.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Month, Salary};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    salaries: Vec<Salary>,
}

pub struct IncomeRepository {
    path: PathBuf,
    salaries: RwLock<BTreeMap<Month, Salary>>,
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            salaries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> FintrackResult<()> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut salaries = self
            .salaries
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        salaries.clear();
        for salary in file_data.salaries {
            salaries.insert(salary.month, salary);
        }
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let salaries = self
            .salaries
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = IncomeData {
            salaries: salaries.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get_for_month(&self, month: Month) -> FintrackResult<Option<Salary>> {
        let salaries = self
            .salaries
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(salaries.get(&month).cloned())
    }

    /// All recorded salaries, oldest month first
    pub fn get_all(&self) -> FintrackResult<Vec<Salary>> {
        let salaries = self
            .salaries
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(salaries.values().cloned().collect())
    }

    pub fn upsert(&self, salary: Salary) -> FintrackResult<()> {
        let mut salaries = self
            .salaries
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        salaries.insert(salary.month, salary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_one_salary_per_month() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("income.json");
        let month = Month::parse("2024-01").unwrap();

        let repo = IncomeRepository::new(path.clone());
        repo.upsert(Salary::new(month, Money::from_units(3_000_000))).unwrap();
        repo.upsert(Salary::new(month, Money::from_units(3_500_000))).unwrap();
        repo.save().unwrap();

        let reloaded = IncomeRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap().len(), 1);
        assert_eq!(
            reloaded.get_for_month(month).unwrap().unwrap().monthly_amount,
            Money::from_units(3_500_000)
        );
        assert!(reloaded.get_for_month(month.next()).unwrap().is_none());
    }
}
