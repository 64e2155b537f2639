//! Process-local repositories.
//!
//! Every handle created from the same [`InMemoryStore`] sees the same saved
//! tables, while staged changes stay private to the handle until `save`.

use std::sync::{
    Arc, Mutex, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tracing::debug;

use super::{CompensationRepository, EmployeeRepository, RepoError, RepoResult};
use crate::graph::{EmployeeArena, EmployeeRecord, assemble, decompose};
use crate::model::compensation::{Compensation, CompensationId};
use crate::model::employee::{Employee, EmployeeId};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    employees: Arc<RwLock<EmployeeArena>>,
    compensations: Arc<RwLock<Vec<Compensation>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee_repository(&self) -> InMemoryEmployeeRepository {
        InMemoryEmployeeRepository {
            store: self.clone(),
            staged: Mutex::new(Vec::new()),
        }
    }

    pub fn compensation_repository(&self) -> InMemoryCompensationRepository {
        InMemoryCompensationRepository {
            store: self.clone(),
            staged: Mutex::new(Vec::new()),
        }
    }

    /// While set, reads and saves fail with [`RepoError::Backend`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn employee_count(&self) -> RepoResult<usize> {
        Ok(self.employees.read().map_err(poisoned)?.len())
    }

    pub fn compensation_count(&self) -> RepoResult<usize> {
        Ok(self.compensations.read().map_err(poisoned)?.len())
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::backend("in-memory store unavailable"));
        }
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepoError {
    RepoError::backend("in-memory store lock poisoned")
}

enum StagedEmployee {
    Insert(Vec<EmployeeRecord>),
    Delete(EmployeeId),
}

pub struct InMemoryEmployeeRepository {
    store: InMemoryStore,
    staged: Mutex<Vec<StagedEmployee>>,
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn add(&self, employee: Employee) -> RepoResult<Employee> {
        let (employee, records) = decompose(employee);
        debug!(records = records.len(), "staging employee insert");
        self.staged
            .lock()
            .map_err(poisoned)?
            .push(StagedEmployee::Insert(records));
        Ok(employee)
    }

    async fn get_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        self.store.check_available()?;
        let table = self.store.employees.read().map_err(poisoned)?;
        Ok(assemble(id, &table))
    }

    async fn remove(&self, employee: &Employee) -> RepoResult<()> {
        let Some(id) = employee.id.clone() else {
            debug!("employee without id; nothing to remove");
            return Ok(());
        };
        self.staged
            .lock()
            .map_err(poisoned)?
            .push(StagedEmployee::Delete(id));
        Ok(())
    }

    async fn save(&self) -> RepoResult<()> {
        self.store.check_available()?;
        let staged = std::mem::take(&mut *self.staged.lock().map_err(poisoned)?);
        let mut table = self.store.employees.write().map_err(poisoned)?;
        let mut next = table.clone();
        for change in staged {
            match change {
                StagedEmployee::Insert(records) => {
                    for record in records {
                        if next.contains_key(&record.id) {
                            return Err(RepoError::DuplicateId {
                                entity: "employee",
                                id: record.id.into_inner(),
                            });
                        }
                        next.insert(record.id.clone(), record);
                    }
                }
                StagedEmployee::Delete(id) => {
                    if next.remove(&id).is_none() {
                        debug!(employee_id = %id, "removed employee was not stored");
                    }
                }
            }
        }
        *table = next;
        Ok(())
    }
}

enum StagedCompensation {
    Insert(Compensation),
    Delete(CompensationId),
}

pub struct InMemoryCompensationRepository {
    store: InMemoryStore,
    staged: Mutex<Vec<StagedCompensation>>,
}

#[async_trait]
impl CompensationRepository for InMemoryCompensationRepository {
    async fn add(&self, mut compensation: Compensation) -> RepoResult<Compensation> {
        compensation.id.get_or_insert_with(CompensationId::generate);
        self.staged
            .lock()
            .map_err(poisoned)?
            .push(StagedCompensation::Insert(compensation.clone()));
        Ok(compensation)
    }

    async fn get_by_employee_id(&self, id: &EmployeeId) -> RepoResult<Option<Compensation>> {
        self.store.check_available()?;
        let table = self.store.compensations.read().map_err(poisoned)?;
        Ok(table
            .iter()
            .find(|compensation| compensation.employee.id.as_ref() == Some(id))
            .cloned())
    }

    async fn remove(&self, compensation: &Compensation) -> RepoResult<()> {
        let Some(id) = compensation.id.clone() else {
            debug!("compensation without id; nothing to remove");
            return Ok(());
        };
        self.staged
            .lock()
            .map_err(poisoned)?
            .push(StagedCompensation::Delete(id));
        Ok(())
    }

    async fn save(&self) -> RepoResult<()> {
        self.store.check_available()?;
        let staged = std::mem::take(&mut *self.staged.lock().map_err(poisoned)?);
        let mut table = self.store.compensations.write().map_err(poisoned)?;
        let mut next = table.clone();
        for change in staged {
            match change {
                StagedCompensation::Insert(compensation) => {
                    if next.iter().any(|existing| existing.id == compensation.id) {
                        return Err(RepoError::DuplicateId {
                            entity: "compensation",
                            id: compensation.id.map(CompensationId::into_inner).unwrap_or_default(),
                        });
                    }
                    next.push(compensation);
                }
                StagedCompensation::Delete(id) => {
                    next.retain(|existing| existing.id.as_ref() != Some(&id));
                }
            }
        }
        *table = next;
        Ok(())
    }
}
