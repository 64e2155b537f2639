use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use entity::compensation;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{poisoned, store_err};
use crate::model::compensation::{Compensation, CompensationId};
use crate::model::employee::EmployeeId;
use crate::repo::{CompensationRepository, RepoError, RepoResult};

enum StagedCompensation {
    Insert {
        id: String,
        row: compensation::ActiveModel,
    },
    Delete(CompensationId),
}

/// Compensation repository over the `compensation` table.
///
/// The embedded employee is stored as a JSON snapshot next to its id.
pub struct SeaCompensationRepository {
    db: DatabaseConnection,
    staged: Mutex<Vec<StagedCompensation>>,
}

impl SeaCompensationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn stage(&self, change: StagedCompensation) -> RepoResult<()> {
        self.staged.lock().map_err(poisoned)?.push(change);
        Ok(())
    }
}

fn to_active_model(compensation: &Compensation, id: &CompensationId) -> RepoResult<compensation::ActiveModel> {
    let now = Utc::now();
    Ok(compensation::ActiveModel {
        id: Set(id.as_str().to_owned()),
        employee_id: Set(compensation.employee.id.clone().map(EmployeeId::into_inner)),
        employee: Set(serde_json::to_value(&compensation.employee)?),
        salary: Set(compensation.salary),
        effective_date: Set(compensation.effective_date.unwrap_or(now).into()),
        created_at: Set(now.into()),
    })
}

fn from_model(row: compensation::Model) -> RepoResult<Compensation> {
    Ok(Compensation {
        id: Some(CompensationId::from(row.id)),
        employee: serde_json::from_value(row.employee)?,
        salary: row.salary,
        effective_date: Some(row.effective_date.with_timezone(&Utc)),
    })
}

#[async_trait]
impl CompensationRepository for SeaCompensationRepository {
    async fn add(&self, mut compensation: Compensation) -> RepoResult<Compensation> {
        let id = compensation.id.get_or_insert_with(CompensationId::generate).clone();
        let row = to_active_model(&compensation, &id)?;
        self.stage(StagedCompensation::Insert {
            id: id.into_inner(),
            row,
        })?;
        Ok(compensation)
    }

    async fn get_by_employee_id(&self, id: &EmployeeId) -> RepoResult<Option<Compensation>> {
        let row = compensation::Entity::find()
            .filter(compensation::Column::EmployeeId.eq(id.as_str()))
            .order_by_asc(compensation::Column::CreatedAt)
            .order_by_asc(compensation::Column::Id)
            .one(&self.db)
            .await
            .map_err(store_err)?;
        row.map(from_model).transpose()
    }

    async fn remove(&self, compensation: &Compensation) -> RepoResult<()> {
        match &compensation.id {
            Some(id) => self.stage(StagedCompensation::Delete(id.clone())),
            None => Ok(()),
        }
    }

    async fn save(&self) -> RepoResult<()> {
        let staged = std::mem::take(&mut *self.staged.lock().map_err(poisoned)?);
        if staged.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await.map_err(store_err)?;
        let changes = staged.len();
        for change in staged {
            match change {
                StagedCompensation::Insert { id, row } => {
                    let existing = compensation::Entity::find_by_id(id.as_str())
                        .one(&txn)
                        .await
                        .map_err(store_err)?;
                    if existing.is_some() {
                        return Err(RepoError::DuplicateId {
                            entity: "compensation",
                            id,
                        });
                    }
                    compensation::Entity::insert(row)
                        .exec_without_returning(&txn)
                        .await
                        .map_err(store_err)?;
                }
                StagedCompensation::Delete(id) => {
                    compensation::Entity::delete_by_id(id.as_str())
                        .exec(&txn)
                        .await
                        .map_err(store_err)?;
                }
            }
        }
        txn.commit().await.map_err(store_err)?;
        debug!(changes, "compensation changes saved");
        Ok(())
    }
}
