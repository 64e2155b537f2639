use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use entity::{direct_report, employee};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use super::{poisoned, store_err};
use crate::graph::{EmployeeArena, EmployeeRecord, assemble, decompose};
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::{EmployeeRepository, RepoError, RepoResult};

enum StagedEmployee {
    Insert(Vec<EmployeeRecord>),
    Delete(EmployeeId),
}

/// Employee repository over the `employee` and `direct_report` tables.
///
/// Staged changes are applied in a single transaction on `save`.
pub struct SeaEmployeeRepository {
    db: DatabaseConnection,
    staged: Mutex<Vec<StagedEmployee>>,
}

impl SeaEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn stage(&self, change: StagedEmployee) -> RepoResult<()> {
        self.staged.lock().map_err(poisoned)?.push(change);
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for SeaEmployeeRepository {
    async fn add(&self, employee: Employee) -> RepoResult<Employee> {
        let (employee, records) = decompose(employee);
        self.stage(StagedEmployee::Insert(records))?;
        Ok(employee)
    }

    async fn get_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        let arena = load_arena(&self.db, id).await.map_err(store_err)?;
        Ok(assemble(id, &arena))
    }

    async fn remove(&self, employee: &Employee) -> RepoResult<()> {
        match &employee.id {
            Some(id) => self.stage(StagedEmployee::Delete(id.clone())),
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
                StagedEmployee::Insert(records) => {
                    for record in records {
                        insert_record(&txn, record).await?;
                    }
                }
                StagedEmployee::Delete(id) => delete_employee(&txn, &id).await?,
            }
        }
        txn.commit().await.map_err(store_err)?;
        debug!(changes, "employee changes saved");
        Ok(())
    }
}

async fn insert_record<C: ConnectionTrait>(db: &C, record: EmployeeRecord) -> RepoResult<()> {
    let EmployeeRecord {
        id,
        first_name,
        last_name,
        position,
        department,
        direct_reports,
    } = record;

    if employee::Entity::find_by_id(id.as_str())
        .one(db)
        .await
        .map_err(store_err)?
        .is_some()
    {
        return Err(RepoError::DuplicateId {
            entity: "employee",
            id: id.into_inner(),
        });
    }

    employee::Entity::insert(employee::ActiveModel {
        id: Set(id.as_str().to_owned()),
        first_name: Set(first_name),
        last_name: Set(last_name),
        position: Set(position),
        department: Set(department),
        reports_supplied: Set(direct_reports.is_some()),
    })
    .exec_without_returning(db)
    .await
    .map_err(store_err)?;

    let mut edges = Vec::new();
    for (ordinal, report_id) in direct_reports.unwrap_or_default().into_iter().enumerate() {
        let ordinal = i32::try_from(ordinal)
            .map_err(|_| RepoError::InvalidData(format!("too many direct reports for `{id}`")))?;
        edges.push(direct_report::ActiveModel {
            manager_id: Set(id.as_str().to_owned()),
            ordinal: Set(ordinal),
            report_id: Set(report_id.into_inner()),
        });
    }
    if !edges.is_empty() {
        direct_report::Entity::insert_many(edges)
            .exec_without_returning(db)
            .await
            .map_err(store_err)?;
    }
    Ok(())
}

/// Drops the row and its outgoing edges. Edges pointing at `id` stay.
async fn delete_employee<C: ConnectionTrait>(db: &C, id: &EmployeeId) -> RepoResult<()> {
    direct_report::Entity::delete_many()
        .filter(direct_report::Column::ManagerId.eq(id.as_str()))
        .exec(db)
        .await
        .map_err(store_err)?;
    let deleted = employee::Entity::delete_by_id(id.as_str())
        .exec(db)
        .await
        .map_err(store_err)?;
    if deleted.rows_affected == 0 {
        debug!(%id, "delete of missing employee ignored");
    }
    Ok(())
}

/// Loads every record reachable from `root`, one level per round trip.
async fn load_arena<C: ConnectionTrait>(db: &C, root: &EmployeeId) -> Result<EmployeeArena, DbErr> {
    let mut arena = EmployeeArena::new();
    let mut requested = HashSet::from([root.as_str().to_owned()]);
    let mut frontier = vec![root.as_str().to_owned()];

    while !frontier.is_empty() {
        let rows = employee::Entity::find()
            .filter(employee::Column::Id.is_in(frontier.clone()))
            .all(db)
            .await?;
        let edges = direct_report::Entity::find()
            .filter(direct_report::Column::ManagerId.is_in(frontier))
            .order_by_asc(direct_report::Column::ManagerId)
            .order_by_asc(direct_report::Column::Ordinal)
            .all(db)
            .await?;

        let mut reports_by_manager: HashMap<String, Vec<EmployeeId>> = HashMap::new();
        for edge in edges {
            reports_by_manager
                .entry(edge.manager_id)
                .or_default()
                .push(EmployeeId::from(edge.report_id));
        }

        frontier = Vec::new();
        for row in rows {
            let direct_reports = if row.reports_supplied {
                Some(reports_by_manager.remove(&row.id).unwrap_or_default())
            } else {
                None
            };
            for report_id in direct_reports.iter().flatten() {
                if requested.insert(report_id.as_str().to_owned()) {
                    frontier.push(report_id.as_str().to_owned());
                }
            }
            let id = EmployeeId::from(row.id);
            arena.insert(
                id.clone(),
                EmployeeRecord {
                    id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    position: row.position,
                    department: row.department,
                    direct_reports,
                },
            );
        }
    }
    Ok(arena)
}
