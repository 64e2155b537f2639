//! Id-indexed storage form of the employee hierarchy.
//!
//! Stores never keep nested employees. Each employee is one
//! [`EmployeeRecord`] whose direct reports are an ordered list of ids, and the
//! nested [`Employee`] tree is rebuilt from an id-keyed arena on read.

use std::collections::HashMap;

use tracing::warn;

use crate::model::employee::{Employee, EmployeeId};

/// One employee row with its outgoing direct-report edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    /// `None` when no report list was supplied at all.
    pub direct_reports: Option<Vec<EmployeeId>>,
}

impl EmployeeRecord {
    fn from_fields(id: EmployeeId, employee: &Employee) -> Self {
        Self {
            id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            direct_reports: None,
        }
    }

    /// Employee carrying this record's fields and the given resolved reports.
    pub fn to_employee(&self, direct_reports: Option<Vec<Employee>>) -> Employee {
        Employee {
            id: Some(self.id.clone()),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            direct_reports,
        }
    }
}

/// Id-keyed set of records a tree is assembled from.
pub type EmployeeArena = HashMap<EmployeeId, EmployeeRecord>;

/// Flattens an employee graph for insertion.
///
/// The root gets a fresh id unless it already carries one. Direct reports
/// without an id are new employees: they get an id and a record of their own,
/// recursively. Reports that carry an id are linked by that id only.
///
/// Returns the input with every assigned id filled in, and the records to
/// insert with the root first.
pub fn decompose(mut employee: Employee) -> (Employee, Vec<EmployeeRecord>) {
    let mut records = Vec::new();
    collect(&mut employee, &mut records);
    (employee, records)
}

fn collect(employee: &mut Employee, records: &mut Vec<EmployeeRecord>) -> EmployeeId {
    let id = employee.id.get_or_insert_with(EmployeeId::generate).clone();
    let slot = records.len();
    records.push(EmployeeRecord::from_fields(id.clone(), employee));

    let edges = employee.direct_reports.as_mut().map(|reports| {
        reports
            .iter_mut()
            .map(|report| match report.id.clone() {
                Some(report_id) => report_id,
                None => collect(report, records),
            })
            .collect::<Vec<_>>()
    });
    records[slot].direct_reports = edges;
    id
}

/// Builds the resolved tree rooted at `id`.
///
/// Edges to ids missing from the arena are dropped. An id that reappears on
/// its own ancestor path is returned without its reports, which keeps a
/// cyclic hierarchy from recursing forever.
pub fn assemble(id: &EmployeeId, arena: &EmployeeArena) -> Option<Employee> {
    let mut path = Vec::new();
    resolve(id, arena, &mut path)
}

fn resolve(id: &EmployeeId, arena: &EmployeeArena, path: &mut Vec<EmployeeId>) -> Option<Employee> {
    let record = arena.get(id)?;
    path.push(id.clone());

    let direct_reports = record.direct_reports.as_ref().map(|report_ids| {
        let mut reports = Vec::with_capacity(report_ids.len());
        for report_id in report_ids {
            if path.contains(report_id) {
                warn!(employee_id = %report_id, "reporting cycle detected; reports left unresolved");
                if let Some(repeated) = arena.get(report_id) {
                    reports.push(repeated.to_employee(None));
                }
            } else if let Some(report) = resolve(report_id, arena, path) {
                reports.push(report);
            }
        }
        reports
    });

    path.pop();
    Some(record.to_employee(direct_reports))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_of(records: Vec<EmployeeRecord>) -> EmployeeArena {
        records.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    fn record(id: &str, reports: Option<Vec<&str>>) -> EmployeeRecord {
        EmployeeRecord {
            id: EmployeeId::from(id),
            first_name: Some(id.to_uppercase()),
            last_name: None,
            position: None,
            department: None,
            direct_reports: reports.map(|ids| ids.into_iter().map(EmployeeId::from).collect()),
        }
    }

    #[test]
    fn decompose_assigns_ids_to_new_nested_reports() {
        let van = Employee::new("Van", "Morrison", "Jr. Developer", "Engineering");
        let jerry = Employee::new("Jerry", "Garcia", "Jr. Developer", "Engineering");
        let stevie = Employee::new("Stevie", "Nicks", "Developer", "Engineering")
            .with_direct_reports(vec![van, jerry]);
        let neil = Employee::new("Neil", "Young", "Sr. Developer", "Engineering")
            .with_id("neil")
            .with_direct_reports(vec![stevie, Employee::stub("ringo")]);

        let (neil, records) = decompose(neil);

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id.as_str(), "neil");
        let stevie_id = neil.direct_reports.as_ref().unwrap()[0].id.clone().unwrap();
        assert_eq!(
            records[0].direct_reports,
            Some(vec![stevie_id.clone(), EmployeeId::from("ringo")])
        );
        assert_eq!(records[1].id, stevie_id);
        assert_eq!(records[1].direct_reports.as_ref().map(Vec::len), Some(2));
        assert!(records.iter().all(|r| r.id.as_str() != "ringo"));
    }

    #[test]
    fn decompose_keeps_absent_report_lists_absent() {
        let (_, records) = decompose(Employee::new("Paul", "McCartney", "Developer I", "Engineering"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].direct_reports, None);
        assert!(!records[0].id.is_empty());
    }

    #[test]
    fn assemble_resolves_in_edge_order() {
        let arena = arena_of(vec![
            record("john", Some(vec!["paul", "ringo"])),
            record("paul", None),
            record("ringo", Some(vec!["pete", "george"])),
            record("pete", None),
            record("george", Some(vec![])),
        ]);

        let john = assemble(&EmployeeId::from("john"), &arena).unwrap();
        let reports = john.direct_reports.unwrap();
        assert_eq!(reports[0].first_name.as_deref(), Some("PAUL"));
        assert_eq!(reports[0].direct_reports, None);
        let ringo_reports = reports[1].direct_reports.as_ref().unwrap();
        assert_eq!(ringo_reports[1].id, Some(EmployeeId::from("george")));
        assert_eq!(ringo_reports[1].direct_reports, Some(vec![]));
    }

    #[test]
    fn assemble_skips_dangling_edges() {
        let arena = arena_of(vec![record("lead", Some(vec!["gone", "here"])), record("here", None)]);
        let lead = assemble(&EmployeeId::from("lead"), &arena).unwrap();
        assert_eq!(lead.direct_reports.unwrap().len(), 1);
    }

    #[test]
    fn assemble_cuts_cycles() {
        let arena = arena_of(vec![record("a", Some(vec!["b"])), record("b", Some(vec!["a"]))]);
        let a = assemble(&EmployeeId::from("a"), &arena).unwrap();
        let b = &a.direct_reports.unwrap()[0];
        let repeated = &b.direct_reports.as_ref().unwrap()[0];
        assert_eq!(repeated.id, Some(EmployeeId::from("a")));
        assert_eq!(repeated.direct_reports, None);
    }

    #[test]
    fn assemble_unknown_root_is_none() {
        assert!(assemble(&EmployeeId::from("nobody"), &EmployeeArena::new()).is_none());
    }
}
