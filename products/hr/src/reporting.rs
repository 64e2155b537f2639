//! Reporting-structure view over a resolved employee tree.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::model::employee::Employee;

/// Counts the reports under `root`.
///
/// Each direct report visited adds one. The walk is not a full subtree sum:
/// the first direct report that has reports of its own ends the iteration at
/// this level, and the count of that report's subtree is returned in place of
/// the running total. Reports listed after it, and their subtrees, are never
/// visited.
///
/// There is no cycle detection; the input is an owned tree, so a cycle can
/// only come from the store and is cut while the tree is resolved.
pub fn count_reports(root: &Employee) -> usize {
    let mut count = 0;
    for report in root.direct_reports.iter().flatten() {
        count += 1;
        if report.has_direct_reports() {
            return count_reports(report);
        }
    }
    count
}

/// Employee paired with its report count.
///
/// The count is not stored: every call to [`ReportingStructure::number_of_reports`]
/// (and every serialization) walks the current tree again.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportingStructure {
    pub employee: Employee,
}

impl ReportingStructure {
    pub fn new(employee: Employee) -> Self {
        Self { employee }
    }

    pub fn number_of_reports(&self) -> usize {
        count_reports(&self.employee)
    }
}

impl Serialize for ReportingStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReportingStructure", 2)?;
        state.serialize_field("employee", &self.employee)?;
        state.serialize_field("numberOfReports", &self.number_of_reports())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Employee {
        Employee::new(name, "Leaf", "Developer", "Engineering")
    }

    fn manager(name: &str, reports: Vec<Employee>) -> Employee {
        leaf(name).with_direct_reports(reports)
    }

    #[test]
    fn no_reports_counts_zero() {
        assert_eq!(count_reports(&leaf("solo")), 0);
        assert_eq!(count_reports(&manager("empty", vec![])), 0);
    }

    #[test]
    fn flat_reports_are_all_counted() {
        let root = manager("root", vec![leaf("a"), leaf("b")]);
        assert_eq!(count_reports(&root), 2);
    }

    #[test]
    fn recursion_replaces_the_running_count() {
        let root = manager("root", vec![manager("a", vec![leaf("c"), leaf("d")])]);
        assert_eq!(count_reports(&root), 2);
    }

    #[test]
    fn siblings_after_the_first_manager_are_skipped() {
        let root = manager(
            "root",
            vec![
                leaf("a"),
                manager("b", vec![leaf("d")]),
                manager("c", vec![leaf("e"), leaf("f"), leaf("g")]),
            ],
        );
        assert_eq!(count_reports(&root), 1);
    }

    #[test]
    fn empty_report_lists_do_not_trigger_recursion() {
        let root = manager("root", vec![manager("a", vec![]), leaf("b")]);
        assert_eq!(count_reports(&root), 2);
    }

    #[test]
    fn count_tracks_mutations_between_reads() {
        let mut structure = ReportingStructure::new(manager("root", vec![leaf("a")]));
        assert_eq!(structure.number_of_reports(), 1);
        if let Some(reports) = structure.employee.direct_reports.as_mut() {
            reports.push(leaf("b"));
        }
        assert_eq!(structure.number_of_reports(), 2);
    }

    #[test]
    fn serializes_number_of_reports() {
        let structure = ReportingStructure::new(manager("root", vec![leaf("a"), leaf("b")]));
        let value = serde_json::to_value(&structure).unwrap();
        assert_eq!(value["numberOfReports"], 2);
        assert_eq!(value["employee"]["firstName"], "root");
    }
}
