use serde::{Deserialize, Serialize};

string_id!(
    /// Store-assigned employee identifier.
    EmployeeId
);

/// An employee as it crosses the service boundary.
///
/// `direct_reports` keeps the difference between "not supplied" (`None`) and
/// "explicitly nobody" (`Some(vec![])`). On input a direct report may be a
/// stub carrying only its id; on output it is resolved from the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "employeeId", default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub direct_reports: Option<Vec<Employee>>,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            position: Some(position.into()),
            department: Some(department.into()),
            direct_reports: None,
        }
    }

    /// Reference to an existing employee by id only.
    pub fn stub(id: impl Into<EmployeeId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<EmployeeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_direct_reports(mut self, reports: Vec<Employee>) -> Self {
        self.direct_reports = Some(reports);
        self
    }

    /// True when the direct-reports sequence is present and non-empty.
    pub fn has_direct_reports(&self) -> bool {
        self.direct_reports
            .as_ref()
            .is_some_and(|reports| !reports.is_empty())
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_and_employee_id() {
        let employee = Employee::new("John", "Lennon", "Development Manager", "Engineering")
            .with_id("16a596ae-edd3-4847-99fe-c4518e82c86f");
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            json!({
                "employeeId": "16a596ae-edd3-4847-99fe-c4518e82c86f",
                "firstName": "John",
                "lastName": "Lennon",
                "position": "Development Manager",
                "department": "Engineering",
                "directReports": null
            })
        );
    }

    #[test]
    fn absent_and_empty_direct_reports_stay_distinct() {
        let absent: Employee = serde_json::from_value(json!({ "firstName": "Neil" })).unwrap();
        let empty: Employee =
            serde_json::from_value(json!({ "firstName": "Neil", "directReports": [] })).unwrap();
        assert_eq!(absent.direct_reports, None);
        assert_eq!(empty.direct_reports, Some(vec![]));
        assert!(!absent.has_direct_reports());
        assert!(!empty.has_direct_reports());
    }

    #[test]
    fn stub_deserializes_from_id_only() {
        let stub: Employee = serde_json::from_value(json!({ "employeeId": "abc" })).unwrap();
        assert_eq!(stub, Employee::stub("abc"));
        assert_eq!(stub.full_name(), "");
    }
}
