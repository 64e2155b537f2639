use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use super::employee::Employee;

string_id!(
    /// Store-assigned compensation identifier.
    CompensationId
);

/// Salary entry for exactly one employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    #[serde(rename = "compensationId", default)]
    pub id: Option<CompensationId>,
    pub employee: Employee,
    pub salary: f64,
    #[serde(default, deserialize_with = "deserialize_date_time")]
    pub effective_date: Option<DateTime<Utc>>,
}

impl Compensation {
    pub fn new(employee: Employee, salary: f64) -> Self {
        Self {
            id: None,
            employee,
            salary,
            effective_date: None,
        }
    }

    pub fn effective_on(mut self, date: DateTime<Utc>) -> Self {
        self.effective_date = Some(date);
        self
    }
}

/// Parses RFC 3339, or a date/time without offset taken as UTC, or a bare
/// date taken as UTC midnight.
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_date_time(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid date/time `{raw}`")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn effective(value: serde_json::Value) -> serde_json::Result<Option<DateTime<Utc>>> {
        let payload = json!({
            "employee": { "employeeId": "e1" },
            "salary": 1.0,
            "effectiveDate": value,
        });
        serde_json::from_value::<Compensation>(payload).map(|c| c.effective_date)
    }

    #[test]
    fn effective_date_accepts_offset_and_naive_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(effective(json!("2024-01-01T00:00:00Z")).unwrap(), Some(midnight));
        assert_eq!(effective(json!("2024-01-01T00:00:00")).unwrap(), Some(midnight));
        assert_eq!(effective(json!("2024-01-01")).unwrap(), Some(midnight));
        assert_eq!(
            effective(json!("2024-01-01T02:00:00+02:00")).unwrap(),
            Some(midnight)
        );
        assert_eq!(
            effective(json!("2024-03-01T09:30:15.250")).unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 15).unwrap() + chrono::Duration::milliseconds(250))
        );
    }

    #[test]
    fn effective_date_may_be_null_or_absent() {
        assert_eq!(effective(json!(null)).unwrap(), None);
        let absent: Compensation =
            serde_json::from_value(json!({ "employee": {}, "salary": 1.0 })).unwrap();
        assert_eq!(absent.effective_date, None);
    }

    #[test]
    fn effective_date_rejects_garbage() {
        assert!(effective(json!("next tuesday")).is_err());
    }

    #[test]
    fn effective_date_serializes_as_rfc3339() {
        let compensation = Compensation::new(Employee::stub("e1"), 1.0)
            .effective_on(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let value = serde_json::to_value(&compensation).unwrap();
        assert_eq!(value["effectiveDate"], "2024-01-01T00:00:00Z");
    }
}
