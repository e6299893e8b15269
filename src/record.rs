// Generic record trait for any listable, storable entity

use crate::view::SortDirection;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Core trait that any record held by a `RecordStore` must implement
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone + Send + Sync + 'static {
    /// The record minus its identifier, as produced by forms and importers
    type Draft;

    /// Unique identifier for this record
    fn id(&self) -> &RecordId;

    /// Build a complete record from a freshly generated id and a draft
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self
    where
        Self: Sized;

    /// Storage key for this record type (e.g., "estatery-properties")
    fn collection_name() -> &'static str
    where
        Self: Sized;

    /// Text fields matched by free-text search
    ///
    /// Defaults to the stringified identifier only.
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Owned(self.id().to_string())]
    }

    /// Fields that list filters can constrain
    /// Return empty HashMap if nothing is filterable
    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        HashMap::new()
    }

    /// Value used to order records by `field`
    ///
    /// Unknown fields yield the neutral value, so every record compares equal
    /// on them and the id tie-break decides.
    fn sort_value(&self, _field: &str) -> SortValue {
        SortValue::Number(0.0)
    }

    /// Direction applied when `field` is first selected as the sort key
    fn default_direction(_field: &str) -> SortDirection
    where
        Self: Sized,
    {
        SortDirection::Asc
    }
}

/// Record identifier: numeric ids come from the backend, text ids from local inserts
///
/// Two ids are equal when their string forms are equal, so `Num(6)` and
/// `Text("6")` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl RecordId {
    /// Compare against any displayable id without allocating for text ids
    pub fn matches(&self, other: &str) -> bool {
        match self {
            RecordId::Text(s) => s == other,
            RecordId::Num(n) => n.to_string() == other,
        }
    }

    fn key(&self) -> Cow<'_, str> {
        match self {
            RecordId::Text(s) => Cow::Borrowed(s),
            RecordId::Num(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Num(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// Value types that can be indexed for filtering
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl std::fmt::Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexValue::String(s) => write!(f, "{}", s),
            IndexValue::Int(i) => write!(f, "{}", i),
            IndexValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for IndexValue {
    fn from(s: &str) -> Self {
        IndexValue::String(s.to_string())
    }
}

/// Sort key extracted from a record
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    /// Milliseconds since epoch
    Timestamp(i64),
    Text(String),
}

impl SortValue {
    /// Total order over sort values; mixed variants order by variant
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Timestamp(a), SortValue::Timestamp(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Timestamp(_) => 1,
            SortValue::Text(_) => 2,
        }
    }
}

/// Parse a number out of a formatted string such as "₵350,000 / month"
///
/// Everything except digits and '.' is stripped, a second '.' ends the number,
/// and anything unparseable is 0.
pub fn parse_number(s: &str) -> f64 {
    let mut digits = String::with_capacity(s.len());
    let mut seen_dot = false;
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
            digits.push(c);
        }
    }

    match digits.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Parse a date-like string to milliseconds since epoch, 0 when unparseable
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD`.
pub fn parse_timestamp(s: Option<&str>) -> i64 {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc().timestamp_millis();
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestRecord {
        id: RecordId,
        name: String,
    }

    impl Record for TestRecord {
        type Draft = String;

        fn id(&self) -> &RecordId {
            &self.id
        }

        fn from_draft(id: RecordId, name: String) -> Self {
            Self { id, name }
        }

        fn collection_name() -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_record_trait_defaults() {
        let record = TestRecord::from_draft(RecordId::Num(7), "Test".to_string());

        assert_eq!(record.id().to_string(), "7");
        assert_eq!(TestRecord::collection_name(), "test");
        assert!(record.indexed_fields().is_empty());
        assert_eq!(record.search_fields(), vec![Cow::<str>::Owned("7".to_string())]);
        assert_eq!(record.sort_value("anything"), SortValue::Number(0.0));
        assert_eq!(TestRecord::default_direction("anything"), SortDirection::Asc);
    }

    #[test]
    fn test_record_id_mixed_equality() {
        assert_eq!(RecordId::Num(6), RecordId::from("6"));
        assert_ne!(RecordId::Num(6), RecordId::from("06"));
        assert!(RecordId::Num(23487).matches("23487"));
        assert!(RecordId::from("L-3421").matches("L-3421"));
    }

    #[test]
    fn test_record_id_serde_untagged() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[6, "03483"]"#).unwrap();
        assert_eq!(ids[0], RecordId::Num(6));
        assert!(matches!(&ids[1], RecordId::Text(s) if s == "03483"));
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[6,"03483"]"#);
    }

    #[test]
    fn test_index_value_display() {
        assert_eq!(IndexValue::String("test".to_string()).to_string(), "test");
        assert_eq!(IndexValue::Int(42).to_string(), "42");
        assert_eq!(IndexValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("575.00"), 575.0);
        assert_eq!(parse_number("₵350,000"), 350000.0);
        assert_eq!(parse_number("$1,200.50 / month"), 1200.5);
        assert_eq!(parse_number("1.2.3"), 1.2);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("n/a"), 0.0);
        assert_eq!(parse_number("."), 0.0);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp(Some("1970-01-01T00:00:01Z")), 1000);
        assert_eq!(parse_timestamp(Some("1970-01-02")), 86_400_000);
        assert_eq!(parse_timestamp(Some("1970-01-01T00:00:02")), 2000);
        assert_eq!(parse_timestamp(Some("not a date")), 0);
        assert_eq!(parse_timestamp(Some("")), 0);
        assert_eq!(parse_timestamp(None), 0);
    }

    #[test]
    fn test_sort_value_total_cmp() {
        let a = SortValue::Number(1.0);
        let b = SortValue::Number(2.0);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert_eq!(a.total_cmp(&a.clone()), Ordering::Equal);

        // Mixed variants still order deterministically
        let t = SortValue::Timestamp(0);
        assert_eq!(a.total_cmp(&t), Ordering::Less);
        assert_eq!(t.total_cmp(&a), Ordering::Greater);
    }
}
