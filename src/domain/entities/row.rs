use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub i64);

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId(value)
    }
}

impl From<RowId> for i64 {
    fn from(value: RowId) -> Self {
        value.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a sortable/displayable field on a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(name: impl Into<String>) -> Self {
        FieldKey(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldKey {
    fn from(value: &str) -> Self {
        FieldKey(value.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(value: String) -> Self {
        FieldKey(value)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dates travel as ISO `YYYY-MM-DD` text, so text ordering is calendar ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    fn baseline(&self) -> FieldValue {
        match self {
            FieldValue::Flag(_) => FieldValue::Flag(false),
            FieldValue::Number(_) => FieldValue::Number(0.0),
            FieldValue::Text(_) => FieldValue::Text(String::new()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

pub trait Row {
    fn id(&self) -> RowId;
    fn display_name(&self) -> &str;
    fn field(&self, key: &FieldKey) -> Option<FieldValue>;
}

/// Ordering key for one field value. Text is folded to lowercase once, when
/// the key is built. Kinds order `Flag < Number < Text`.
#[derive(Debug, Clone)]
pub enum SortKey {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn new(value: &FieldValue) -> Self {
        match value {
            FieldValue::Flag(flag) => SortKey::Flag(*flag),
            FieldValue::Number(number) => SortKey::Number(*number),
            FieldValue::Text(text) => SortKey::Text(text.to_lowercase()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Flag(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Flag(a), SortKey::Flag(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sort keys for one column of values.
///
/// A missing value takes the baseline (`0`, `""`, `false`) of the column's
/// first present value, so rows with gaps still sort and are never dropped.
pub fn column_keys(values: Vec<Option<FieldValue>>) -> Vec<SortKey> {
    let baseline = values
        .iter()
        .flatten()
        .next()
        .map(FieldValue::baseline)
        .unwrap_or(FieldValue::Number(0.0));
    values
        .iter()
        .map(|value| SortKey::new(value.as_ref().unwrap_or(&baseline)))
        .collect()
}
