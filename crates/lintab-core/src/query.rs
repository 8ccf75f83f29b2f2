//! Query request types handed from the host to the engine.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::schema::{ColumnType, Operator, TableDef};

/// One output row: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A predicate literal, already typed by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QualValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl QualValue {
    /// Parse a literal according to the column's output type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the literal does not parse as
    /// the column's type.
    pub fn parse(ty: ColumnType, raw: &str) -> Result<Self, CoreError> {
        match ty {
            ColumnType::String | ColumnType::Json => Ok(Self::Text(raw.to_string())),
            ColumnType::Double | ColumnType::Int => raw
                .trim()
                .parse::<f64>()
                .map(Self::Number)
                .map_err(|_| CoreError::Validation(format!("'{raw}' is not a number"))),
            ColumnType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(Self::Bool(true)),
                "false" | "f" | "0" => Ok(Self::Bool(false)),
                _ => Err(CoreError::Validation(format!("'{raw}' is not a boolean"))),
            },
            ColumnType::Timestamp => parse_timestamp(raw.trim()).map(Self::Timestamp),
        }
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("'{raw}' is not a timestamp or date")))
}

/// One client-requested constraint on a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub column: String,
    pub operator: Operator,
    pub value: QualValue,
}

impl Predicate {
    #[must_use]
    pub fn new(column: impl Into<String>, operator: Operator, value: QualValue) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
        }
    }

    /// Parse `column<op>value` against a table, typing the literal by column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for malformed expressions or
    /// literals, [`CoreError::UnknownColumn`] when the column does not exist.
    pub fn parse(table: &TableDef, expr: &str) -> Result<Self, CoreError> {
        let start = expr
            .find(['=', '<', '>'])
            .ok_or_else(|| CoreError::Validation(format!("no operator in '{expr}'")))?;
        let column = expr[..start].trim();
        let rest = &expr[start..];
        let op_len = if rest.starts_with(">=") || rest.starts_with("<=") {
            2
        } else {
            1
        };
        let operator = Operator::from_symbol(&rest[..op_len])
            .ok_or_else(|| CoreError::Validation(format!("bad operator in '{expr}'")))?;
        let raw = rest[op_len..].trim();

        if column.is_empty() {
            return Err(CoreError::Validation(format!("missing column in '{expr}'")));
        }
        let col = table.column(column).ok_or_else(|| CoreError::UnknownColumn {
            table: table.name.to_string(),
            column: column.to_string(),
        })?;
        let value = QualValue::parse(col.ty, raw)?;
        Ok(Self::new(column, operator, value))
    }

    /// Evaluate the predicate against a projected row value.
    ///
    /// `null` never matches. Strings compare lexically, timestamps by
    /// instant; JSON values compare by their compact text.
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        let ordering = match (&self.value, actual) {
            (_, Value::Null) => return false,
            (QualValue::Text(expected), Value::String(actual)) => actual.as_str().cmp(expected),
            (QualValue::Text(expected), actual) => actual.to_string().as_str().cmp(expected),
            (QualValue::Number(expected), Value::Number(actual)) => {
                match actual.as_f64().and_then(|a| a.partial_cmp(expected)) {
                    Some(ordering) => ordering,
                    None => return false,
                }
            }
            (QualValue::Bool(expected), Value::Bool(actual)) => actual.cmp(expected),
            (QualValue::Timestamp(expected), Value::String(actual)) => match parse_timestamp(actual) {
                Ok(ts) => ts.cmp(expected),
                Err(_) => return false,
            },
            _ => return false,
        };
        self.operator.accepts(ordering)
    }
}

/// The set of output columns requested by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSet(BTreeSet<String>);

impl ProjectionSet {
    /// Every column of the table, as for `SELECT *`.
    #[must_use]
    pub fn all(table: &TableDef) -> Self {
        Self(table.columns().map(|c| c.name.to_string()).collect())
    }

    /// Build a projection, rejecting columns the table does not have.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownColumn`] for the first unknown name.
    pub fn for_table<I, S>(table: &TableDef, columns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in columns {
            let name = name.as_ref().trim();
            if table.column(name).is_none() {
                return Err(CoreError::UnknownColumn {
                    table: table.name.to_string(),
                    column: name.to_string(),
                });
            }
            set.insert(name.to_string());
        }
        Ok(Self(set))
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ProjectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Host-owned cancellation flag, checked after every emitted row.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal(Arc<AtomicBool>);

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Optional upper bound on emitted rows, decremented as rows stream out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBudget {
    remaining: Option<u64>,
}

impl RowBudget {
    #[must_use]
    pub const fn new(limit: Option<u64>) -> Self {
        Self { remaining: limit }
    }

    #[must_use]
    pub const fn unlimited() -> Self {
        Self { remaining: None }
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Record one emitted row.
    pub const fn consume(&mut self) {
        if let Some(n) = self.remaining {
            self.remaining = Some(n.saturating_sub(1));
        }
    }

    /// `min(page_size, remaining)`, never below one.
    #[must_use]
    pub fn page_size(&self, page_size: u32) -> u32 {
        let clamped = match self.remaining {
            Some(n) => u64::from(page_size).min(n),
            None => u64::from(page_size),
        };
        u32::try_from(clamped).unwrap_or(page_size).max(1)
    }
}

/// Everything one list/get invocation carries from the host.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub projection: ProjectionSet,
    pub predicates: Vec<Predicate>,
    pub limit: Option<u64>,
    pub cancel: CancelSignal,
}

impl QueryContext {
    #[must_use]
    pub fn new(projection: ProjectionSet) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates = predicates;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ListShape};
    use pretty_assertions::assert_eq;

    static COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, "Identifier."),
        Column::new("created_at", ColumnType::Timestamp, "Created."),
        Column::new("priority", ColumnType::Double, "Priority."),
        Column::new("active", ColumnType::Bool, "Active."),
    ];

    static TABLE: TableDef = TableDef {
        name: "test_table",
        description: "Test",
        type_name: "Test",
        list: ListShape::Paginated {
            field: "tests",
            filter_type: None,
        },
        get_field: None,
        columns: COLUMNS,
        filters: &[],
        relations: &[],
        nested: None,
    };

    #[test]
    fn parse_range_predicate_with_date() {
        let p = Predicate::parse(&TABLE, "created_at >= 2024-03-01").unwrap();
        assert_eq!(p.column, "created_at");
        assert_eq!(p.operator, Operator::Gte);
        let expected = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(p.value, QualValue::Timestamp(expected));
    }

    #[test]
    fn parse_number_and_bool_predicates() {
        let p = Predicate::parse(&TABLE, "priority<2").unwrap();
        assert_eq!(p.operator, Operator::Lt);
        assert_eq!(p.value, QualValue::Number(2.0));

        let p = Predicate::parse(&TABLE, "active=false").unwrap();
        assert_eq!(p.operator, Operator::Eq);
        assert_eq!(p.value, QualValue::Bool(false));
    }

    #[test]
    fn predicates_evaluate_row_values() {
        use serde_json::json;

        let eq = Predicate::new("id", Operator::Eq, QualValue::Text("ENG-2".into()));
        assert!(eq.matches(&json!("ENG-2")));
        assert!(!eq.matches(&json!("ENG-3")));
        assert!(!eq.matches(&Value::Null));

        let lt = Predicate::parse(&TABLE, "priority<2").unwrap();
        assert!(lt.matches(&json!(1)));
        assert!(!lt.matches(&json!(2.0)));
        assert!(!lt.matches(&json!("1")));

        let after = Predicate::parse(&TABLE, "created_at>2024-03-01").unwrap();
        assert!(after.matches(&json!("2024-03-01T00:00:00.001Z")));
        assert!(!after.matches(&json!("2024-03-01T00:00:00.000Z")));
        assert!(!after.matches(&json!("not a date")));

        let active = Predicate::parse(&TABLE, "active=true").unwrap();
        assert!(active.matches(&json!(true)));
        assert!(!active.matches(&json!(false)));

        let labels = Predicate::new("labels", Operator::Eq, QualValue::Text(r#"["bug"]"#.into()));
        assert!(labels.matches(&json!(["bug"])));
    }

    #[test]
    fn parse_rejects_unknown_column_and_bad_literal() {
        assert!(matches!(
            Predicate::parse(&TABLE, "nope=1"),
            Err(CoreError::UnknownColumn { .. })
        ));
        assert!(matches!(
            Predicate::parse(&TABLE, "priority>high"),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            Predicate::parse(&TABLE, "priority"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn projection_rejects_unknown_columns() {
        let projection = ProjectionSet::for_table(&TABLE, ["id", "organization_id"]).unwrap();
        assert!(projection.contains("organization_id"));
        assert!(ProjectionSet::for_table(&TABLE, ["bogus"]).is_err());
        assert_eq!(ProjectionSet::all(&TABLE).iter().count(), 5);
    }

    #[test]
    fn row_budget_clamps_page_size() {
        let mut budget = RowBudget::new(Some(3));
        assert_eq!(budget.page_size(2), 2);
        budget.consume();
        budget.consume();
        assert_eq!(budget.page_size(2), 1);
        budget.consume();
        assert!(budget.is_exhausted());
        assert_eq!(RowBudget::unlimited().page_size(50), 50);
    }

    #[test]
    fn cancel_signal_is_shared_between_clones() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_cancelled());
        signal.cancel();
        assert!(clone.is_cancelled());
    }
}
