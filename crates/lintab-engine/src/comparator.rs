//! Translates host predicates into remote comparator filter objects.
//!
//! Each filterable column owns one comparator object with `eq`, `gt`, `gte`,
//! `lt` and `lte` slots. Predicates on the same column and operator overwrite
//! each other in arrival order. Operators outside the column's allowed set
//! and literals that do not encode for the field kind are dropped. Whatever
//! the filter does not enforce is reported by [`residual`] so the host can
//! evaluate it on the returned rows.

use chrono::SecondsFormat;
use lintab_core::{FieldKind, FilterField, Operator, Predicate, QualValue, TableDef};
use serde::Serialize;
use serde_json::{Map, Value};

/// One remote comparator input object. Unset slots are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparatorObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
}

impl ComparatorObject {
    /// Write `value` into the slot for `operator`, replacing any earlier value.
    pub fn set(&mut self, operator: Operator, value: Value) {
        let slot = match operator {
            Operator::Eq => &mut self.eq,
            Operator::Gt => &mut self.gt,
            Operator::Gte => &mut self.gte,
            Operator::Lt => &mut self.lt,
            Operator::Lte => &mut self.lte,
        };
        *slot = Some(value);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.eq.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
    }

    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// Encode a predicate literal the way the remote comparator for `kind` expects.
///
/// Returns `None` when the literal's type does not fit the field kind.
#[must_use]
pub fn encode(kind: FieldKind, value: &QualValue) -> Option<Value> {
    match (kind, value) {
        (
            FieldKind::String | FieldKind::NullableString | FieldKind::Id | FieldKind::SourceType,
            QualValue::Text(s),
        ) => Some(Value::String(s.clone())),
        (FieldKind::Number | FieldKind::NullableNumber, QualValue::Number(n)) => {
            serde_json::Number::from_f64(*n).map(Value::Number)
        }
        (FieldKind::Date | FieldKind::NullableDate, QualValue::Timestamp(ts)) => Some(
            Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ),
        (FieldKind::NullableTimelessDate, QualValue::Timestamp(ts)) => {
            Some(Value::String(ts.format("%Y-%m-%d").to_string()))
        }
        (FieldKind::Boolean, QualValue::Bool(b)) => Some(Value::Bool(*b)),
        _ => None,
    }
}

/// Build the comparator object for one filterable field.
///
/// Only predicates whose column matches `field.column` are considered.
pub fn build<'a>(
    field: &FilterField,
    predicates: impl IntoIterator<Item = &'a Predicate>,
) -> ComparatorObject {
    let mut comparator = ComparatorObject::default();
    for predicate in predicates {
        if predicate.column != field.column {
            continue;
        }
        if !field.allows(predicate.operator) {
            tracing::debug!(
                column = field.column,
                operator = %predicate.operator,
                "operator not supported remotely, left to host"
            );
            continue;
        }
        let Some(value) = encode(field.kind, &predicate.value) else {
            tracing::warn!(
                column = field.column,
                comparator = field.kind.comparator_type(),
                "predicate literal does not fit the remote comparator, left to host"
            );
            continue;
        };
        comparator.set(predicate.operator, value);
    }
    comparator
}

fn pushable(table: &TableDef, predicate: &Predicate) -> bool {
    table.filter(&predicate.column).is_some_and(|field| {
        field.allows(predicate.operator) && encode(field.kind, &predicate.value).is_some()
    })
}

/// Predicates the filter built by [`FilterSet::build`] does not enforce.
///
/// These are predicates on columns without a remote filter, with a
/// disallowed operator or an unencodable literal, and predicates replaced by
/// a later one on the same comparator slot.
#[must_use]
pub fn residual<'a>(table: &TableDef, predicates: &'a [Predicate]) -> Vec<&'a Predicate> {
    predicates
        .iter()
        .enumerate()
        .filter(|(index, predicate)| {
            let overwritten = predicates[index + 1..].iter().any(|later| {
                later.column == predicate.column
                    && later.operator == predicate.operator
                    && pushable(table, later)
            });
            overwritten || !pushable(table, predicate)
        })
        .map(|(_, predicate)| predicate)
        .collect()
}

/// The remote `filter` argument for one list request.
///
/// Fields appear only when at least one slot is set. Fields on related
/// entities nest under their path (`creator: { id: { eq: .. } }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(Map<String, Value>);

impl FilterSet {
    /// Build the filter set for `table` from every pushed-down predicate.
    #[must_use]
    pub fn build(table: &TableDef, predicates: &[Predicate]) -> Self {
        let mut set = Self::default();

        for predicate in predicates {
            if table.filter(&predicate.column).is_none() {
                tracing::debug!(
                    table = table.name,
                    column = %predicate.column,
                    "column is not filterable remotely"
                );
            }
        }

        for field in table.filters {
            let comparator = build(field, predicates);
            if !comparator.is_empty() {
                set.insert(field.path, comparator.to_value());
            }
        }
        set
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The filter as a GraphQL variable value, `null` when empty.
    #[must_use]
    pub fn to_variable(&self) -> Value {
        if self.0.is_empty() {
            Value::Null
        } else {
            Value::Object(self.0.clone())
        }
    }

    fn insert(&mut self, path: &[&str], value: Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut map = &mut self.0;
        for key in parents {
            let entry = map
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(next) = entry else {
                return;
            };
            map = next;
        }
        map.insert((*last).to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lintab_core::{Column, ColumnType, ListShape};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    static COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, ""),
        Column::new("created_at", ColumnType::Timestamp, ""),
        Column::new("priority", ColumnType::Double, ""),
        Column::new("due_date", ColumnType::Timestamp, ""),
        Column::new("creator_id", ColumnType::String, ""),
        Column::new("title", ColumnType::String, ""),
    ];

    static FILTERS: &[FilterField] = &[
        FilterField {
            column: "id",
            path: &["id"],
            kind: FieldKind::Id,
            operators: Operator::EQ_ONLY,
        },
        FilterField {
            column: "created_at",
            path: &["createdAt"],
            kind: FieldKind::Date,
            operators: Operator::ALL,
        },
        FilterField {
            column: "priority",
            path: &["priority"],
            kind: FieldKind::NullableNumber,
            operators: Operator::ALL,
        },
        FilterField {
            column: "due_date",
            path: &["dueDate"],
            kind: FieldKind::NullableTimelessDate,
            operators: Operator::ALL,
        },
        FilterField {
            column: "creator_id",
            path: &["creator", "id"],
            kind: FieldKind::Id,
            operators: Operator::EQ_ONLY,
        },
    ];

    static TABLE: TableDef = TableDef {
        name: "thing",
        description: "",
        type_name: "Thing",
        list: ListShape::Paginated {
            field: "things",
            filter_type: Some("ThingFilter"),
        },
        get_field: Some("thing"),
        columns: COLUMNS,
        filters: FILTERS,
        relations: &[],
        nested: None,
    };

    fn ts(y: i32, m: u32, d: u32) -> QualValue {
        QualValue::Timestamp(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    #[test]
    fn range_predicates_fill_slots() {
        let preds = vec![
            Predicate::new("created_at", Operator::Gte, ts(2024, 1, 1)),
            Predicate::new("created_at", Operator::Lt, ts(2024, 2, 1)),
        ];
        let comparator = build(&FILTERS[1], &preds);
        assert_eq!(
            serde_json::to_value(&comparator).unwrap(),
            json!({
                "gte": "2024-01-01T00:00:00.000Z",
                "lt": "2024-02-01T00:00:00.000Z",
            })
        );
    }

    #[test]
    fn later_predicate_wins_same_slot() {
        let preds = vec![
            Predicate::new("priority", Operator::Eq, QualValue::Number(1.0)),
            Predicate::new("priority", Operator::Eq, QualValue::Number(3.0)),
        ];
        let comparator = build(&FILTERS[2], &preds);
        assert_eq!(comparator.eq, Some(json!(3.0)));
        assert!(comparator.gt.is_none());
    }

    #[rstest]
    #[case(Operator::Gt)]
    #[case(Operator::Gte)]
    #[case(Operator::Lt)]
    #[case(Operator::Lte)]
    fn eq_only_field_ignores_range_operators(#[case] op: Operator) {
        let preds = vec![Predicate::new("id", op, QualValue::Text("abc".into()))];
        assert!(build(&FILTERS[0], &preds).is_empty());
    }

    #[test]
    fn timeless_date_drops_time_component() {
        let value = encode(FieldKind::NullableTimelessDate, &ts(2024, 3, 9));
        assert_eq!(value, Some(json!("2024-03-09")));
    }

    #[rstest]
    #[case(FieldKind::Number, QualValue::Text("x".into()))]
    #[case(FieldKind::Boolean, QualValue::Number(1.0))]
    #[case(FieldKind::Date, QualValue::Text("2024-01-01".into()))]
    #[case(FieldKind::Id, QualValue::Bool(true))]
    fn mismatched_literal_is_not_encoded(#[case] kind: FieldKind, #[case] value: QualValue) {
        assert_eq!(encode(kind, &value), None);
    }

    #[test]
    fn filter_set_omits_empty_fields_and_nests_paths() {
        let preds = vec![
            Predicate::new("creator_id", Operator::Eq, QualValue::Text("u1".into())),
            Predicate::new("id", Operator::Gt, QualValue::Text("ignored".into())),
            Predicate::new("title", Operator::Eq, QualValue::Text("not filterable".into())),
            Predicate::new("priority", Operator::Lte, QualValue::Number(2.0)),
        ];
        let set = FilterSet::build(&TABLE, &preds);
        assert_eq!(
            set.to_variable(),
            json!({
                "priority": { "lte": 2.0 },
                "creator": { "id": { "eq": "u1" } },
            })
        );
    }

    #[test]
    fn residual_reports_unenforced_predicates() {
        let preds = vec![
            Predicate::new("creator_id", Operator::Eq, QualValue::Text("u1".into())),
            Predicate::new("id", Operator::Gt, QualValue::Text("range on eq-only".into())),
            Predicate::new("title", Operator::Eq, QualValue::Text("not filterable".into())),
            Predicate::new("priority", Operator::Eq, QualValue::Text("not a number".into())),
            Predicate::new("created_at", Operator::Gt, ts(2024, 1, 1)),
        ];
        let left: Vec<&str> = residual(&TABLE, &preds)
            .iter()
            .map(|p| p.column.as_str())
            .collect();
        assert_eq!(left, vec!["id", "title", "priority"]);
    }

    #[test]
    fn overwritten_slot_is_residual() {
        let preds = vec![
            Predicate::new("priority", Operator::Eq, QualValue::Number(1.0)),
            Predicate::new("priority", Operator::Eq, QualValue::Number(3.0)),
        ];
        assert_eq!(residual(&TABLE, &preds), vec![&preds[0]]);
        assert!(residual(&TABLE, &preds[1..]).is_empty());
    }

    #[test]
    fn no_predicates_means_null_filter() {
        let set = FilterSet::build(&TABLE, &[]);
        assert!(set.is_empty());
        assert_eq!(set.to_variable(), Value::Null);
    }
}
