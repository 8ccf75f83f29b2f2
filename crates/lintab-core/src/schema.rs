//! Declarative table schema.
//!
//! Each remote entity kind is declared once as a static [`TableDef`]. The
//! engine derives remote documents, filter objects, inclusion flags and row
//! projections from the declaration, so adding a table never means adding a
//! paging loop.

use std::fmt;

use serde::Serialize;

/// Output column type as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Timestamp,
    Double,
    Int,
    Bool,
    Json,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::Double => "double",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// Semantic type of a filterable remote field.
///
/// Selects the remote comparator input type and how a predicate literal is
/// encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    NullableString,
    Id,
    Number,
    NullableNumber,
    Date,
    NullableDate,
    /// Calendar date without a time component (`YYYY-MM-DD` on the wire).
    NullableTimelessDate,
    Boolean,
    SourceType,
}

impl FieldKind {
    /// Name of the remote comparator input type.
    #[must_use]
    pub const fn comparator_type(self) -> &'static str {
        match self {
            Self::String => "StringComparator",
            Self::NullableString => "NullableStringComparator",
            Self::Id => "IDComparator",
            Self::Number => "NumberComparator",
            Self::NullableNumber => "NullableNumberComparator",
            Self::Date => "DateComparator",
            Self::NullableDate => "NullableDateComparator",
            Self::NullableTimelessDate => "NullableTimelessDateComparator",
            Self::Boolean => "BooleanComparator",
            Self::SourceType => "SourceTypeComparator",
        }
    }
}

/// Relational comparison operator accepted from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Operator {
    /// Every operator, for range-capable fields.
    pub const ALL: &'static [Self] = &[Self::Eq, Self::Gt, Self::Gte, Self::Lt, Self::Lte];

    /// Equality only, the default for string, id and boolean fields.
    pub const EQ_ONLY: &'static [Self] = &[Self::Eq];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Whether `actual.cmp(literal)` satisfies this operator.
    #[must_use]
    pub const fn accepts(self, ordering: std::cmp::Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Lte),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// The camelCase form of the column name on the remote node.
    Field,
    /// An explicit path into the remote node (`["creator", "id"]`).
    Path(&'static [&'static str]),
    /// Hydrated from the memoized organization id, not from the node.
    OrganizationId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub description: &'static str,
    pub source: ColumnSource,
}

impl Column {
    #[must_use]
    pub const fn new(name: &'static str, ty: ColumnType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            description,
            source: ColumnSource::Field,
        }
    }

    /// Read the value from `path` instead of the camelCased column name.
    #[must_use]
    pub const fn from_path(mut self, path: &'static [&'static str]) -> Self {
        self.source = ColumnSource::Path(path);
        self
    }
}

/// Common column present on every table.
pub static ORGANIZATION_ID: Column = Column {
    name: "organization_id",
    ty: ColumnType::String,
    description: "Unique identifier for the organization.",
    source: ColumnSource::OrganizationId,
};

/// A column the host may push predicates down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub column: &'static str,
    /// Path inside the remote filter object (`["creator", "id"]`).
    pub path: &'static [&'static str],
    pub kind: FieldKind,
    pub operators: &'static [Operator],
}

impl FilterField {
    /// Equality-only filter.
    #[must_use]
    pub const fn eq(column: &'static str, path: &'static [&'static str], kind: FieldKind) -> Self {
        Self {
            column,
            path,
            kind,
            operators: Operator::EQ_ONLY,
        }
    }

    /// Filter accepting every comparison operator.
    #[must_use]
    pub const fn range(
        column: &'static str,
        path: &'static [&'static str],
        kind: FieldKind,
    ) -> Self {
        Self {
            column,
            path,
            kind,
            operators: Operator::ALL,
        }
    }

    #[must_use]
    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }
}

/// An optional nested object that is only fetched when one of its columns
/// is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Remote field name (`snoozedBy`).
    pub field: &'static str,
    /// Output columns served by this relation.
    pub columns: &'static [&'static str],
    /// Sub-selection requested when the relation is fetched.
    pub selection: &'static str,
}

impl Relation {
    #[must_use]
    pub const fn new(
        field: &'static str,
        columns: &'static [&'static str],
        selection: &'static str,
    ) -> Self {
        Self {
            field,
            columns,
            selection,
        }
    }

    /// Name of the boolean document variable guarding this relation.
    #[must_use]
    pub fn skip_variable(&self) -> String {
        let mut chars = self.field.chars();
        chars.next().map_or_else(String::new, |first| {
            format!("skip{}{}", first.to_ascii_uppercase(), chars.as_str())
        })
    }
}

/// A paginated sub-collection embedded in each parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedCollection {
    /// Remote field on the parent (`issues`).
    pub field: &'static str,
    /// Output column exposing the drained nodes (`issue_ids`).
    pub column: &'static str,
    /// Page size for the embedded first page and every secondary page.
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// Cursor-paginated connection (`issues(first:, after:)`).
    Paginated {
        field: &'static str,
        /// Remote filter input type, `None` when the list takes no filter.
        filter_type: Option<&'static str>,
    },
    /// A single object with no pagination (`organization`).
    Single { field: &'static str },
}

/// Declaration of one remote entity kind exposed as a table.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Type name used for document operation names (`Issue`).
    pub type_name: &'static str,
    pub list: ListShape,
    /// Remote single-entity field, when get-by-id is supported.
    pub get_field: Option<&'static str>,
    pub columns: &'static [Column],
    pub filters: &'static [FilterField],
    pub relations: &'static [Relation],
    pub nested: Option<NestedCollection>,
}

impl TableDef {
    /// All columns, the common `organization_id` first.
    pub fn columns(&self) -> impl Iterator<Item = &'static Column> {
        let own: &'static [Column] = self.columns;
        std::iter::once(&ORGANIZATION_ID).chain(own.iter())
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns().find(|c| c.name == name)
    }

    #[must_use]
    pub fn filter(&self, column: &str) -> Option<&'static FilterField> {
        let filters: &'static [FilterField] = self.filters;
        filters.iter().find(|f| f.column == column)
    }

    /// The relation serving `column`, if the column is a nested object.
    #[must_use]
    pub fn relation_for(&self, column: &str) -> Option<&'static Relation> {
        let relations: &'static [Relation] = self.relations;
        relations.iter().find(|r| r.columns.contains(&column))
    }

    #[must_use]
    pub const fn supports_get(&self) -> bool {
        self.get_field.is_some()
    }
}

/// Convert a snake_case column name to the remote camelCase field name.
#[must_use]
pub fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
