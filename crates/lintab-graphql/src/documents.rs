//! Query documents rendered from table declarations.
//!
//! Every table shares the same document shapes; only the selected fields,
//! the filter input type and the relation guards differ. Optional relations
//! are selected with `@skip(if: $skip<Field>)` so the suppress flags computed
//! by the inclusion planner travel as plain boolean variables.

use lintab_core::{ListShape, TableDef, camel_case};

/// Fetches only the organization's id, for the common `organization_id` column.
pub const ORGANIZATION_ID_DOCUMENT: &str = "query OrganizationId { organization { id } }";

/// Variable carrying the embedded nested-collection page size.
pub const NESTED_FIRST_VARIABLE: &str = "nestedFirst";

const PAGE_INFO: &str = "pageInfo { hasNextPage endCursor }";

/// Operation name of the list document for `table`.
#[must_use]
pub fn list_operation(table: &TableDef) -> String {
    format!("List{}", table.type_name)
}

/// Operation name of the get-by-id document for `table`.
#[must_use]
pub fn get_operation(table: &TableDef) -> String {
    format!("Get{}", table.type_name)
}

/// Operation name of the nested-collection page document for `table`.
#[must_use]
pub fn nested_operation(table: &TableDef) -> String {
    let field = table.nested.map_or("", |n| n.field);
    format!("{}{}Page", table.type_name, upper_first(field))
}

/// Fields selected on every node of `table`.
///
/// Scalar columns are selected by name, relations behind their skip guard,
/// and the nested collection with its first page of ids.
#[must_use]
pub fn node_selection(table: &TableDef) -> String {
    let mut fields: Vec<String> = Vec::new();
    let mut push = |field: String| {
        if !fields.contains(&field) {
            fields.push(field);
        }
    };

    // `id` is always needed: nested drains and get-by-id key on it.
    push("id".to_string());

    for column in table.columns {
        if table.relation_for(column.name).is_some()
            || table.nested.is_some_and(|n| n.column == column.name)
        {
            continue;
        }
        match column.source {
            lintab_core::ColumnSource::Field => push(camel_case(column.name)),
            lintab_core::ColumnSource::Path([single]) => push((*single).to_string()),
            _ => {}
        }
    }

    for relation in table.relations {
        push(format!(
            "{} @skip(if: ${}) {}",
            relation.field,
            relation.skip_variable(),
            relation.selection
        ));
    }

    if let Some(nested) = table.nested {
        push(format!(
            "{}(first: ${NESTED_FIRST_VARIABLE}, includeArchived: true) {{ nodes {{ id }} {PAGE_INFO} }}",
            nested.field
        ));
    }

    fields.join(" ")
}

/// Variable declarations shared by every document that selects nodes.
fn node_variable_decls(table: &TableDef) -> Vec<String> {
    let mut decls: Vec<String> = table
        .relations
        .iter()
        .map(|r| format!("${}: Boolean!", r.skip_variable()))
        .collect();
    if table.nested.is_some() {
        decls.push(format!("${NESTED_FIRST_VARIABLE}: Int!"));
    }
    decls
}

fn render_decls(decls: &[String]) -> String {
    if decls.is_empty() {
        String::new()
    } else {
        format!("({})", decls.join(", "))
    }
}

/// Paginated list document, or `None` for single-object tables.
#[must_use]
pub fn list_document(table: &TableDef) -> Option<String> {
    let ListShape::Paginated { field, filter_type } = table.list else {
        return None;
    };

    let mut decls = vec!["$first: Int!".to_string(), "$after: String".to_string()];
    let mut args = vec!["first: $first", "after: $after"];
    if let Some(filter_type) = filter_type {
        decls.push(format!("$filter: {filter_type}"));
        args.push("filter: $filter");
    }
    args.push("includeArchived: true");
    decls.extend(node_variable_decls(table));

    Some(format!(
        "query {}{} {{ {}({}) {{ nodes {{ {} }} {PAGE_INFO} }} }}",
        list_operation(table),
        render_decls(&decls),
        field,
        args.join(", "),
        node_selection(table),
    ))
}

/// Document for a single-object table such as the organization.
#[must_use]
pub fn single_document(table: &TableDef) -> Option<String> {
    let ListShape::Single { field } = table.list else {
        return None;
    };
    Some(format!(
        "query {}{} {{ {} {{ {} }} }}",
        list_operation(table),
        render_decls(&node_variable_decls(table)),
        field,
        node_selection(table),
    ))
}

/// Get-by-id document, or `None` when the table has no get form.
#[must_use]
pub fn get_document(table: &TableDef) -> Option<String> {
    let field = table.get_field?;
    let mut decls = vec!["$id: String!".to_string()];
    decls.extend(node_variable_decls(table));
    Some(format!(
        "query {}{} {{ {}(id: $id) {{ {} }} }}",
        get_operation(table),
        render_decls(&decls),
        field,
        node_selection(table),
    ))
}

/// Secondary page of a parent's nested collection, ids only.
#[must_use]
pub fn nested_page_document(table: &TableDef) -> Option<String> {
    let nested = table.nested?;
    let parent = table.get_field?;
    Some(format!(
        "query {}($id: String!, $first: Int!, $after: String) {{ {}(id: $id) {{ {}(first: $first, after: $after, includeArchived: true) {{ nodes {{ id }} {PAGE_INFO} }} }} }}",
        nested_operation(table),
        parent,
        nested.field,
    ))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintab_core::{Column, ColumnType, NestedCollection, Relation};
    use pretty_assertions::assert_eq;

    static LABEL_COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, ""),
        Column::new("name", ColumnType::String, ""),
        Column::new("created_at", ColumnType::Timestamp, ""),
        Column::new("team", ColumnType::Json, ""),
        Column::new("issue_ids", ColumnType::Json, "").from_path(&["issues", "nodes"]),
        Column::new("title", ColumnType::String, "").from_path(&["name"]),
    ];

    static LABEL_RELATIONS: &[Relation] = &[Relation {
        field: "team",
        columns: &["team"],
        selection: "{ id key }",
    }];

    static LABEL: TableDef = TableDef {
        name: "label",
        description: "",
        type_name: "IssueLabel",
        list: ListShape::Paginated {
            field: "issueLabels",
            filter_type: Some("IssueLabelFilter"),
        },
        get_field: Some("issueLabel"),
        columns: LABEL_COLUMNS,
        filters: &[],
        relations: LABEL_RELATIONS,
        nested: Some(NestedCollection {
            field: "issues",
            column: "issue_ids",
            page_size: 50,
        }),
    };

    static MEMBERSHIP_COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, ""),
        Column::new("owner", ColumnType::Bool, ""),
    ];

    static MEMBERSHIP: TableDef = TableDef {
        name: "membership",
        description: "",
        type_name: "TeamMembership",
        list: ListShape::Paginated {
            field: "teamMemberships",
            filter_type: None,
        },
        get_field: None,
        columns: MEMBERSHIP_COLUMNS,
        filters: &[],
        relations: &[],
        nested: None,
    };

    static ORG: TableDef = TableDef {
        name: "org",
        description: "",
        type_name: "Organization",
        list: ListShape::Single {
            field: "organization",
        },
        get_field: None,
        columns: MEMBERSHIP_COLUMNS,
        filters: &[],
        relations: &[],
        nested: None,
    };

    #[test]
    fn selection_dedupes_and_guards_relations() {
        assert_eq!(
            node_selection(&LABEL),
            "id name createdAt team @skip(if: $skipTeam) { id key } \
             issues(first: $nestedFirst, includeArchived: true) { nodes { id } pageInfo { hasNextPage endCursor } }"
        );
    }

    #[test]
    fn list_document_with_filter_and_guards() {
        let doc = list_document(&LABEL).unwrap();
        assert!(doc.starts_with(
            "query ListIssueLabel($first: Int!, $after: String, $filter: IssueLabelFilter, $skipTeam: Boolean!, $nestedFirst: Int!) {"
        ));
        assert!(doc.contains("issueLabels(first: $first, after: $after, filter: $filter, includeArchived: true)"));
        assert!(doc.ends_with("pageInfo { hasNextPage endCursor } } }"));
    }

    #[test]
    fn list_document_without_filter() {
        let doc = list_document(&MEMBERSHIP).unwrap();
        assert_eq!(
            doc,
            "query ListTeamMembership($first: Int!, $after: String) { \
             teamMemberships(first: $first, after: $after, includeArchived: true) { \
             nodes { id owner } pageInfo { hasNextPage endCursor } } }"
        );
        assert!(get_document(&MEMBERSHIP).is_none());
        assert!(single_document(&MEMBERSHIP).is_none());
    }

    #[test]
    fn get_and_nested_documents() {
        let get = get_document(&LABEL).unwrap();
        assert!(get.starts_with("query GetIssueLabel($id: String!, $skipTeam: Boolean!, $nestedFirst: Int!) { issueLabel(id: $id) {"));

        let nested = nested_page_document(&LABEL).unwrap();
        assert_eq!(
            nested,
            "query IssueLabelIssuesPage($id: String!, $first: Int!, $after: String) { \
             issueLabel(id: $id) { issues(first: $first, after: $after, includeArchived: true) { \
             nodes { id } pageInfo { hasNextPage endCursor } } } }"
        );
    }

    #[test]
    fn single_document_has_no_pagination() {
        assert_eq!(
            single_document(&ORG).unwrap(),
            "query ListOrganization { organization { id owner } }"
        );
        assert!(list_document(&ORG).is_none());
    }
}
