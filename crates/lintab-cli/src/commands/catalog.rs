//! Offline commands describing the table catalog.

use lintab_core::{Operator, TableDef};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TableSummary {
    name: &'static str,
    description: &'static str,
    get: bool,
}

#[derive(Debug, Serialize)]
struct ColumnSummary {
    name: &'static str,
    #[serde(rename = "type")]
    ty: String,
    filter: String,
    description: &'static str,
}

pub fn tables(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&table_summaries(), flags.format)
}

pub fn columns(name: &str, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = lintab_tables::table(name)?;
    output(&column_summaries(table), flags.format)
}

fn table_summaries() -> Vec<TableSummary> {
    lintab_tables::TABLES
        .iter()
        .map(|t| TableSummary {
            name: t.name,
            description: t.description,
            get: t.supports_get(),
        })
        .collect()
}

fn column_summaries(table: &TableDef) -> Vec<ColumnSummary> {
    table
        .columns()
        .map(|column| ColumnSummary {
            name: column.name,
            ty: column.ty.to_string(),
            filter: table.filter(column.name).map_or_else(String::new, |f| {
                f.operators
                    .iter()
                    .copied()
                    .map(Operator::symbol)
                    .collect::<Vec<_>>()
                    .join(" ")
            }),
            description: column.description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintab_tables::tables::{ISSUE, TEAM_MEMBERSHIP};
    use pretty_assertions::assert_eq;

    #[test]
    fn every_table_is_listed() {
        let summaries = table_summaries();
        assert_eq!(summaries.len(), lintab_tables::TABLES.len());
        let issue = summaries.iter().find(|s| s.name == "linear_issue").unwrap();
        assert!(issue.get);
        let membership = summaries
            .iter()
            .find(|s| s.name == "linear_team_membership")
            .unwrap();
        assert!(!membership.get);
    }

    #[test]
    fn columns_report_filter_operators() {
        let columns = column_summaries(&ISSUE);
        let title = columns.iter().find(|c| c.name == "title").unwrap();
        assert_eq!(title.filter, "=");
        let id = columns.iter().find(|c| c.name == "id").unwrap();
        assert_eq!(id.filter, "");
        let created = columns.iter().find(|c| c.name == "created_at").unwrap();
        assert_eq!(created.ty, "timestamp");
        assert_eq!(created.filter, "= > >= < <=");
        assert!(columns.iter().any(|c| c.name == "organization_id"));
    }

    #[test]
    fn unfiltered_table_has_no_operators() {
        assert!(column_summaries(&TEAM_MEMBERSHIP)
            .iter()
            .all(|c| c.filter.is_empty()));
    }
}
