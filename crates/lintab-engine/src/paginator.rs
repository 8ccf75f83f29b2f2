//! Lazy, budget-aware cursor pagination over one table.
//!
//! Rows are pulled one at a time. A page is fetched only when the buffer is
//! empty, the previous page reported more, the row budget has room and the
//! host has not cancelled. Each request asks for `min(page size, remaining
//! budget)` nodes, so a limited query never over-fetches.

use std::collections::VecDeque;
use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use lintab_core::{CancelSignal, ListShape, QueryContext, RowBudget, TableDef};
use lintab_graphql::GraphqlExecutor;
use serde_json::Value;

use crate::comparator::FilterSet;
use crate::error::EngineError;
use crate::inclusion::SuppressFlags;
use crate::nested;
use crate::remote;

pub struct Paginator {
    executor: Arc<dyn GraphqlExecutor>,
    table: &'static TableDef,
    filter: FilterSet,
    flags: SuppressFlags,
    page_size: u32,
    budget: RowBudget,
    cancel: CancelSignal,
    cursor: Option<String>,
    buffer: VecDeque<Value>,
    has_more: bool,
    finished: bool,
    pages_fetched: u32,
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("table", &self.table.name)
            .field("page_size", &self.page_size)
            .field("budget", &self.budget)
            .field("cursor", &self.cursor)
            .field("buffered", &self.buffer.len())
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

impl Paginator {
    pub fn new(
        executor: Arc<dyn GraphqlExecutor>,
        table: &'static TableDef,
        filter: FilterSet,
        flags: SuppressFlags,
        page_size: u32,
    ) -> Self {
        Self {
            executor,
            table,
            filter,
            flags,
            page_size: page_size.max(1),
            budget: RowBudget::unlimited(),
            cancel: CancelSignal::new(),
            cursor: None,
            buffer: VecDeque::new(),
            has_more: true,
            finished: false,
            pages_fetched: 0,
        }
    }

    /// Plan filter and relation inclusion for `ctx` and start a scan.
    #[must_use]
    pub fn for_query(
        executor: Arc<dyn GraphqlExecutor>,
        table: &'static TableDef,
        ctx: &QueryContext,
        page_size: u32,
    ) -> Self {
        let filter = FilterSet::build(table, &ctx.predicates);
        let flags = SuppressFlags::plan(table, &ctx.projection);
        Self::new(executor, table, filter, flags, page_size)
            .with_budget(RowBudget::new(ctx.limit))
            .with_cancel(ctx.cancel.clone())
    }

    #[must_use]
    pub const fn with_budget(mut self, budget: RowBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Remote list requests issued so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Pull the next row, fetching a page when the buffer runs dry.
    ///
    /// Returns `Ok(None)` once the listing, the budget or the host's
    /// patience is exhausted. After an error the scan is over and later
    /// calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the first remote or nested-drain failure.
    pub async fn next_row(&mut self) -> Result<Option<Value>, EngineError> {
        if self.finished || self.budget.is_exhausted() || self.cancel.is_cancelled() {
            self.finish();
            return Ok(None);
        }

        // An empty page may still report more; keep walking the cursor.
        let node = loop {
            if let Some(node) = self.buffer.pop_front() {
                break node;
            }
            if !self.has_more || self.cancel.is_cancelled() {
                self.finish();
                return Ok(None);
            }
            if let Err(e) = self.fetch_page().await {
                self.finished = true;
                tracing::error!(table = self.table.name, error = %e, "api_error");
                return Err(e);
            }
        };

        match nested::drain(self.executor.as_ref(), self.table, node).await {
            Ok(row) => {
                self.budget.consume();
                Ok(Some(row))
            }
            Err(e) => {
                self.finished = true;
                tracing::error!(table = self.table.name, error = %e, "nested drain failed");
                Err(e)
            }
        }
    }

    async fn fetch_page(&mut self) -> Result<(), EngineError> {
        match self.table.list {
            ListShape::Paginated { .. } => {
                let first = self.budget.page_size(self.page_size);
                let page = remote::fetch_list_page(
                    self.executor.as_ref(),
                    self.table,
                    first,
                    self.cursor.as_deref(),
                    &self.filter,
                    &self.flags,
                )
                .await?;
                self.pages_fetched += 1;

                let end_cursor = page.page_info.end_cursor.filter(|c| !c.is_empty());
                // A page claiming more without a cursor would refetch itself forever.
                self.has_more = page.page_info.has_next_page && end_cursor.is_some();
                self.cursor = end_cursor;
                self.buffer.extend(page.nodes);
            }
            ListShape::Single { .. } => {
                let node =
                    remote::fetch_single(self.executor.as_ref(), self.table, &self.flags).await?;
                self.pages_fetched += 1;
                self.has_more = false;
                self.buffer.extend(node);
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            tracing::debug!(
                table = self.table.name,
                pages = self.pages_fetched,
                cancelled = self.cancel.is_cancelled(),
                "listing finished"
            );
        }
    }

    /// Turn the scan into a stream of rows that ends after the first error.
    pub fn into_stream(self) -> BoxStream<'static, Result<Value, EngineError>> {
        stream::try_unfold(self, |mut paginator| async move {
            let row = paginator.next_row().await?;
            Ok::<_, EngineError>(row.map(|row| (row, paginator)))
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeExecutor, page_of, paged};
    use futures_util::TryStreamExt;
    use lintab_core::{
        Column, ColumnType, FieldKind, FilterField, NestedCollection, Operator, Predicate,
        ProjectionSet, QualValue, Relation,
    };
    use lintab_graphql::ClientError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    static COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, ""),
        Column::new("title", ColumnType::String, ""),
        Column::new("priority", ColumnType::Double, ""),
        Column::new("assignee", ColumnType::Json, ""),
    ];

    static ISSUE: TableDef = TableDef {
        name: "issue",
        description: "",
        type_name: "Issue",
        list: ListShape::Paginated {
            field: "issues",
            filter_type: Some("IssueFilter"),
        },
        get_field: Some("issue"),
        columns: COLUMNS,
        filters: &[FilterField {
            column: "priority",
            path: &["priority"],
            kind: FieldKind::NullableNumber,
            operators: Operator::ALL,
        }],
        relations: &[Relation {
            field: "assignee",
            columns: &["assignee"],
            selection: "{ id name }",
        }],
        nested: None,
    };

    static ORG: TableDef = TableDef {
        name: "organization",
        description: "",
        type_name: "Organization",
        list: ListShape::Single {
            field: "organization",
        },
        get_field: None,
        columns: &[Column::new("id", ColumnType::String, "")],
        filters: &[],
        relations: &[],
        nested: None,
    };

    static LABEL: TableDef = TableDef {
        name: "issue_label",
        description: "",
        type_name: "IssueLabel",
        list: ListShape::Paginated {
            field: "issueLabels",
            filter_type: None,
        },
        get_field: Some("issueLabel"),
        columns: &[Column::new("id", ColumnType::String, "")],
        filters: &[],
        relations: &[],
        nested: Some(NestedCollection {
            field: "issues",
            column: "issue_ids",
            page_size: 1,
        }),
    };

    fn issues(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({ "id": format!("i{i}"), "title": format!("Issue {i}") }))
            .collect()
    }

    async fn collect(paginator: Paginator) -> Result<Vec<Value>, EngineError> {
        paginator.into_stream().try_collect().await
    }

    fn firsts(exec: &FakeExecutor) -> Vec<u64> {
        exec.requests()
            .iter()
            .map(|r| r.variables["first"].as_u64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn unlimited_scan_walks_every_page() {
        let exec = Arc::new(FakeExecutor::new(paged("issues", issues(5))));
        let rows = collect(Paginator::new(
            exec.clone(),
            &ISSUE,
            FilterSet::default(),
            SuppressFlags::default(),
            2,
        ))
        .await
        .unwrap();

        assert_eq!(rows, issues(5));
        assert_eq!(firsts(&exec), vec![2, 2, 2]);
        let afters: Vec<Value> = exec
            .requests()
            .iter()
            .map(|r| r.variables["after"].clone())
            .collect();
        assert_eq!(afters, vec![Value::Null, json!("2"), json!("4")]);
    }

    #[rstest]
    #[case::budget_within_first_page(Some(1), 2, vec![1])]
    #[case::budget_spans_pages(Some(3), 2, vec![2, 1])]
    #[case::budget_exactly_one_page(Some(2), 2, vec![2])]
    #[case::budget_larger_than_data(Some(10), 4, vec![4, 4])]
    #[tokio::test]
    async fn budget_bounds_requests(
        #[case] limit: Option<u64>,
        #[case] page_size: u32,
        #[case] expected_firsts: Vec<u64>,
    ) {
        let exec = Arc::new(FakeExecutor::new(paged("issues", issues(5))));
        let rows = collect(
            Paginator::new(
                exec.clone(),
                &ISSUE,
                FilterSet::default(),
                SuppressFlags::default(),
                page_size,
            )
            .with_budget(RowBudget::new(limit)),
        )
        .await
        .unwrap();

        let expected_rows = usize::try_from(limit.unwrap_or(5).min(5)).unwrap();
        assert_eq!(rows.len(), expected_rows);
        assert_eq!(firsts(&exec), expected_firsts);
    }

    #[tokio::test]
    async fn zero_budget_makes_no_requests() {
        let exec = Arc::new(FakeExecutor::new(paged("issues", issues(5))));
        let rows = collect(
            Paginator::new(
                exec.clone(),
                &ISSUE,
                FilterSet::default(),
                SuppressFlags::default(),
                2,
            )
            .with_budget(RowBudget::new(Some(0))),
        )
        .await
        .unwrap();
        assert!(rows.is_empty());
        assert_eq!(exec.total(), 0);
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_page() {
        let exec = Arc::new(FakeExecutor::new(paged("issues", issues(5))));
        let cancel = CancelSignal::new();
        let mut paginator = Paginator::new(
            exec.clone(),
            &ISSUE,
            FilterSet::default(),
            SuppressFlags::default(),
            2,
        )
        .with_cancel(cancel.clone());

        assert!(paginator.next_row().await.unwrap().is_some());
        cancel.cancel();
        assert!(paginator.next_row().await.unwrap().is_none());
        assert_eq!(exec.total(), 1);
        assert_eq!(paginator.pages_fetched(), 1);
    }

    #[tokio::test]
    async fn error_ends_the_stream() {
        let exec = Arc::new(FakeExecutor::new(|req| {
            if req.variables["after"].is_null() {
                Ok(json!({ "issues": page_of(&issues(4), &req.variables) }))
            } else {
                Err(ClientError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            }
        }));
        let mut paginator = Paginator::new(
            exec.clone(),
            &ISSUE,
            FilterSet::default(),
            SuppressFlags::default(),
            2,
        );

        assert!(paginator.next_row().await.unwrap().is_some());
        assert!(paginator.next_row().await.unwrap().is_some());
        assert!(matches!(
            paginator.next_row().await,
            Err(EngineError::Client(_))
        ));
        assert!(paginator.next_row().await.unwrap().is_none());
        assert_eq!(exec.total(), 2);
    }

    #[tokio::test]
    async fn next_page_without_cursor_stops() {
        let exec = Arc::new(FakeExecutor::new(|_| {
            Ok(json!({ "issues": {
                "nodes": [{ "id": "i1" }],
                "pageInfo": { "hasNextPage": true, "endCursor": "" },
            }}))
        }));
        let rows = collect(Paginator::new(
            exec.clone(),
            &ISSUE,
            FilterSet::default(),
            SuppressFlags::default(),
            2,
        ))
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(exec.total(), 1);
    }

    #[tokio::test]
    async fn empty_page_with_more_keeps_walking() {
        let exec = Arc::new(FakeExecutor::new(|req| {
            if req.variables["after"].is_null() {
                Ok(json!({ "issues": {
                    "nodes": [],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c1" },
                }}))
            } else {
                Ok(json!({ "issues": {
                    "nodes": [{ "id": "i1" }],
                    "pageInfo": { "hasNextPage": false, "endCursor": "c2" },
                }}))
            }
        }));
        let rows = collect(Paginator::new(
            exec.clone(),
            &ISSUE,
            FilterSet::default(),
            SuppressFlags::default(),
            2,
        ))
        .await
        .unwrap();
        assert_eq!(rows, vec![json!({ "id": "i1" })]);
        assert_eq!(exec.total(), 2);
    }

    #[tokio::test]
    async fn for_query_sends_filter_and_skip_flags() {
        let exec = Arc::new(FakeExecutor::new(paged("issues", issues(1))));
        let ctx = QueryContext::new(ProjectionSet::for_table(&ISSUE, ["id", "title"]).unwrap())
            .with_predicates(vec![Predicate::new(
                "priority",
                Operator::Lt,
                QualValue::Number(3.0),
            )]);
        let rows = collect(Paginator::for_query(exec.clone(), &ISSUE, &ctx, 50))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let request = &exec.requests()[0];
        assert_eq!(request.operation_name, "ListIssue");
        assert_eq!(request.variables["filter"], json!({ "priority": { "lt": 3.0 } }));
        assert_eq!(request.variables["skipAssignee"], true);
        assert_eq!(request.variables["first"], 50);
    }

    #[tokio::test]
    async fn single_object_table_yields_one_row() {
        let exec = Arc::new(FakeExecutor::new(|_| {
            Ok(json!({ "organization": { "id": "org-1" } }))
        }));
        let rows = collect(Paginator::new(
            exec.clone(),
            &ORG,
            FilterSet::default(),
            SuppressFlags::default(),
            50,
        ))
        .await
        .unwrap();
        assert_eq!(rows, vec![json!({ "id": "org-1" })]);
        assert_eq!(exec.requests()[0].operation_name, "ListOrganization");
    }

    #[tokio::test]
    async fn nested_collections_are_drained_per_row() {
        let nested_ids = vec![json!({ "id": "a" }), json!({ "id": "b" })];
        let exec = Arc::new(FakeExecutor::new(move |req| {
            if req.operation_name == "ListIssueLabel" {
                Ok(json!({ "issueLabels": {
                    "nodes": [{
                        "id": "l1",
                        "issues": page_of(&nested_ids, &json!({ "first": 1 })),
                    }],
                    "pageInfo": { "hasNextPage": false, "endCursor": "1" },
                }}))
            } else {
                Ok(json!({ "issueLabel": { "issues": page_of(&nested_ids, &req.variables) } }))
            }
        }));
        let rows = collect(Paginator::new(
            exec.clone(),
            &LABEL,
            FilterSet::default(),
            SuppressFlags::default(),
            10,
        ))
        .await
        .unwrap();

        assert_eq!(
            rows[0]["issues"]["nodes"],
            json!([{ "id": "a" }, { "id": "b" }])
        );
        assert_eq!(exec.count("ListIssueLabel"), 1);
        assert_eq!(exec.count("IssueLabelIssuesPage"), 1);
        assert_eq!(exec.requests()[0].variables["nestedFirst"], 1);
    }
}
