//! `list` and `get`: the commands that talk to the remote API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use futures_util::{Stream, TryStreamExt};
use lintab_config::LintabConfig;
use lintab_core::{CancelSignal, Predicate, ProjectionSet, QueryContext, Row, TableDef};
use lintab_engine::{ConnectionProvider, EngineError};
use lintab_graphql::{GraphqlExecutor, LinearClient};
use lintab_tables::TableService;

use crate::cli::{GetArgs, GlobalFlags, ListArgs, OutputFormat};
use crate::host::{RetryConfig, RetryingExecutor, ignore_not_found};
use crate::output::{self, render_rows, row_line};
use crate::progress::Progress;

pub async fn list(args: &ListArgs, flags: &GlobalFlags, config: &LintabConfig) -> anyhow::Result<()> {
    let table = lintab_tables::table(&args.table)?;
    let (ctx, check, columns) = plan_list(table, args)?;

    let cancel = CancelSignal::new();
    let ctx = ctx.with_cancel(cancel.clone());

    let service = connect(config).await?;
    let interrupt = cancel_on_ctrl_c(cancel);
    let progress = Progress::spinner(&format!("scanning {}", table.name));

    let mut rows = Vec::new();
    let streamed = collect_rows(service.list(table, &ctx), &check, |row| {
        progress.inc(1);
        if flags.format == OutputFormat::Raw {
            println!("{}", row_line(&row)?);
        } else {
            rows.push(row);
        }
        Ok(())
    })
    .await;
    interrupt.abort();

    let count = match streamed {
        Ok(count) => count,
        Err(error) => {
            progress.finish_err("scan failed");
            return Err(error.context(format!("failed to list {}", table.name)));
        }
    };
    progress.finish_clear();
    tracing::debug!(table = table.name, rows = count, "list complete");

    if flags.format != OutputFormat::Raw {
        println!("{}", render_rows(&rows, &columns, flags.format)?);
    }
    Ok(())
}

/// Host-side half of a list: predicates the remote filter does not enforce.
#[derive(Debug, Default)]
struct HostCheck {
    predicates: Vec<Predicate>,
    /// Row limit, held back from the remote scan while `predicates` is non-empty.
    limit: Option<u64>,
    /// Columns fetched only to evaluate `predicates`.
    hidden: Vec<&'static str>,
}

impl HostCheck {
    fn accepts(&self, row: &Row) -> bool {
        self.predicates
            .iter()
            .all(|p| row.get(&p.column).is_some_and(|value| p.matches(value)))
    }

    fn strip(&self, row: &mut Row) {
        for column in &self.hidden {
            row.remove(*column);
        }
    }

    fn is_full(&self, count: u64) -> bool {
        self.limit.is_some_and(|limit| count >= limit)
    }
}

/// Split a list request into the remote query, the host check and the
/// output column order.
///
/// The limit is pushed down only when every predicate is.
fn plan_list(
    table: &'static TableDef,
    args: &ListArgs,
) -> anyhow::Result<(QueryContext, HostCheck, Vec<&'static str>)> {
    let (_, columns) = selected_columns(table, &args.columns)?;
    let predicates = args
        .predicates
        .iter()
        .map(|expr| Predicate::parse(table, expr))
        .collect::<Result<Vec<_>, _>>()?;

    let residual: Vec<Predicate> = lintab_engine::residual(table, &predicates)
        .into_iter()
        .cloned()
        .collect();
    let mut hidden: Vec<&'static str> = Vec::new();
    for predicate in &residual {
        if let Some(column) = table.column(&predicate.column) {
            if !columns.contains(&column.name) && !hidden.contains(&column.name) {
                hidden.push(column.name);
            }
        }
    }
    let projection = ProjectionSet::for_table(table, columns.iter().chain(&hidden))?;

    let (remote_limit, host_limit) = if residual.is_empty() {
        (args.limit, None)
    } else {
        tracing::info!(
            table = table.name,
            predicates = residual.len(),
            "evaluating predicates locally"
        );
        (None, args.limit)
    };

    let ctx = QueryContext::new(projection)
        .with_predicates(predicates)
        .with_limit(remote_limit);
    let check = HostCheck {
        predicates: residual,
        limit: host_limit,
        hidden,
    };
    Ok((ctx, check, columns))
}

pub async fn get(args: &GetArgs, flags: &GlobalFlags, config: &LintabConfig) -> anyhow::Result<()> {
    let table = lintab_tables::table(&args.table)?;
    let (projection, columns) = selected_columns(table, &args.columns)?;

    let service = connect(config).await?;
    let row = ignore_not_found(service.get(table, &args.id, &projection).await)
        .with_context(|| format!("failed to get {} {}", table.name, args.id))?;

    // A missing entity prints `null` as JSON and nothing as raw lines.
    match (flags.format, row) {
        (OutputFormat::Json, row) => output::output(&row, OutputFormat::Json)?,
        (OutputFormat::Raw, Some(row)) => println!("{}", row_line(&row)?),
        (OutputFormat::Raw, None) => {}
        (OutputFormat::Table, row) => {
            let rows: Vec<Row> = row.into_iter().collect();
            println!("{}", render_rows(&rows, &columns, OutputFormat::Table)?);
        }
    }
    Ok(())
}

/// Projection plus output column order.
///
/// No columns selects every column in declaration order; explicit columns
/// keep the order given, first occurrence wins.
fn selected_columns(
    table: &'static TableDef,
    requested: &[String],
) -> anyhow::Result<(ProjectionSet, Vec<&'static str>)> {
    if requested.is_empty() {
        return Ok((ProjectionSet::all(table), table.columns().map(|c| c.name).collect()));
    }

    let projection = ProjectionSet::for_table(table, requested)?;
    let mut order = Vec::with_capacity(requested.len());
    for name in requested {
        if let Some(column) = table.column(name.trim()) {
            if !order.contains(&column.name) {
                order.push(column.name);
            }
        }
    }
    Ok((projection, order))
}

async fn connect(config: &LintabConfig) -> anyhow::Result<TableService> {
    let connection = provider(config)
        .connect()
        .await
        .context("failed to connect to the Linear API")?;
    Ok(TableService::new(connection))
}

/// HTTP connection whose requests wait out rate limiting.
fn provider(config: &LintabConfig) -> ConnectionProvider {
    let retry = RetryConfig::with_max_retries(config.general.max_retries);
    ConnectionProvider::with_executor_factory(config.linear.clone(), move |linear, token| {
        let client = LinearClient::new(
            linear.endpoint.clone(),
            token,
            Duration::from_secs(linear.timeout_secs),
        )?;
        Ok(Arc::new(RetryingExecutor::new(Arc::new(client), retry)) as Arc<dyn GraphqlExecutor>)
    })
}

/// Cancel the running scan on the first Ctrl-C.
fn cancel_on_ctrl_c(cancel: CancelSignal) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping scan");
            cancel.cancel();
        }
    })
}

/// Feed every row passing `check` to `on_row`, returning how many were fed.
///
/// Stops pulling once the host-side limit is reached.
async fn collect_rows<S, F>(rows: S, check: &HostCheck, mut on_row: F) -> anyhow::Result<u64>
where
    S: Stream<Item = Result<Row, EngineError>>,
    F: FnMut(Row) -> anyhow::Result<()>,
{
    let mut count = 0;
    if check.is_full(count) {
        return Ok(count);
    }
    let mut rows = std::pin::pin!(rows);
    while let Some(mut row) = rows.try_next().await? {
        if !check.accepts(&row) {
            continue;
        }
        check.strip(&mut row);
        on_row(row)?;
        count += 1;
        if check.is_full(count) {
            break;
        }
    }
    Ok(count)
}
