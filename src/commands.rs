// Command layer: runs one diagram subcommand against the API and writes the
// result to the given output. Each command is one request followed by one
// decode/format/print step.

use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::cli::DiagramCommand;
use crate::filter::{FieldPath, Lookup};
use crate::model::{Diagram, DiagramList};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;

const RESOURCE: &str = "diagrams";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Presentation switches shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub pretty: bool,
    pub quiet: bool,
}

/// Execute a diagram subcommand.
pub fn run(
    cmd: DiagramCommand,
    api: &ApiClient,
    opts: &OutputOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    match cmd {
        DiagramCommand::Add { body } => add(api, body.as_deref(), opts, out),
        DiagramCommand::List { ids } => list(api, ids, opts, out),
        DiagramCommand::Get { id, filter } => get(api, &id, filter.as_ref(), opts, out),
        DiagramCommand::Remove { id } => remove(api, &id, opts, out),
    }
}

fn add(
    api: &ApiClient,
    body: Option<&str>,
    opts: &OutputOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let res = send(api, &[RESOURCE, "create"], body, opts, "Creating diagram...")?;
    if !accept(&res, false, out)? {
        return Ok(());
    }
    let diagram: Diagram = res.json()?;
    tracing::info!(diagram_id = %diagram.diagram_id, "diagram created");
    write_json(out, &diagram, opts.pretty)
}

fn list(
    api: &ApiClient,
    ids_only: bool,
    opts: &OutputOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let res = send(api, &[RESOURCE], None, opts, "Fetching diagrams...")?;
    if !accept(&res, false, out)? {
        return Ok(());
    }
    let list: DiagramList = res.json()?;
    if list.count != list.items.len() as u64 {
        tracing::debug!(
            count = list.count,
            items = list.items.len(),
            "count does not match number of items"
        );
    }

    if ids_only {
        for id in list.ids() {
            writeln!(out, "{}", id)?;
        }
        return Ok(());
    }
    write_json(out, &list, opts.pretty)
}

fn get(
    api: &ApiClient,
    id: &str,
    filter: Option<&FieldPath>,
    opts: &OutputOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let res = send(api, &[RESOURCE, id], None, opts, "Fetching diagram...")?;
    if !accept(&res, true, out)? {
        return Ok(());
    }

    let Some(path) = filter else {
        let diagram: Diagram = res.json()?;
        return write_json(out, &diagram, opts.pretty);
    };

    let tree = res.json_value()?;
    match path.resolve(&tree) {
        Ok(value) => writeln!(out, "{}", value)?,
        Err(Lookup::NotFound { segment }) => {
            tracing::debug!(%path, %segment, "field path segment not found");
            writeln!(out, "No such name {} in root payload", path)?;
        }
        Err(Lookup::NotScalar) => writeln!(out, "Field {} is not a scalar value", path)?,
    }
    Ok(())
}

fn remove(
    api: &ApiClient,
    id: &str,
    opts: &OutputOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let res = send(api, &[RESOURCE, id, "delete"], None, opts, "Removing diagram...")?;
    if !accept(&res, true, out)? {
        return Ok(());
    }
    writeln!(out, "{} has successfully deleted", id)?;
    Ok(())
}

/// Issue the request with a spinner on stderr while it is in flight.
fn send(
    api: &ApiClient,
    path: &[&str],
    body: Option<&str>,
    opts: &OutputOptions,
    message: &'static str,
) -> Result<ApiResponse, ApiError> {
    let spinner = if opts.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let res = api.request(path, body);
    spinner.finish_and_clear();
    res
}

/// Report a non-2xx response to the user. Returns whether the command
/// should go on to decode the body.
///
/// For per-id commands a 404 means the diagram does not exist.
fn accept(res: &ApiResponse, by_id: bool, out: &mut dyn Write) -> io::Result<bool> {
    let status = res.status();
    if status.is_success() {
        return Ok(true);
    }
    tracing::info!(status = status.as_u16(), "request was not successful");
    if by_id && status == StatusCode::NOT_FOUND {
        writeln!(out, "No such Diagram ID")?;
    } else {
        writeln!(out, "Unexpected error code {}", status.as_u16())?;
    }
    Ok(false)
}

fn write_json<T: Serialize>(
    out: &mut dyn Write,
    value: &T,
    pretty: bool,
) -> Result<(), CommandError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(io::Error::from)?;
    writeln!(out, "{}", encoded)?;
    Ok(())
}
