use tracing::{info, warn};

use super::state::{ComponentState, Progress};
use super::summary::{Operation, RunSummary};
use crate::config::{Config, ConfigError};
use crate::error::Result;
use crate::parser::LocateError;
use crate::rewrite::{wrap, GuardOutcome, ImportOutcome, Injector, SourceBuffer, WrapOutcome};

/// Record a locate failure. A missing component is a skip; a boundary
/// mismatch fails the component for the rest of the run.
fn record_locate_error(
    summary: &mut RunSummary,
    progress: &mut Progress,
    op: Operation,
    err: &LocateError,
) {
    match err {
        LocateError::NotFound { name } => {
            warn!(component = %name, operation = op.as_str(), "component not found");
            summary.skipped_with_warning(op, name, err.to_string());
        }
        LocateError::BoundaryMismatch { name, .. } => {
            warn!(component = %name, operation = op.as_str(), error = %err, "left unchanged");
            progress.fail(name);
            summary.failed(op, name, err.to_string());
        }
    }
}

fn record_guard(
    summary: &mut RunSummary,
    progress: &mut Progress,
    op: Operation,
    name: &str,
    outcome: GuardOutcome,
) {
    progress.advance(name, ComponentState::BoundaryResolved);
    match outcome {
        GuardOutcome::Injected | GuardOutcome::Retuned { .. } => {
            progress.advance(name, ComponentState::GuardInjected);
            summary.succeeded(op);
        }
        GuardOutcome::AlreadyApplied | GuardOutcome::NotNeeded => {
            progress.advance(name, ComponentState::GuardSkipped);
            summary.skipped(op);
        }
        GuardOutcome::NoCallback => {
            progress.advance(name, ComponentState::GuardSkipped);
            summary.skipped_with_warning(op, name, "no recognized per-tick callback");
        }
    }
}

/// Run the rewrite pass over `buf`: throttle guards, the shared tick
/// counter, the helper import, then memoization.
///
/// Per-component problems end up in the returned summary; only a config
/// that cannot be turned into matchers is an error.
pub fn run_rewrite(buf: &mut SourceBuffer, config: &Config) -> Result<RunSummary> {
    let injector =
        Injector::new(&config.style, &config.registrations).map_err(ConfigError::from)?;
    let table = config.throttle_table();
    let mut summary = RunSummary::default();
    let mut progress = Progress::new();

    info!(components = config.throttle.len(), "adding frame throttling");
    for assignment in &config.throttle {
        let name = assignment.component.as_str();
        let divisor = table.divisor(assignment.class);
        match injector.inject_guard(buf, name, divisor) {
            Ok(outcome) => {
                record_guard(&mut summary, &mut progress, Operation::Guard, name, outcome)
            }
            Err(e) => record_locate_error(&mut summary, &mut progress, Operation::Guard, &e),
        }
    }

    if let Some(orchestrator) = config.orchestrator.as_deref() {
        info!(component = orchestrator, "injecting shared tick counter");
        match injector.inject_tick_counter(buf, orchestrator) {
            Ok(outcome) => record_guard(
                &mut summary,
                &mut progress,
                Operation::TickCounter,
                orchestrator,
                outcome,
            ),
            Err(e) => record_locate_error(&mut summary, &mut progress, Operation::TickCounter, &e),
        }
    }

    match injector.ensure_helper_import(buf) {
        ImportOutcome::Inserted => summary.succeeded(Operation::HelperImport),
        ImportOutcome::AlreadyPresent | ImportOutcome::NotNeeded => {
            summary.skipped(Operation::HelperImport)
        }
    }

    info!(components = config.memoize.len(), "memoizing static components");
    for name in &config.memoize {
        if progress.is_failed(name) {
            summary.skipped_with_warning(
                Operation::Memoize,
                name,
                "skipped after an earlier boundary failure",
            );
            continue;
        }
        match wrap(buf, name, &config.style) {
            Ok(WrapOutcome::Wrapped) => {
                progress.advance(name, ComponentState::Wrapped);
                summary.succeeded(Operation::Memoize);
            }
            Ok(WrapOutcome::AlreadyApplied) => {
                progress.advance(name, ComponentState::WrapSkipped);
                summary.skipped(Operation::Memoize);
            }
            Err(e) => record_locate_error(&mut summary, &mut progress, Operation::Memoize, &e),
        }
    }

    summary.components = progress.finish();
    info!(edits = buf.edits(), "rewrite pass complete");
    Ok(summary)
}
