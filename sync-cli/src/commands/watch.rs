//! Follow the state of a scope.

use super::describe;
use anyhow::Result;
use futures_util::StreamExt;
use std::io::Write;
use sync_client::SyncEngine;
use sync_types::SyncScope;
use tracing::debug;

/// Run the watch command.
///
/// Prints every state change; stops after `count` states when given,
/// otherwise runs until the stream ends or the process is interrupted.
pub async fn run<W: Write>(
    engine: &dyn SyncEngine,
    scope: &SyncScope,
    count: Option<usize>,
    out: &mut W,
) -> Result<()> {
    debug!("Watching {} (limit: {:?})", scope, count);
    let states = engine.observe_sync_state(scope);
    let mut states = match count {
        Some(n) => states.take(n).boxed(),
        None => states,
    };

    while let Some(state) = states.next().await {
        writeln!(out, "{}: {}", scope, describe(&state))?;
        out.flush()?;
    }
    Ok(())
}
