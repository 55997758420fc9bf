//! Run a sync attempt.

use anyhow::{Context, Result};
use std::io::Write;
use sync_client::SyncEngine;
use sync_types::SyncScope;
use tracing::debug;

/// Run the trigger command.
pub async fn run<W: Write>(engine: &dyn SyncEngine, scope: &SyncScope, out: &mut W) -> Result<()> {
    debug!("Triggering sync of {}", scope);
    let result = engine
        .sync_now(scope)
        .await
        .with_context(|| format!("Sync of {} failed", scope))?;

    writeln!(
        out,
        "Synced {}: {} records, {} conflicts resolved",
        result.scope, result.records_synced, result.conflicts_resolved
    )?;
    Ok(())
}
