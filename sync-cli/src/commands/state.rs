//! Show the current state of a scope.

use super::describe;
use anyhow::Result;
use futures_util::StreamExt;
use std::io::Write;
use sync_client::SyncEngine;
use sync_types::{SyncScope, SyncState};
use tracing::debug;

/// Run the state command.
pub async fn run<W: Write>(engine: &dyn SyncEngine, scope: &SyncScope, out: &mut W) -> Result<()> {
    debug!("Reading state of {}", scope);
    let state = engine
        .observe_sync_state(scope)
        .next()
        .await
        .unwrap_or(SyncState::Idle);

    writeln!(out, "{}: {}", scope, describe(&state))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_client::EmbeddedEngine;

    #[tokio::test]
    async fn state_of_untouched_scope_is_idle() {
        let engine = EmbeddedEngine::always_online();
        let mut out = Vec::new();

        run(&engine, &SyncScope::all(), &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "*: idle\n");
    }

    #[tokio::test]
    async fn state_after_sync_is_synced() {
        let engine = EmbeddedEngine::always_online();
        engine.sync_now(&SyncScope::new("team")).await.unwrap();
        let mut out = Vec::new();

        run(&engine, &SyncScope::new("team"), &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "team: synced (1 records, 0 conflicts resolved)\n"
        );
    }
}
