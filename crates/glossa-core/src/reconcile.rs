//! The reconciliation pass: age, re-render, tally, resolve, persist.
//!
//! One pass walks every language and every open amendment. Each
//! amendment is aged by the elapsed wall-clock time, its ballot's
//! remaining-time line is re-rendered in place, and — once the window
//! has closed — its votes are fetched and tallied, the change is applied
//! or discarded, the amendment leaves the open list, its ballot is
//! deleted, and the registry is snapshotted. Expiry resolution and
//! removal happen within the same pass that crosses zero; no
//! expired-but-unresolved state exists.
//!
//! The pass runs inside the single-writer engine task, so nothing else
//! mutates the registry while it is underway. Language borrows are still
//! scoped to one amendment step at a time so the registry as a whole can
//! be snapshotted between steps.

use tracing::{debug, warn};

use glossa_lang::{Registry, tally};
use glossa_store::{SnapshotStore, codec};
use glossa_types::{BallotDecision, ChannelId};

use crate::error::EngineError;
use crate::gateway::{ChatGateway, NO_REACTION, YES_REACTION};
use crate::render;

/// Counters describing what one reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Open amendments aged this pass.
    pub ticked: usize,
    /// Amendments that expired and were applied.
    pub applied: usize,
    /// Amendments that expired and were discarded.
    pub rejected: usize,
}

/// Encode the registry and hand the blob to the store.
///
/// # Errors
///
/// Returns [`EngineError::Store`] if encoding or saving fails; the
/// caller treats this as aborting the mutating operation.
pub fn persist(registry: &Registry, store: &dyn SnapshotStore) -> Result<(), EngineError> {
    let blob = codec::encode(registry)?;
    store.save(&blob)?;
    Ok(())
}

/// Run one reconciliation pass over every language.
///
/// `elapsed_ms` is the wall-clock time since the previous pass.
///
/// # Errors
///
/// Returns [`EngineError::Store`] if a post-resolution snapshot fails.
/// Gateway failures never propagate: a failed ballot edit skips the
/// re-render until the next pass, and a failed vote fetch leaves the
/// amendment expired-and-open so the next pass retries resolution.
pub async fn run_pass(
    registry: &mut Registry,
    gateway: &dyn ChatGateway,
    store: &dyn SnapshotStore,
    elapsed_ms: i64,
) -> Result<PassSummary, EngineError> {
    let mut summary = PassSummary::default();

    for channel in registry.channels() {
        reconcile_channel(registry, gateway, store, channel, elapsed_ms, &mut summary).await?;
        refresh_rules_summary(registry, gateway, channel).await;
    }

    Ok(summary)
}

/// Age and resolve the open amendments of one language.
async fn reconcile_channel(
    registry: &mut Registry,
    gateway: &dyn ChatGateway,
    store: &dyn SnapshotStore,
    channel: ChannelId,
    elapsed_ms: i64,
    summary: &mut PassSummary,
) -> Result<(), EngineError> {
    let mut index = 0;
    loop {
        // Scope the language borrow to one amendment step; the iteration
        // tolerates appends and compacts over removals.
        let Some((ballot, request, remaining_secs, expired)) =
            registry.get_mut(channel).and_then(|language| {
                language.amendments.get_mut(index).map(|amendment| {
                    amendment.tick(elapsed_ms);
                    (
                        amendment.ballot,
                        amendment.request.clone(),
                        amendment.remaining_secs(),
                        amendment.expired(),
                    )
                })
            })
        else {
            break;
        };
        summary.ticked = summary.ticked.saturating_add(1);

        let ballot_body = render::ballot_text(&request, remaining_secs);
        if let Err(err) = gateway.edit_message(ballot, &ballot_body).await {
            warn!(%channel, %ballot, error = %err, "ballot re-render failed");
        }

        if !expired {
            index = index.saturating_add(1);
            continue;
        }

        let fetched = match gateway.fetch_message(ballot).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(%channel, %ballot, error = %err, "vote fetch failed, retrying next pass");
                index = index.saturating_add(1);
                continue;
            }
        };
        let yes = fetched.votes(YES_REACTION);
        let no = fetched.votes(NO_REACTION);
        let decision = tally(yes, no);
        debug!(%channel, %ballot, yes, no, ?decision, "amendment expired");

        let resolved = registry
            .get_mut(channel)
            .and_then(|language| language.resolve_at(index, decision));
        if resolved.is_some() {
            match decision {
                BallotDecision::Approved => summary.applied = summary.applied.saturating_add(1),
                BallotDecision::Rejected => summary.rejected = summary.rejected.saturating_add(1),
            }
            if let Err(err) = gateway.delete_message(ballot).await {
                warn!(%channel, %ballot, error = %err, "ballot cleanup failed");
            }
            persist(registry, store)?;
        }
        // The next open amendment shifted into this slot; do not advance.
    }
    Ok(())
}

/// Re-render a language's rules summary if a rule or name mutation
/// marked it dirty, and clear the flag on success.
async fn refresh_rules_summary(
    registry: &mut Registry,
    gateway: &dyn ChatGateway,
    channel: ChannelId,
) {
    let pending = registry.get(channel).and_then(|language| {
        if language.rules_dirty {
            Some((language.summary, render::rules_summary(language)))
        } else {
            None
        }
    });
    let Some((summary_ref, text)) = pending else {
        return;
    };

    let rendered = match summary_ref {
        Some(message) => match gateway.edit_message(message, &text).await {
            Ok(()) => true,
            Err(err) => {
                // Keep the flag set so the next pass retries.
                warn!(%channel, %message, error = %err, "rules summary re-render failed");
                false
            }
        },
        // No summary message recorded (e.g. it was never sent); nothing
        // to refresh.
        None => true,
    };

    if rendered && let Some(language) = registry.get_mut(channel) {
        language.rules_dirty = false;
    }
}
