//! Live feed: drives the Live Data view while it is on screen.
//!
//! Runs as a background task: draws a fresh [`LiveFrame`] every refresh
//! period and forwards it as an [`Action`] through the TUI's action channel.
//! The app spawns one feed per visit to the Live Data view and cancels it
//! on the way out, so no frames are produced for an unseen view.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use substation_core::LiveFrame;

use crate::action::Action;

/// Spawn a live feed that publishes one frame per `period` until cancelled.
///
/// The first frame is sent immediately so the view never starts blank.
pub async fn run_live_feed(
    period: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    // A slow render must not cause a burst of catch-up frames.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(period_ms = period.as_millis(), "live feed started");

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            _ = interval.tick() => {
                let frame = LiveFrame::sample();
                trace!(alerts = frame.alerts.len(), "live frame drawn");
                if action_tx.send(Action::LiveFrameUpdated(Arc::new(frame))).is_err() {
                    // App loop is gone.
                    break;
                }
            }
        }
    }

    debug!("live feed stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn publishes_on_every_period_until_cancelled() {
        let period = Duration::from_secs(2);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let start = tokio::time::Instant::now();
        let handle = tokio::spawn(run_live_feed(period, tx, cancel.clone()));

        let mut arrivals = Vec::new();
        for _ in 0..3 {
            let action = rx.recv().await.unwrap();
            assert!(matches!(action, Action::LiveFrameUpdated(_)));
            arrivals.push(start.elapsed());
        }
        assert_eq!(arrivals, vec![Duration::ZERO, period, period * 2]);

        cancel.cancel();
        handle.await.unwrap();
        tokio::time::advance(period * 3).await;
        // Sender dropped with the task: nothing queued, channel closed.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        run_live_feed(Duration::from_millis(5), tx, CancellationToken::new()).await;
    }
}
