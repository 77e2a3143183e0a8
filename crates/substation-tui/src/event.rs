//! Terminal input plus a slow UI tick, merged into one channel.
//!
//! There is no render tick: the app redraws only after something changed
//! (a key, a resize, a live frame, a throbber step, a toast expiring). The
//! tick exists for time-based changes and runs at [`UI_TICK`].

use std::io;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Throbber animation and toast expiry period.
pub const UI_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

impl Event {
    /// Keep key presses and resizes; releases, repeats, focus, paste and
    /// mouse input mean nothing to this dashboard.
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Owns the input task; dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Read from the real terminal.
    pub fn terminal(tick: Duration) -> Self {
        Self::from_stream(EventStream::new(), tick)
    }

    /// Read from any crossterm-shaped event source.
    pub fn from_stream<S>(source: S, tick: Duration) -> Self
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Send + Unpin + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(source, tick, tx, cancel.clone()));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump<S>(
    mut source: S,
    tick: Duration,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) where
    S: Stream<Item = io::Result<CrosstermEvent>> + Send + Unpin,
{
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut source_open = true;

    loop {
        let event = tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            next = source.next(), if source_open => match next {
                Some(Ok(raw)) => match Event::from_terminal(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!(error = %e, "terminal input error");
                    continue;
                }
                None => {
                    debug!("terminal input closed");
                    source_open = false;
                    continue;
                }
            },

            _ = ticker.tick() => Event::Tick,
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
