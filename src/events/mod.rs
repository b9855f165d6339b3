//! Event handling for the ticker.
//!
//! Timers, terminal input and finished fetch cycles all arrive on one
//! channel consumed by the UI loop.

mod handler;
mod input;
mod timer;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, KeyBindings, Modifiers};
pub use timer::{TimerHandle, Timers};

use crate::api::CycleOutcome;
use crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// Events consumed by the UI loop.
#[derive(Debug, Clone)]
pub enum Event {
    /// Animation frame.
    Tick,
    /// Periodic quote refresh is due.
    Refresh,
    /// Terminal input (keys, mouse, resize).
    Input(CrosstermEvent),
    /// A fetch cycle ended.
    FetchFinished(CycleOutcome),
}

/// Poll interval of the input reader; also bounds how long it outlives the UI loop.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Forward terminal input to `event_tx` from a blocking task.
///
/// The reader exits once the receiving side of the channel is dropped.
pub fn spawn_input_reader(event_tx: mpsc::UnboundedSender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !event_tx.is_closed() {
            match crossterm::event::poll(INPUT_POLL) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event @ (CrosstermEvent::Key(_)
                    | CrosstermEvent::Mouse(_)
                    | CrosstermEvent::Resize(_, _))) => {
                        if event_tx.send(Event::Input(event)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    })
}
