//! Start/stop handles for the animation and refresh timers.

use super::Event;
use crate::config::TickerConfig;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A running periodic timer. Stopping or dropping the handle aborts it.
#[derive(Debug)]
pub struct TimerHandle {
    period: Duration,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Send `event` every `period`, the first time one period from now.
    pub fn start(period: Duration, event: Event, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if event_tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });

        Self { period, task }
    }

    /// Timer period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The animation and refresh timers owned by the app.
#[derive(Debug, Default)]
pub struct Timers {
    animation: Option<TimerHandle>,
    refresh: Option<TimerHandle>,
    arm_count: u64,
}

impl Timers {
    /// Create with no timers running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any running timers, then start both with periods from `config`.
    pub fn arm(&mut self, config: &TickerConfig, event_tx: &mpsc::UnboundedSender<Event>) {
        self.stop();

        self.animation = Some(TimerHandle::start(
            config.frame_period(),
            Event::Tick,
            event_tx.clone(),
        ));
        self.refresh = Some(TimerHandle::start(
            config.refresh_period(),
            Event::Refresh,
            event_tx.clone(),
        ));
        self.arm_count += 1;

        tracing::debug!(
            "Timers armed: frame every {:?}, refresh every {:?}",
            config.frame_period(),
            config.refresh_period()
        );
    }

    /// Stop both timers.
    pub fn stop(&mut self) {
        if let Some(timer) = self.animation.take() {
            timer.stop();
        }
        if let Some(timer) = self.refresh.take() {
            timer.stop();
        }
    }

    /// Periods of the running (animation, refresh) timers.
    pub fn periods(&self) -> Option<(Duration, Duration)> {
        match (&self.animation, &self.refresh) {
            (Some(animation), Some(refresh)) => Some((animation.period(), refresh.period())),
            _ => None,
        }
    }

    /// How many times the timers have been (re)armed.
    pub fn arm_count(&self) -> u64 {
        self.arm_count
    }
}
