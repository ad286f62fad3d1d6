//! Periodic refresh of countdown displays.
//!
//! The tracker holds no timer. Whatever displays a countdown owns one
//! [`RefreshTask`], which calls a closure at a fixed period. The closure
//! recomputes the value from the cycle and reports whether to keep going.
//! Stopping is cooperative: the loop checks the stop flag between ticks and
//! exits on its own; the task is never aborted. Dropping the task handle
//! also stops the loop.

use crate::libs::cycle::LensCycle;
use chrono::{Duration as ChronoDuration, NaiveDateTime};
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// Nothing left to refresh; the task ends.
    Finished,
}

/// How a refresh loop ended, with the number of ticks it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ended {
    /// The tick closure returned [`Tick::Finished`].
    Finished(u64),
    /// Stopped from outside before finishing.
    Stopped(u64),
}

pub struct RefreshTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<u64>,
}

impl RefreshTask {
    /// Spawns the refresh loop on the current tokio runtime.
    ///
    /// The first tick fires immediately, then every `period`.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Tick + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks: u64 = 0;

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    changed = stop_rx.changed() => {
                        // A dropped sender also means stop.
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }
                if *stop_rx.borrow() {
                    break;
                }

                ticks += 1;
                if on_tick() == Tick::Finished {
                    break;
                }
            }
            ticks
        });

        Self { stop_tx, handle }
    }

    /// Asks the loop to stop and waits for it. Returns the number of ticks run.
    pub async fn stop(self) -> u64 {
        let _ = self.stop_tx.send(true);
        self.handle.await.unwrap_or(0)
    }

    /// Runs until the loop finishes or `shutdown` resolves, whichever comes first.
    pub async fn run_until<F>(mut self, shutdown: F) -> Ended
    where
        F: Future<Output = ()>,
    {
        let finished = tokio::select! {
            ticks = &mut self.handle => Some(ticks.unwrap_or(0)),
            _ = shutdown => None,
        };
        match finished {
            Some(ticks) => Ended::Finished(ticks),
            None => Ended::Stopped(self.stop().await),
        }
    }

    /// Waits until the loop ends on its own.
    pub async fn finished(self) -> u64 {
        let Self { stop_tx, handle } = self;
        let ticks = handle.await.unwrap_or(0);
        drop(stop_tx);
        ticks
    }
}

/// Tick closure for a cycle countdown.
///
/// Each tick reads `clock`, hands the remaining time to `render`, and ends
/// the refresh once nothing is left.
pub fn countdown<C, F>(cycle: LensCycle, mut clock: C, mut render: F) -> impl FnMut() -> Tick + Send + 'static
where
    C: FnMut() -> NaiveDateTime + Send + 'static,
    F: FnMut(ChronoDuration) + Send + 'static,
{
    move || {
        let left = cycle.remaining(clock());
        render(left);
        if left <= ChronoDuration::zero() {
            Tick::Finished
        } else {
            Tick::Continue
        }
    }
}
