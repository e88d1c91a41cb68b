#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cancelable gameplay countdowns keyed by owner and purpose.
//!
//! The registry is plain mutable state driven by one `tick` per update step.
//! Each timer copies its span when it starts, so swapping the active ruleset
//! never alters a countdown already in flight. Expired timers are reported
//! once and removed; re-arming is always the caller's decision.

mod cycles;

use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use gravewatch_core::{StartPolicy, TimerKey, TimerSpan};
use gravewatch_system_selection::WeightedSelector;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

pub use cycles::{LookCycle, PropCycle, PropState};

/// Opaque identifier of one started timer; never reused by a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Event emitted exactly once when a running timer reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerExpired {
    /// Handle returned when the timer started.
    pub handle: TimerHandle,
    /// Owner and purpose of the timer.
    pub key: TimerKey,
    /// How far past zero the tick carried the timer.
    pub overrun: Duration,
}

/// A timer for the same owner and purpose is already running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("timer `{key}` is already running")]
pub struct DuplicateTimerError {
    /// Key that is already in use.
    pub key: TimerKey,
    /// Handle of the running timer.
    pub running: TimerHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Expired,
    Cancelled,
}

#[derive(Clone, Debug)]
struct Timer {
    key: TimerKey,
    span: TimerSpan,
    duration: Duration,
    remaining: Duration,
    phase: Phase,
}

impl Timer {
    fn new(key: TimerKey, span: TimerSpan, duration: Duration) -> Self {
        Self {
            key,
            span,
            duration,
            remaining: duration,
            phase: Phase::Idle,
        }
    }

    fn arm(&mut self) {
        debug_assert_eq!(self.phase, Phase::Idle, "timers are armed once");
        self.phase = Phase::Running;
    }

    /// Advances the countdown, returning the overrun when it expires.
    fn advance(&mut self, elapsed: Duration) -> Option<Duration> {
        if self.phase != Phase::Running {
            return None;
        }
        if elapsed >= self.remaining {
            let overrun = elapsed - self.remaining;
            self.remaining = Duration::ZERO;
            self.phase = Phase::Expired;
            Some(overrun)
        } else {
            self.remaining -= elapsed;
            None
        }
    }

    fn cancel(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Cancelled;
        true
    }
}

/// Owns every active gameplay timer.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: BTreeMap<TimerHandle, Timer>,
    index: HashMap<TimerKey, TimerHandle>,
    next_handle: u64,
    selector: WeightedSelector,
}

impl TimerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a timer using the start policy of its purpose.
    ///
    /// Ranged spans are sampled once here and never re-drawn.
    pub fn start<R>(
        &mut self,
        key: TimerKey,
        span: TimerSpan,
        rng: &mut R,
    ) -> Result<TimerHandle, DuplicateTimerError>
    where
        R: Rng + ?Sized,
    {
        self.start_with_policy(key, span, key.purpose().start_policy(), rng)
    }

    /// Starts a timer with an explicit duplicate policy.
    pub fn start_with_policy<R>(
        &mut self,
        key: TimerKey,
        span: TimerSpan,
        policy: StartPolicy,
        rng: &mut R,
    ) -> Result<TimerHandle, DuplicateTimerError>
    where
        R: Rng + ?Sized,
    {
        if let Some(&running) = self.index.get(&key) {
            match policy {
                StartPolicy::Reject => {
                    debug!(%key, running = running.get(), "rejected duplicate timer");
                    return Err(DuplicateTimerError { key, running });
                }
                StartPolicy::Replace => {
                    let _ = self.cancel(running);
                }
            }
        }

        Ok(self.arm(key, span, rng))
    }

    /// Cancels any running timer for the key and starts a fresh one.
    pub fn replace<R>(&mut self, key: TimerKey, span: TimerSpan, rng: &mut R) -> TimerHandle
    where
        R: Rng + ?Sized,
    {
        if let Some(running) = self.handle_for(key) {
            let _ = self.cancel(running);
        }
        self.arm(key, span, rng)
    }

    fn arm<R>(&mut self, key: TimerKey, span: TimerSpan, rng: &mut R) -> TimerHandle
    where
        R: Rng + ?Sized,
    {
        let duration = match span {
            TimerSpan::Fixed(duration) => duration,
            TimerSpan::Range(range) => self.selector.sample_duration(&range, rng),
        };
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let mut timer = Timer::new(key, span, duration);
        timer.arm();
        let _ = self.timers.insert(handle, timer);
        let _ = self.index.insert(key, handle);
        debug!(
            %key,
            handle = handle.get(),
            duration_ms = duration.as_millis() as u64,
            "started timer"
        );
        handle
    }

    /// Advances every running timer and reports those that reached zero.
    ///
    /// Expiry events are appended in handle order, which is start order.
    pub fn tick(&mut self, elapsed: Duration, out: &mut Vec<TimerExpired>) {
        let mut expired = Vec::new();
        for (handle, timer) in &mut self.timers {
            if let Some(overrun) = timer.advance(elapsed) {
                expired.push(TimerExpired {
                    handle: *handle,
                    key: timer.key,
                    overrun,
                });
            }
        }

        for event in expired {
            let _ = self.timers.remove(&event.handle);
            let _ = self.index.remove(&event.key);
            trace!(key = %event.key, handle = event.handle.get(), "timer expired");
            out.push(event);
        }
    }

    /// Cancels a running timer without emitting an expiry.
    ///
    /// Returns `false` when the handle is unknown or already terminal.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(timer) = self.timers.get_mut(&handle) else {
            return false;
        };
        if !timer.cancel() {
            return false;
        }
        let key = timer.key;
        let _ = self.timers.remove(&handle);
        let _ = self.index.remove(&key);
        debug!(%key, handle = handle.get(), "cancelled timer");
        true
    }

    /// Cancels the running timer for the key, if any.
    pub fn cancel_key(&mut self, key: TimerKey) -> bool {
        self.handle_for(key)
            .map_or(false, |handle| self.cancel(handle))
    }

    /// Handle of the running timer for the key.
    #[must_use]
    pub fn handle_for(&self, key: TimerKey) -> Option<TimerHandle> {
        self.index.get(&key).copied()
    }

    /// Reports whether the handle refers to a running timer.
    #[must_use]
    pub fn is_running(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    /// Time left before the timer expires.
    #[must_use]
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.timers.get(&handle).map(|timer| timer.remaining)
    }

    /// Duration the timer was armed with, after sampling.
    #[must_use]
    pub fn duration(&self, handle: TimerHandle) -> Option<Duration> {
        self.timers.get(&handle).map(|timer| timer.duration)
    }

    /// Span the timer copied when it started.
    #[must_use]
    pub fn span(&self, handle: TimerHandle) -> Option<TimerSpan> {
        self.timers.get(&handle).map(|timer| timer.span)
    }

    /// Number of running timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Reports whether no timer is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
