#![forbid(unsafe_code)]

//! Cancellable debounce timer with monotonic handles.
//!
//! A [`Debouncer`] holds at most one pending timer. Scheduling a new timer
//! cancels the pending one, so a deferred computation runs only after a full
//! quiet window with no further triggers. Time is injected by the caller
//! (`schedule_at` / `poll_at`); nothing runs in the background.
//!
//! # Invariants
//!
//! - Handles are strictly monotonic; handle 0 is reserved for "none".
//! - At most one handle is pending at any time.
//! - Every handle ends in exactly one of `Cancelled` or `Fired`, or is still
//!   pending.
//!
//! # Example
//!
//! ```rust
//! use cform_core::debounce::{DebounceConfig, Debouncer};
//! use web_time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new(DebounceConfig::from_millis(1000));
//! let t0 = Instant::now();
//!
//! debouncer.schedule_at(t0);
//! let second = debouncer.schedule_at(t0 + Duration::from_millis(400));
//!
//! assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(1000)), None);
//! assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(1400)), Some(second));
//! ```

use std::fmt;

use tracing::trace;
use web_time::{Duration, Instant};

/// Default quiet window.
pub const DEFAULT_WINDOW_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long the trigger must stay quiet before the timer fires.
    pub window: Duration,
}

impl DebounceConfig {
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            window: Duration::from_millis(ms),
        }
    }

    /// Window in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_WINDOW_MS)
    }
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// The null handle.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Lifecycle event of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceEvent {
    Scheduled {
        handle: TimerHandle,
        window_ms: u64,
    },
    /// Cancelled by a newer schedule (`superseded_by`), or explicitly
    /// (`superseded_by` is [`TimerHandle::NONE`]).
    Cancelled {
        handle: TimerHandle,
        superseded_by: TimerHandle,
    },
    Fired {
        handle: TimerHandle,
    },
}

impl DebounceEvent {
    #[must_use]
    pub fn handle(&self) -> TimerHandle {
        match self {
            Self::Scheduled { handle, .. }
            | Self::Cancelled { handle, .. }
            | Self::Fired { handle } => *handle,
        }
    }

    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Scheduled { .. } => "scheduled",
            Self::Cancelled { .. } => "cancelled",
            Self::Fired { .. } => "fired",
        }
    }
}

/// Ordered record of timer events.
#[derive(Debug, Clone, Default)]
pub struct DebounceTrace {
    events: Vec<DebounceEvent>,
}

impl DebounceTrace {
    #[must_use]
    pub fn events(&self) -> &[DebounceEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events of one type (`"scheduled"`, `"cancelled"`, `"fired"`).
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn push(&mut self, event: DebounceEvent) {
        self.events.push(event);
    }

    /// Check the lifecycle invariants; returns one message per violation.
    #[must_use]
    pub fn verify_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut last_scheduled = TimerHandle::NONE;
        let mut open: Option<TimerHandle> = None;
        let mut closed: Vec<TimerHandle> = Vec::new();

        for event in &self.events {
            match *event {
                DebounceEvent::Scheduled { handle, .. } => {
                    if handle <= last_scheduled {
                        violations.push(format!(
                            "{handle} scheduled after {last_scheduled} (not monotonic)"
                        ));
                    }
                    if let Some(prev) = open {
                        violations.push(format!("{handle} scheduled while {prev} still pending"));
                    }
                    last_scheduled = handle;
                    open = Some(handle);
                }
                DebounceEvent::Cancelled { handle, .. } | DebounceEvent::Fired { handle } => {
                    if closed.contains(&handle) {
                        violations.push(format!("{handle} ended twice"));
                    } else if open != Some(handle) {
                        violations.push(format!("{handle} ended without being pending"));
                    }
                    closed.push(handle);
                    if open == Some(handle) {
                        open = None;
                    }
                }
            }
        }
        violations
    }
}

/// Single-slot debounce timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    last_handle: u64,
    pending: Option<(TimerHandle, Instant)>,
    trace: DebounceTrace,
}

impl Debouncer {
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_handle: 0,
            pending: None,
            trace: DebounceTrace::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Schedule a timer firing at `now + window`, cancelling any pending one.
    pub fn schedule_at(&mut self, now: Instant) -> TimerHandle {
        self.last_handle += 1;
        let handle = TimerHandle(self.last_handle);
        if let Some((previous, _)) = self.pending.take() {
            trace!(%previous, superseded_by = %handle, "debounce timer reset");
            self.trace.push(DebounceEvent::Cancelled {
                handle: previous,
                superseded_by: handle,
            });
        }
        self.pending = Some((handle, now + self.config.window));
        self.trace.push(DebounceEvent::Scheduled {
            handle,
            window_ms: self.config.window_ms(),
        });
        handle
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        let (handle, _) = self.pending.take()?;
        self.trace.push(DebounceEvent::Cancelled {
            handle,
            superseded_by: TimerHandle::NONE,
        });
        Some(handle)
    }

    /// Fire the pending timer if its deadline has passed.
    pub fn poll_at(&mut self, now: Instant) -> Option<TimerHandle> {
        let (handle, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        trace!(%handle, "debounce timer fired");
        self.trace.push(DebounceEvent::Fired { handle });
        Some(handle)
    }

    #[must_use]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending timer fires.
    #[must_use]
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    #[must_use]
    pub fn trace(&self) -> &DebounceTrace {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
