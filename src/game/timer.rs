//! # Timer Module
//!
//! Cooperative single-threaded scheduler for timed game actions.
//!
//! The scheduler never runs anything on its own. Each call to
//! [`Scheduler::update`] collects the actions whose fire time has elapsed and
//! hands them back in fire order; the owner executes them before doing
//! anything else for that tick. Pausing freezes the queue, and resuming
//! shifts every pending fire time by the paused duration so relative
//! offsets survive the pause.

use crate::{ChaseError, ChaseResult};
use log::debug;
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::num::NonZeroU64;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source read by the scheduler.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock. Clones share the same time.
///
/// # Examples
///
/// ```
/// use chaser::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0);
/// let shared = clock.clone();
/// clock.advance(250);
/// assert_eq!(shared.now_ms(), 250);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// A single queued action.
#[derive(Debug, Clone)]
pub struct TimerTask<A> {
    /// Absolute time at which the task fires
    pub fire_time: u64,
    /// Interval between firings of a repeating task
    pub period: u64,
    /// Payload handed back when the task fires
    pub action: A,
    /// Whether the task is re-enqueued after firing
    pub repeating: bool,
    sequence: u64,
}

impl<A> TimerTask<A> {
    /// Creates a task. Repeating tasks need a non-zero period.
    pub fn new(fire_time: u64, period: u64, action: A, repeating: bool) -> ChaseResult<Self> {
        if repeating && period == 0 {
            return Err(ChaseError::InvalidTimer(
                "repeating task needs a non-zero period".to_string(),
            ));
        }
        Ok(Self {
            fire_time,
            period,
            action,
            repeating,
            sequence: 0,
        })
    }
}

impl<A> PartialEq for TimerTask<A> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl<A> Eq for TimerTask<A> {}

impl<A> PartialOrd for TimerTask<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for TimerTask<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of timed actions driven by explicit `update` calls.
pub struct Scheduler<A> {
    clock: Rc<dyn Clock>,
    queue: BinaryHeap<TimerTask<A>>,
    next_sequence: u64,
    paused_at: Option<u64>,
}

impl<A: Clone> Scheduler<A> {
    /// Creates an empty, running scheduler reading time from `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: BinaryHeap::new(),
            next_sequence: 0,
            paused_at: None,
        }
    }

    /// Current time according to the scheduler's clock.
    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Enqueues `action` to fire `delay_ms` from now. A repeating task fires
    /// again every `delay_ms` after each firing.
    ///
    /// While paused, the delay counts from the moment of pausing, so the
    /// task still has exactly `delay_ms` left once the scheduler resumes.
    pub fn schedule(&mut self, delay_ms: u64, action: A, repeating: bool) -> ChaseResult<()> {
        let task = TimerTask::new(self.origin() + delay_ms, delay_ms, action, repeating)?;
        self.push(task);
        Ok(())
    }

    /// Enqueues a one-shot action. One-shot tasks cannot be invalid.
    pub fn schedule_once(&mut self, delay_ms: u64, action: A) {
        self.push(TimerTask {
            fire_time: self.origin() + delay_ms,
            period: delay_ms,
            action,
            repeating: false,
            sequence: 0,
        });
    }

    /// Enqueues an action repeating every `period`. Unlike
    /// [`Scheduler::schedule`] this cannot fail.
    pub fn schedule_every(&mut self, period: NonZeroU64, action: A) {
        let period = period.get();
        self.push(TimerTask {
            fire_time: self.origin() + period,
            period,
            action,
            repeating: true,
            sequence: 0,
        });
    }

    /// Time new delays are measured from: now, or the pause instant.
    fn origin(&self) -> u64 {
        self.paused_at.unwrap_or_else(|| self.now())
    }

    fn push(&mut self, mut task: TimerTask<A>) {
        task.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(task);
    }

    /// Pops every task due at the time of the call and returns their
    /// actions in fire order. Repeating tasks are re-enqueued at
    /// `now + period`. Does nothing while paused.
    pub fn update(&mut self) -> Vec<A> {
        if self.is_paused() {
            return Vec::new();
        }

        let now = self.now();
        let mut due = Vec::new();
        while let Some(task) = self.queue.peek() {
            if task.fire_time > now {
                break;
            }
            let Some(mut task) = self.queue.pop() else {
                break;
            };
            due.push(task.action.clone());
            if task.repeating {
                task.fire_time = now + task.period;
                self.push(task);
            }
        }
        due
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Switches between paused and running.
    pub fn toggle_pause(&mut self) {
        let now = self.now();
        match self.paused_at.take() {
            Some(paused_at) => {
                let shift = now.saturating_sub(paused_at);
                let tasks = std::mem::take(&mut self.queue).into_vec();
                self.queue = tasks
                    .into_iter()
                    .map(|mut task| {
                        task.fire_time += shift;
                        task
                    })
                    .collect();
                debug!("Scheduler resumed after {}ms", shift);
            }
            None => {
                self.paused_at = Some(now);
                debug!("Scheduler paused at {}ms", now);
            }
        }
    }

    pub fn pause(&mut self) {
        if !self.is_paused() {
            self.toggle_pause();
        }
    }

    pub fn resume(&mut self) {
        if self.is_paused() {
            self.toggle_pause();
        }
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Fire time of the earliest queued task.
    pub fn next_fire_time(&self) -> Option<u64> {
        self.queue.peek().map(|task| task.fire_time)
    }
}

impl<A> fmt::Debug for Scheduler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.clock.now_ms())
            .field("queued", &self.queue.len())
            .field("paused_at", &self.paused_at)
            .finish()
    }
}
