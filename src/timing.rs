use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Window in which a tap may still turn out to be half of a double click.
pub const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(200);

/// Monotonic time source measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Delays a task. Tasks run on the same thread that scheduled them.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Wall clock backed by [`instant::Instant`], works on native and wasm.
pub struct InstantClock {
    origin: instant::Instant,
}

impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Clock for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

struct Timer {
    deadline: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Pending delayed tasks, fired by [`TimerQueue::run_due`].
///
/// A frame loop calls `run_due` once per frame with an [`InstantClock`].
/// Tests pair it with a [`ManualClock`] and advance time explicitly.
pub struct TimerQueue {
    clock: Rc<dyn Clock>,
    timers: RefCell<Vec<Timer>>,
    next_seq: Cell<u64>,
}

impl TimerQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: RefCell::default(),
            next_seq: Cell::default(),
        }
    }

    /// Runs every task whose deadline has passed, earliest first.
    /// Tasks scheduled while running are picked up too if already due.
    /// Returns the number of tasks run.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        while let Some(timer) = self.pop_due() {
            (timer.task)();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self) -> Option<Timer> {
        let now = self.clock.now();
        let mut timers = self.timers.borrow_mut();
        let (pos, _) = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))?;
        Some(timers.swap_remove(pos))
    }

    pub fn pending_num(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.borrow().iter().map(|t| t.deadline).min()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            deadline: self.clock.now() + delay,
            seq,
            task,
        });
    }
}

/// Last observed double click, the only state the controller owns.
#[derive(Debug, Default)]
pub struct ClickTimer {
    last_double_click_at: Cell<Option<Duration>>,
}

impl ClickTimer {
    pub fn record_double_click(&self, at: Duration) {
        self.last_double_click_at.set(Some(at));
    }

    pub fn last_double_click_at(&self) -> Option<Duration> {
        self.last_double_click_at.get()
    }

    /// Whether a tap made at `tapped_at` is clear of any double click.
    pub fn is_single_click(&self, tapped_at: Duration) -> bool {
        match self.last_double_click_at.get() {
            None => true,
            Some(last) => tapped_at.saturating_sub(last) > DOUBLE_CLICK_THRESHOLD,
        }
    }

    pub fn reset(&self) {
        self.last_double_click_at.set(None);
    }
}
