//! Deferred work: one-shot timers and animation-frame callbacks.
//!
//! Controllers never talk to `setTimeout`/`requestAnimationFrame` directly. They
//! go through [`Scheduler`], which the browser binding implements on top of the
//! window and which [`ManualScheduler`] implements for host tests and the demo
//! binary, where time only moves when the caller says so.

use std::cell::RefCell;
use std::rc::Rc;

use crate::time::{Clock, Duration};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Timeout,
    Frame,
}

/// Handle returned by a [`Scheduler`]; pass it back to [`Scheduler::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    kind: TaskKind,
    id: u64,
}

impl TaskHandle {
    pub fn new(kind: TaskKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn kind(self) -> TaskKind {
        self.kind
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Run `task` on the next display frame.
    fn request_frame(&self, task: Task) -> TaskHandle;

    /// Drop a task that has not run yet. Cancelling a finished task is a no-op.
    fn cancel(&self, handle: TaskHandle);
}

/// 60 frames per second, rounded the way browsers usually report it.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct PendingTimeout {
    id: u64,
    due: Duration,
    task: Task,
}

struct Inner {
    now: Duration,
    next_id: u64,
    frame_interval: Duration,
    frame_due: Option<Duration>,
    timeouts: Vec<PendingTimeout>,
    frames: Vec<(u64, Task)>,
}

enum Next {
    Timeout(u64, Duration),
    Frame(Duration),
}

/// Deterministic scheduler whose clock advances only through [`ManualScheduler::advance`].
///
/// Frames fire every `frame_interval` while any frame callback is pending.
/// Timeouts due at the same instant as a frame run first.
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now: Duration::ZERO,
                next_id: 1,
                frame_interval: frame_interval.max(Duration::from_millis(1)),
                frame_due: None,
                timeouts: Vec::new(),
                frames: Vec::new(),
            })),
        }
    }

    pub fn pending_timeouts(&self) -> usize {
        self.inner.borrow().timeouts.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Move the clock forward by `by`, running every task that falls due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;
        self.advance_to(target);
    }

    /// Move the clock to `target` (never backwards), running due tasks in time order.
    pub fn advance_to(&self, target: Duration) {
        loop {
            let next = self.next_event();
            match next {
                Some(Next::Timeout(id, due)) if due <= target => {
                    let task = {
                        let mut inner = self.inner.borrow_mut();
                        inner.now = inner.now.max(due);
                        let pos = inner.timeouts.iter().position(|t| t.id == id);
                        pos.map(|p| inner.timeouts.remove(p).task)
                    };
                    if let Some(task) = task {
                        task();
                    }
                }
                Some(Next::Frame(at)) if at <= target => {
                    let batch = {
                        let mut inner = self.inner.borrow_mut();
                        inner.now = inner.now.max(at);
                        inner.frame_due = None;
                        std::mem::take(&mut inner.frames)
                    };
                    for (_, task) in batch {
                        task();
                    }
                }
                _ => break,
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
    }

    /// Run frames until none are pending or `max_frames` have fired. Returns the frames run.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut ran = 0;
        while ran < max_frames {
            let due = self.inner.borrow().frame_due;
            match due {
                Some(at) => {
                    self.advance_to(at);
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    fn next_event(&self) -> Option<Next> {
        let inner = self.inner.borrow();
        let timeout = inner
            .timeouts
            .iter()
            .min_by_key(|t| (t.due, t.id))
            .map(|t| (t.id, t.due));
        let frame = if inner.frames.is_empty() {
            None
        } else {
            inner.frame_due
        };

        match (timeout, frame) {
            (Some((id, due)), Some(at)) if due <= at => Some(Next::Timeout(id, due)),
            (_, Some(at)) => Some(Next::Frame(at)),
            (Some((id, due)), None) => Some(Next::Timeout(id, due)),
            (None, None) => None,
        }
    }

    fn alloc_id(inner: &mut Inner) -> u64 {
        let id = inner.next_id;
        inner.next_id += 1;
        id
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = Self::alloc_id(&mut inner);
        let due = inner.now + delay;
        inner.timeouts.push(PendingTimeout { id, due, task });
        TaskHandle::new(TaskKind::Timeout, id)
    }

    fn request_frame(&self, task: Task) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = Self::alloc_id(&mut inner);
        if inner.frame_due.is_none() {
            inner.frame_due = Some(inner.now + inner.frame_interval);
        }
        inner.frames.push((id, task));
        TaskHandle::new(TaskKind::Frame, id)
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut inner = self.inner.borrow_mut();
        match handle.kind() {
            TaskKind::Timeout => inner.timeouts.retain(|t| t.id != handle.id()),
            TaskKind::Frame => {
                inner.frames.retain(|(id, _)| *id != handle.id());
                if inner.frames.is_empty() {
                    inner.frame_due = None;
                }
            }
        }
    }
}
