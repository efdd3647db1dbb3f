//! Scroll-triggered counters.
//!
//! Each counter element shows a number such as `1,250+`. When the stats section
//! first becomes visible, every counter counts up from zero to the digits of
//! its text and then restores the original text, suffix included.
//!
//! Progress is a function of elapsed time on an injected [`Clock`], not of the
//! number of frames rendered, so slow frames shorten the visible count rather
//! than stretch it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::StatsConfig;
use crate::element::UiElement;
use crate::schedule::Scheduler;
use crate::time::{Clock, Duration};

/// The numeric target of a counter: its ASCII digits, in order.
///
/// `"1,250+"` is 1250, `"98%"` is 98. Text without digits has target 0.
/// Targets that overflow `u64` saturate.
pub fn parse_target(text: &str) -> u64 {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add((b - b'0') as u64)
        })
}

/// Format `value` with `separator` between groups of three digits.
pub fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    if separator.is_empty() || digits.len() <= 3 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + separator.len() * (digits.len() / 3));
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterFrame {
    /// Intermediate value, already grouped.
    Counting(String),
    /// The original text, restored verbatim.
    Finished(String),
}

impl CounterFrame {
    pub fn text(&self) -> &str {
        match self {
            CounterFrame::Counting(t) | CounterFrame::Finished(t) => t,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, CounterFrame::Finished(_))
    }
}

/// Interpolation for a single counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    original: String,
    target: u64,
}

impl CounterAnimation {
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            target: parse_target(original),
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// The text to show `elapsed` into an animation lasting `duration`.
    pub fn frame(&self, elapsed: Duration, duration: Duration, separator: &str) -> CounterFrame {
        if duration.is_zero() {
            return CounterFrame::Finished(self.original.clone());
        }
        let target = self.target as f64;
        let current = target * elapsed.as_nanos() as f64 / duration.as_nanos() as f64;

        if current >= target {
            return CounterFrame::Finished(self.original.clone());
        }
        // `current < target <= u64::MAX`, so the ceiling fits.
        let shown = (current.ceil() as u64).min(self.target);
        CounterFrame::Counting(group_digits(shown, separator))
    }
}

/// One-shot guard for the counting animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    NotStarted,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityOutcome {
    /// The section is below the threshold; keep watching.
    NotVisible,
    /// Counting started; the caller should stop observing the section.
    Started,
    /// Counting already ran or is running.
    AlreadyStarted,
}

impl VisibilityOutcome {
    pub fn should_unobserve(self) -> bool {
        matches!(self, VisibilityOutcome::Started)
    }
}

struct Counter<E> {
    element: E,
    animation: CounterAnimation,
    finished: bool,
}

/// Stats section controller.
pub struct StatsAnimation<E: UiElement> {
    section: E,
    elements: Vec<E>,
    cfg: StatsConfig,
    scheduler: Rc<dyn Scheduler>,
    clock: Rc<dyn Clock>,
    state: Cell<AnimationState>,
    started_at: Cell<Duration>,
    counters: RefCell<Vec<Counter<E>>>,
}

impl<E: UiElement + Clone + 'static> StatsAnimation<E> {
    pub fn new(
        section: E,
        counters: Vec<E>,
        cfg: StatsConfig,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Rc<Self> {
        Rc::new(Self {
            section,
            elements: counters,
            cfg,
            scheduler,
            clock,
            state: Cell::new(AnimationState::NotStarted),
            started_at: Cell::new(Duration::ZERO),
            counters: RefCell::new(Vec::new()),
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state.get()
    }

    pub fn section(&self) -> &E {
        &self.section
    }

    pub fn threshold(&self) -> f64 {
        self.cfg.threshold
    }

    /// React to a visibility report for the section.
    pub fn on_visibility(self: &Rc<Self>, is_intersecting: bool) -> VisibilityOutcome {
        if !is_intersecting {
            return VisibilityOutcome::NotVisible;
        }
        if self.start() {
            VisibilityOutcome::Started
        } else {
            VisibilityOutcome::AlreadyStarted
        }
    }

    /// Begin counting. Returns `false` if counting already happened.
    pub fn start(self: &Rc<Self>) -> bool {
        if self.state.get() != AnimationState::NotStarted {
            return false;
        }

        // Texts are captured at start, not at construction, so late edits to
        // the markup are honoured.
        let counters: Vec<Counter<E>> = self
            .elements
            .iter()
            .map(|el| Counter {
                element: el.clone(),
                animation: CounterAnimation::new(&el.text()),
                finished: false,
            })
            .collect();

        tracing::info!("stats visible: animating {} counters", counters.len());

        if counters.is_empty() {
            self.state.set(AnimationState::Done);
            return true;
        }

        *self.counters.borrow_mut() = counters;
        self.started_at.set(self.clock.now());
        self.state.set(AnimationState::Running);
        self.schedule_frame();
        true
    }

    fn schedule_frame(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.scheduler.request_frame(Box::new(move || this.on_frame()));
    }

    fn on_frame(self: &Rc<Self>) {
        let elapsed = self.clock.now().saturating_sub(self.started_at.get());
        let duration = self.cfg.duration();

        let all_done = {
            let mut counters = self.counters.borrow_mut();
            for c in counters.iter_mut().filter(|c| !c.finished) {
                let frame = c
                    .animation
                    .frame(elapsed, duration, &self.cfg.grouping_separator);
                c.element.set_text(frame.text());
                c.finished = frame.is_finished();
            }
            counters.iter().all(|c| c.finished)
        };

        if all_done {
            self.state.set(AnimationState::Done);
            tracing::debug!("stats animation done after {:?}", elapsed);
        } else {
            self.schedule_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessElement;
    use crate::schedule::ManualScheduler;

    const SECOND: Duration = Duration::from_secs(1);

    fn setup(texts: &[&str]) -> (Rc<StatsAnimation<HeadlessElement>>, Vec<HeadlessElement>, ManualScheduler) {
        let sched = ManualScheduler::new();
        let section = HeadlessElement::new("stats");
        let counters: Vec<HeadlessElement> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| HeadlessElement::new(&format!("stat-{i}")).with_text(t))
            .collect();
        let stats = StatsAnimation::new(
            section,
            counters.clone(),
            StatsConfig::default(),
            Rc::new(sched.clone()),
            Rc::new(sched.clone()),
        );
        (stats, counters, sched)
    }

    #[test]
    fn parses_digits_only() {
        assert_eq!(parse_target("1,250+"), 1250);
        assert_eq!(parse_target("98%"), 98);
        assert_eq!(parse_target("$-3.5k"), 35);
        assert_eq!(parse_target("none"), 0);
        assert_eq!(parse_target(""), 0);
        assert_eq!(parse_target("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits(0, ","), "0");
        assert_eq!(group_digits(999, ","), "999");
        assert_eq!(group_digits(1000, ","), "1,000");
        assert_eq!(group_digits(1250, ","), "1,250");
        assert_eq!(group_digits(123456, ","), "123,456");
        assert_eq!(group_digits(1234567, "."), "1.234.567");
        assert_eq!(group_digits(1234567, ""), "1234567");
    }

    #[test]
    fn frame_interpolates_and_restores_original() {
        let a = CounterAnimation::new("1,250+");
        let d = Duration::from_millis(2000);
        assert_eq!(a.target(), 1250);

        assert_eq!(
            a.frame(Duration::from_millis(1000), d, ","),
            CounterFrame::Counting("625".to_string())
        );
        assert_eq!(
            a.frame(Duration::from_millis(1999), d, ","),
            CounterFrame::Counting("1,250".to_string())
        );
        assert_eq!(
            a.frame(d, d, ","),
            CounterFrame::Finished("1,250+".to_string())
        );
        assert_eq!(
            a.frame(3 * SECOND, d, ","),
            CounterFrame::Finished("1,250+".to_string())
        );
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let a = CounterAnimation::new("N/A");
        assert_eq!(
            a.frame(Duration::ZERO, SECOND, ","),
            CounterFrame::Finished("N/A".to_string())
        );
    }

    #[test]
    fn intermediate_text_is_grouped_digits_only() {
        let (stats, counters, sched) = setup(&["1,250+"]);
        assert!(stats.start());
        assert_eq!(stats.state(), AnimationState::Running);

        let mut seen = Vec::new();
        while stats.state() == AnimationState::Running {
            sched.run_frames(1);
            seen.push(counters[0].text());
        }

        let (last, mid) = seen.split_last().unwrap();
        assert_eq!(last, "1,250+");
        assert!(!mid.is_empty());
        for text in mid {
            assert!(text.chars().all(|c| c.is_ascii_digit() || c == ','), "{text}");
            assert!(parse_target(text) <= 1250);
        }
        assert_eq!(stats.state(), AnimationState::Done);
    }

    #[test]
    fn animation_is_time_driven() {
        let (stats, counters, sched) = setup(&["2000", "50%"]);
        stats.start();

        sched.advance(Duration::from_millis(1008));
        // Frame at 1008ms: 2000 * 0.504 = 1008.
        assert_eq!(counters[0].text(), "1,008");
        assert_eq!(counters[1].text(), "26");

        sched.advance(Duration::from_millis(1000));
        assert_eq!(counters[0].text(), "2000");
        assert_eq!(counters[1].text(), "50%");
        assert_eq!(stats.state(), AnimationState::Done);
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn runs_at_most_once_across_visibility_changes() {
        let (stats, counters, sched) = setup(&["500+"]);

        assert_eq!(stats.on_visibility(false), VisibilityOutcome::NotVisible);
        assert_eq!(stats.state(), AnimationState::NotStarted);

        let first = stats.on_visibility(true);
        assert_eq!(first, VisibilityOutcome::Started);
        assert!(first.should_unobserve());

        sched.advance(3 * SECOND);
        assert_eq!(counters[0].text(), "500+");

        counters[0].set_text("edited");
        assert_eq!(stats.on_visibility(false), VisibilityOutcome::NotVisible);
        let again = stats.on_visibility(true);
        assert_eq!(again, VisibilityOutcome::AlreadyStarted);
        assert!(!again.should_unobserve());
        sched.advance(3 * SECOND);
        assert_eq!(counters[0].text(), "edited");
        assert_eq!(stats.state(), AnimationState::Done);
    }

    #[test]
    fn no_counters_is_done_without_frames() {
        let (stats, _, sched) = setup(&[]);
        assert!(stats.start());
        assert_eq!(stats.state(), AnimationState::Done);
        assert_eq!(sched.pending_frames(), 0);
    }
}
