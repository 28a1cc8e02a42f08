use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared animation clock.
///
/// All transitions of one overlay read time from the same clock. The host either lets it follow
/// the monotonic system time or drives it by hand with [`Clock::set_unadjusted`], which is what
/// frame-paced hosts and tests do.
///
/// The clock can run slower than real time (the `slowdown` config option) and can be told to
/// complete every animation instantly.
#[derive(Debug, Clone)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    source: TimeSource,
    current_time: Duration,
    last_seen_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

#[derive(Debug)]
enum TimeSource {
    Monotonic(Instant),
    Manual(Duration),
}

impl Clock {
    /// Creates a clock following the monotonic system time.
    pub fn new() -> Self {
        Self::from_source(TimeSource::Monotonic(Instant::now()))
    }

    /// Creates a manually driven clock starting at `time`.
    pub fn with_time(time: Duration) -> Self {
        Self::from_source(TimeSource::Manual(time))
    }

    fn from_source(source: TimeSource) -> Self {
        let mut clock = AdjustableClock {
            source,
            current_time: Duration::ZERO,
            last_seen_time: Duration::ZERO,
            rate: 1.,
            complete_instantly: false,
        };
        let now = clock.source.now();
        clock.current_time = now;
        clock.last_seen_time = now;

        Self {
            inner: Rc::new(RefCell::new(clock)),
        }
    }

    /// Returns the adjusted time.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().now()
    }

    /// Returns the raw time, ignoring the rate.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow().source.now()
    }

    /// Moves a manually driven clock to `time`.
    ///
    /// Has no effect on a monotonic clock.
    pub fn set_unadjusted(&mut self, time: Duration) {
        let mut inner = self.inner.borrow_mut();
        if let TimeSource::Manual(current) = &mut inner.source {
            *current = time;
        }
    }

    /// Advances a manually driven clock by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        let now = self.now_unadjusted();
        self.set_unadjusted(now + delta);
    }

    pub fn set_rate(&mut self, rate: f64) {
        let mut inner = self.inner.borrow_mut();
        // Bring the adjusted time up to date at the old rate first.
        inner.now();
        inner.rate = rate.clamp(0., 1000.);
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource {
    fn now(&self) -> Duration {
        match self {
            TimeSource::Monotonic(start) => start.elapsed(),
            TimeSource::Manual(time) => *time,
        }
    }
}

impl AdjustableClock {
    fn now(&mut self) -> Duration {
        let time = self.source.now();

        if self.rate == 1. {
            self.current_time += time.saturating_sub(self.last_seen_time);
        } else if self.last_seen_time < time {
            let delta = time - self.last_seen_time;
            self.current_time += delta.mul_f64(self.rate);
        }
        // A manual clock can be moved backwards; adjusted time never goes backwards.

        self.last_seen_time = time;
        self.current_time
    }
}
