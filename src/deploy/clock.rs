use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time source with a blocking wait
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration);
}

/// Wall-clock time; `sleep` blocks the calling thread
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
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Virtual time that only moves when `sleep` or `advance` is called
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        *self.now.lock().unwrap() += duration;
    }

    /// Every duration passed to `sleep`, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

/// A point in a clock's timeline after which waiting stops
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Duration,
    timeout: Duration,
}

impl Deadline {
    pub fn after(clock: &dyn Clock, timeout: Duration) -> Self {
        Self {
            start: clock.now(),
            timeout,
        }
    }

    pub fn elapsed(&self, clock: &dyn Clock) -> Duration {
        clock.now().saturating_sub(self.start)
    }

    pub fn remaining(&self, clock: &dyn Clock) -> Duration {
        self.timeout.saturating_sub(self.elapsed(clock))
    }

    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        self.elapsed(clock) >= self.timeout
    }

    /// Sleeps for `interval`, or for what is left of the deadline if that is shorter
    pub fn wait(&self, clock: &dyn Clock, interval: Duration) {
        let pause = interval.min(self.remaining(clock));
        if !pause.is_zero() {
            clock.sleep(pause);
        }
    }
}
