use core::time::Duration;
use std::time::Instant;

/// A pausable lap timer.
///
/// Time accumulates only while running. The current lap covers everything
/// measured since the last [`lap`](Self::lap) (or [`reset`](Self::reset));
/// closed laps are summed so [`average_lap`](Self::average_lap) and
/// [`total_time`](Self::total_time) stay cheap.
///
/// # Examples
///
/// ```
/// use vc_utils::Stopwatch;
///
/// let mut watch = Stopwatch::new();
/// watch.start();
/// for _ in 0..3 {
///     // ... work ...
///     watch.lap();
/// }
/// watch.stop();
///
/// assert_eq!(watch.lap_count(), 3);
/// assert!(watch.average_lap() <= watch.total_time());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    current: Duration,
    laps_total: Duration,
    lap_count: u32,
}

impl Stopwatch {
    /// Creates a stopped stopwatch with no recorded time.
    #[inline]
    pub const fn new() -> Self {
        Self {
            started: None,
            current: Duration::ZERO,
            laps_total: Duration::ZERO,
            lap_count: 0,
        }
    }

    /// Creates a running stopwatch.
    #[inline]
    pub fn start_new() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Starts or resumes timing. Does nothing if already running.
    #[inline]
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Pauses timing, keeping the time measured so far. Does nothing if stopped.
    #[inline]
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.current += started.elapsed();
        }
    }

    /// Stops and clears all recorded time and laps.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Closes the current lap and returns its duration.
    ///
    /// A running stopwatch keeps running into the next lap.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = match self.started.as_mut() {
            Some(started) => {
                let lap = self.current + now.duration_since(*started);
                *started = now;
                lap
            }
            None => self.current,
        };

        self.current = Duration::ZERO;
        self.laps_total += lap;
        self.lap_count += 1;
        lap
    }

    /// Time measured in the current lap.
    #[inline]
    pub fn lap_time(&self) -> Duration {
        match self.started {
            Some(started) => self.current + started.elapsed(),
            None => self.current,
        }
    }

    /// Number of closed laps.
    #[inline]
    pub const fn lap_count(&self) -> u32 {
        self.lap_count
    }

    /// Mean duration of the closed laps, or zero if there are none.
    #[inline]
    pub fn average_lap(&self) -> Duration {
        self.laps_total
            .checked_div(self.lap_count)
            .unwrap_or(Duration::ZERO)
    }

    /// Closed laps plus the current lap.
    #[inline]
    pub fn total_time(&self) -> Duration {
        self.laps_total + self.lap_time()
    }
}

// -----------------------------------------------------------------------------
// Tests
