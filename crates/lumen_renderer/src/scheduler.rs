//! Bounded concurrent dispatch of per-pixel samples.
//!
//! Samples run on a dedicated rayon pool whose size is the in-flight cap, so
//! a pixel never has more than `max_in_flight` samples computing at once and
//! the aggregation step simply joins the parallel iterator.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::RenderResult;

/// Fixed-size worker pool for sample computations.
pub struct SampleScheduler {
    pool: ThreadPool,
    max_in_flight: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Counts one running sample for as long as it lives.
struct InFlightGuard<'a> {
    scheduler: &'a SampleScheduler,
}

impl<'a> InFlightGuard<'a> {
    fn enter(scheduler: &'a SampleScheduler) -> Self {
        let now = scheduler.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        scheduler.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self { scheduler }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.scheduler.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SampleScheduler {
    /// Create a scheduler running at most `max_in_flight` samples at once.
    pub fn new(max_in_flight: usize) -> RenderResult<Self> {
        let max_in_flight = max_in_flight.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(max_in_flight)
            .thread_name(|i| format!("lumen-sample-{i}"))
            .build()?;

        Ok(Self {
            pool,
            max_in_flight,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Samples computing right now.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of samples ever observed computing at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Compute `count` samples and return them in sample order.
    ///
    /// Each sample writes only its own slot; the call returns once every
    /// sample has finished.
    pub fn run<T, F>(&self, count: usize, sample: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        self.pool.install(|| {
            (0..count)
                .into_par_iter()
                .map(|i| {
                    let _guard = InFlightGuard::enter(self);
                    sample(i)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_results_in_sample_order() {
        let scheduler = SampleScheduler::new(4).unwrap();
        let results = scheduler.run(100, |i| i * 2);

        assert_eq!(results.len(), 100);
        for (i, value) in results.iter().enumerate() {
            assert_eq!(*value, i * 2);
        }
    }

    #[test]
    fn test_in_flight_never_exceeds_cap() {
        let scheduler = SampleScheduler::new(3).unwrap();
        let observed = AtomicUsize::new(0);

        scheduler.run(60, |_| {
            observed.fetch_max(scheduler.in_flight(), Ordering::SeqCst);
            thread::sleep(Duration::from_millis(1));
        });

        assert!(observed.load(Ordering::SeqCst) <= 3);
        assert!(scheduler.peak_in_flight() <= 3);
        assert!(scheduler.peak_in_flight() >= 1);
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[test]
    fn test_default_cap() {
        let scheduler = SampleScheduler::new(lumen_core::DEFAULT_MAX_IN_FLIGHT).unwrap();
        assert_eq!(scheduler.max_in_flight(), 12);

        scheduler.run(48, |_| thread::sleep(Duration::from_millis(1)));
        assert!(scheduler.peak_in_flight() <= 12);
    }

    #[test]
    fn test_zero_samples() {
        let scheduler = SampleScheduler::new(2).unwrap();
        let results: Vec<u32> = scheduler.run(0, |_| 1);
        assert!(results.is_empty());
        assert_eq!(scheduler.peak_in_flight(), 0);
    }
}
