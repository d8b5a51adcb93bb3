//! Periodic time-spent flusher for the active level.
//!
//! Runs in a background thread and flushes elapsed whole seconds into the
//! progress store on a fixed interval. Stopping the tracker flushes the
//! remaining partial interval before the thread exits, so teardown never
//! drops played time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tokio::sync::Notify;

use super::store::ProgressStore;

/// Default flush interval.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Background flusher for one level's `time_spent`.
pub struct TimeTracker {
    shutdown: Arc<AtomicBool>,
    wake: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl TimeTracker {
    /// Starts the flush loop for the given level.
    pub fn start(store: Arc<ProgressStore>, level_id: u32, interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let thread_shutdown = Arc::clone(&shutdown);
        let thread_wake = Arc::clone(&wake);

        let handle = std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("time tracker runtime");

            rt.block_on(async {
                let mut ticker = tokio::time::interval(interval);
                ticker.tick().await; // skip immediate first tick
                let mut last_flush = Instant::now();

                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            let seconds = last_flush.elapsed().as_secs();
                            if seconds > 0 {
                                store.add_time_spent(level_id, seconds);
                                // Keep the sub-second remainder for the
                                // next flush instead of dropping it.
                                last_flush += Duration::from_secs(seconds);
                            }
                        }
                        _ = thread_wake.notified() => {}
                    }

                    if thread_shutdown.load(Ordering::Acquire) {
                        let seconds = last_flush.elapsed().as_secs();
                        if seconds > 0 {
                            store.add_time_spent(level_id, seconds);
                        }
                        break;
                    }
                }
            });

            log::debug!("Time tracker for level {} stopped", level_id);
        });

        Self {
            shutdown,
            wake,
            handle: Some(handle),
        }
    }

    /// Signals the flush loop to stop and waits for the final flush.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.wake.notify_one();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Time tracker thread panicked");
            }
        }
    }
}

impl Drop for TimeTracker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Profile;

    #[test]
    fn test_periodic_flush() {
        let store = Arc::new(ProgressStore::new(Profile::with_levels(1..=1)));
        let mut tracker = TimeTracker::start(Arc::clone(&store), 1, Duration::from_secs(1));

        std::thread::sleep(Duration::from_millis(2300));
        tracker.stop();

        let spent = store.snapshot().level(1).unwrap().time_spent;
        assert!(spent >= 2, "expected at least two flushed seconds, got {}", spent);
    }

    #[test]
    fn test_stop_flushes_partial_interval() {
        let store = Arc::new(ProgressStore::new(Profile::with_levels(1..=1)));
        // Interval far longer than the test: only the teardown flush runs.
        let mut tracker = TimeTracker::start(Arc::clone(&store), 1, Duration::from_secs(3600));

        std::thread::sleep(Duration::from_millis(1200));
        tracker.stop();

        let spent = store.snapshot().level(1).unwrap().time_spent;
        assert!(spent >= 1, "teardown must flush the partial interval");
    }

    #[test]
    fn test_stop_twice_is_safe() {
        let store = Arc::new(ProgressStore::new(Profile::with_levels(1..=1)));
        let mut tracker = TimeTracker::start(store, 1, Duration::from_secs(3600));
        tracker.stop();
        tracker.stop();
    }
}
