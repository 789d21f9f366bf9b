//! # Live Feed Module
//!
//! The lifecycle object behind the viewer: owns the rolling window, the
//! sample generator and the periodic producer task.
//!
//! ## Lifecycle
//!
//! A [`Feed`] starts *empty*. [`Feed::initialize`] seeds the window with a
//! configured backlog and spawns a tokio interval task that generates and
//! ingests one reading per tick; the feed is then *active* until
//! [`Feed::teardown`]. Teardown is unconditional and idempotent, and also
//! runs on drop so an abruptly discarded feed never leaks its timer.
//!
//! ## Snapshot handoff
//!
//! Each tick performs generate + ingest + publish under one lock
//! acquisition, then sends an owned snapshot through a `watch` channel.
//! Readers only ever hold complete snapshots; a torn (partially ingested)
//! window is never observable.

pub mod window;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Config;
use crate::generator::SampleGenerator;
use crate::reading::Reading;
use self::window::RollingWindow;

/// Window plus its generator, guarded as one unit so a tick is atomic
/// from any reader's point of view.
struct FeedState {
    window: RollingWindow,
    generator: SampleGenerator,
}

/// Bounded live feed of synthesized sensor readings.
///
/// Exactly one writer exists (the spawned interval task); readers consume
/// owned snapshots via [`Feed::current_view`] or [`Feed::subscribe`].
///
/// # Examples
///
/// ```no_run
/// use sensor_feed::config::Config;
/// use sensor_feed::feed::Feed;
/// use sensor_feed::generator::SampleGenerator;
///
/// # async fn run() {
/// let config = Config::default();
/// let mut feed = Feed::new(&config, SampleGenerator::from_entropy());
/// feed.initialize();
///
/// let mut updates = feed.subscribe();
/// updates.changed().await.unwrap();
/// println!("{} readings", updates.borrow().len());
///
/// feed.teardown();
/// # }
/// ```
pub struct Feed {
    state: Arc<Mutex<FeedState>>,
    stopped: Arc<AtomicBool>,
    updates_tx: watch::Sender<Vec<Reading>>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    seed_count: usize,
    tick_interval: Duration,
}

impl Feed {
    /// Creates an empty feed; no timer runs until [`Feed::initialize`].
    #[must_use]
    pub fn new(config: &Config, generator: SampleGenerator) -> Self {
        let state = FeedState {
            window: RollingWindow::new(config.feed.window_capacity),
            generator,
        };
        let (updates_tx, _) = watch::channel(Vec::new());
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            state: Arc::new(Mutex::new(state)),
            stopped: Arc::new(AtomicBool::new(false)),
            updates_tx,
            shutdown_tx,
            task: None,
            seed_count: config.feed.seed_count,
            tick_interval: Duration::from_millis(config.feed.tick_interval_ms),
        }
    }

    /// Seeds the window and starts the periodic producer.
    ///
    /// Ingests `seed_count` freshly generated readings, publishes the first
    /// snapshot and spawns the interval task. Calling this on an already
    /// active (or torn down) feed is a no-op.
    pub fn initialize(&mut self) {
        if self.task.is_some() || self.stopped.load(Ordering::SeqCst) {
            return;
        }

        let snapshot = {
            let mut state = lock_state(&self.state);
            for _ in 0..self.seed_count {
                let reading = state.generator.generate();
                state.window.ingest(reading);
            }
            state.window.snapshot()
        };
        // send_replace stores the snapshot even before anyone subscribes
        let _ = self.updates_tx.send_replace(snapshot);

        info!(
            seed_count = self.seed_count,
            interval_ms = self.tick_interval.as_millis() as u64,
            "feed initialized, starting producer"
        );

        let state = Arc::clone(&self.state);
        let stopped = Arc::clone(&self.stopped);
        let updates_tx = self.updates_tx.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let tick_interval = self.tick_interval;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the seed batch already
            // covers that instant.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !Self::tick_once(&state, &stopped, &updates_tx) {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("producer received shutdown signal");
                        break;
                    }
                }
            }
        }));
    }

    /// One producer step: generate, ingest, publish.
    ///
    /// Returns `false` without touching the window when the feed has been
    /// torn down, so a late timer firing is a silent no-op.
    fn tick_once(
        state: &Mutex<FeedState>,
        stopped: &AtomicBool,
        updates_tx: &watch::Sender<Vec<Reading>>,
    ) -> bool {
        if stopped.load(Ordering::SeqCst) {
            return false;
        }

        let snapshot = {
            let mut state = lock_state(state);
            let reading = state.generator.generate();
            debug!(id = %reading.id, "ingesting reading");
            state.window.ingest(reading);
            state.window.snapshot()
        };
        let _ = updates_tx.send_replace(snapshot);
        true
    }

    /// Returns the present window contents, newest-first.
    #[must_use]
    pub fn current_view(&self) -> Vec<Reading> {
        lock_state(&self.state).window.snapshot()
    }

    /// Subscribes a display collaborator to snapshot updates.
    ///
    /// The receiver's current value is the latest published snapshot; every
    /// subsequent ingest publishes a new one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Reading>> {
        self.updates_tx.subscribe()
    }

    /// Whether the feed has been initialized and not yet torn down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.is_some() && !self.stopped.load(Ordering::SeqCst)
    }

    /// Stops the periodic producer and releases its timer.
    ///
    /// Unconditional and idempotent: safe to call before initialization,
    /// after a previous teardown, or with a tick in flight. Any timer
    /// firing that races with teardown is dropped without ingesting.
    pub fn teardown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send_replace(true);

        if let Some(task) = self.task.take() {
            task.abort();
            info!("feed torn down, producer stopped");
        }
    }
}

impl Drop for Feed {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Locks the feed state, recovering from a poisoned mutex.
///
/// Ticks never panic while holding the lock, but a reader unwinding in a
/// test must not wedge the producer.
fn lock_state(state: &Mutex<FeedState>) -> std::sync::MutexGuard<'_, FeedState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
