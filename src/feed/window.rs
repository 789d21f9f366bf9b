//! # Rolling Window
//!
//! Fixed-capacity, newest-first buffer of readings.

use std::collections::VecDeque;

use crate::reading::Reading;

/// Insertion-ordered buffer that retains the `capacity` most recent
/// readings, newest at the front.
///
/// Ingestion is infallible: prepending at capacity evicts exactly the
/// oldest (back) element. The length never exceeds `capacity`.
///
/// # Examples
///
/// ```
/// use sensor_feed::feed::window::RollingWindow;
/// use sensor_feed::generator::SampleGenerator;
///
/// let mut generator = SampleGenerator::seeded(1);
/// let mut window = RollingWindow::new(3);
///
/// for _ in 0..5 {
///     window.ingest(generator.generate());
/// }
/// assert_eq!(window.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    entries: VecDeque<Reading>,
}

impl RollingWindow {
    /// Creates an empty window retaining at most `capacity` readings.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Prepends a reading, evicting the oldest entry when full.
    pub fn ingest(&mut self, reading: Reading) {
        self.entries.push_front(reading);
        self.entries.truncate(self.capacity);
    }

    /// Returns an owned copy of the current contents, newest-first.
    ///
    /// Callers hold an immutable snapshot; later ingests never mutate
    /// a snapshot already handed out.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Reading> {
        self.entries.iter().cloned().collect()
    }

    /// Number of readings currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of readings retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SampleGenerator;

    #[test]
    fn test_new_window_is_empty() {
        let window = RollingWindow::new(20);
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert_eq!(window.capacity(), 20);
    }

    #[test]
    fn test_length_is_bounded() {
        let mut generator = SampleGenerator::seeded(11);
        let mut window = RollingWindow::new(20);

        for i in 1..=50 {
            window.ingest(generator.generate());
            assert!(window.len() <= 20);
            assert_eq!(window.len(), i.min(20));
        }
    }

    #[test]
    fn test_newest_first_order() {
        let mut generator = SampleGenerator::seeded(12);
        let mut window = RollingWindow::new(5);
        let mut ids = Vec::new();

        for _ in 0..5 {
            let reading = generator.generate();
            ids.push(reading.id.clone());
            window.ingest(reading);
        }

        let snapshot = window.snapshot();
        ids.reverse();
        let snapshot_ids: Vec<_> = snapshot.iter().map(|r| r.id.clone()).collect();
        assert_eq!(snapshot_ids, ids);

        for pair in snapshot.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn test_eviction_drops_exactly_the_oldest() {
        let mut generator = SampleGenerator::seeded(13);
        let mut window = RollingWindow::new(3);

        let readings: Vec<_> = (0..4).map(|_| generator.generate()).collect();
        for reading in &readings[..3] {
            window.ingest(reading.clone());
        }

        let before = window.snapshot();
        window.ingest(readings[3].clone());
        let after = window.snapshot();

        assert_eq!(after.len(), 3);
        // New reading at the front
        assert_eq!(after[0].id, readings[3].id);
        // Oldest gone, survivors keep their relative order
        assert_eq!(after[1].id, before[0].id);
        assert_eq!(after[2].id, before[1].id);
        assert!(!after.iter().any(|r| r.id == before[2].id));
    }

    #[test]
    fn test_snapshot_is_immutable_copy() {
        let mut generator = SampleGenerator::seeded(14);
        let mut window = RollingWindow::new(2);

        window.ingest(generator.generate());
        let snapshot = window.snapshot();
        window.ingest(generator.generate());
        window.ingest(generator.generate());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_capacity_one() {
        let mut generator = SampleGenerator::seeded(15);
        let mut window = RollingWindow::new(1);

        for _ in 0..3 {
            let reading = generator.generate();
            let id = reading.id.clone();
            window.ingest(reading);
            assert_eq!(window.len(), 1);
            assert_eq!(window.snapshot()[0].id, id);
        }
    }
}
