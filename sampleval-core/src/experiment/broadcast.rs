//! Publish-once broadcast of population metrics.
//!
//! The payload lives in a [`OnceLock`]. Subscribers block on a channel that
//! never carries a message: the publisher owns its only sender and drops it
//! after filling the lock, so every blocked subscriber wakes at once and
//! finds the payload in place. A publisher dropped without publishing wakes
//! subscribers with an empty lock.

use std::{
    sync::{Arc, OnceLock},
    time::Instant,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::warn;

use crate::error::ExperimentError;

/// Creates a linked publisher and subscriber.
#[must_use]
pub fn population_channel<T>() -> (PopulationPublisher<T>, PopulationSubscriber<T>) {
    let slot = Arc::new(OnceLock::new());
    let (sender, receiver) = bounded(0);
    (
        PopulationPublisher {
            slot: Arc::clone(&slot),
            _sender: sender,
        },
        PopulationSubscriber { slot, receiver },
    )
}

/// Write side of the broadcast. Publishing consumes it.
#[derive(Debug)]
pub struct PopulationPublisher<T> {
    slot: Arc<OnceLock<Arc<T>>>,
    _sender: Sender<()>,
}

impl<T> PopulationPublisher<T> {
    /// Stores `value` and wakes every subscriber.
    pub fn publish(self, value: T) {
        if self.slot.set(Arc::new(value)).is_err() {
            warn!("population already published; keeping the first value");
        }
    }
}

/// Read side of the broadcast. Cheap to clone.
#[derive(Debug)]
pub struct PopulationSubscriber<T> {
    slot: Arc<OnceLock<Arc<T>>>,
    receiver: Receiver<()>,
}

impl<T> Clone for PopulationSubscriber<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> PopulationSubscriber<T> {
    /// Returns the payload if it has been published.
    #[must_use]
    pub fn try_get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    /// Blocks until the payload is published or `deadline` passes.
    ///
    /// # Errors
    /// Returns [`ExperimentError::DeadlineExceeded`] when the deadline passes
    /// first and [`ExperimentError::PopulationUnavailable`] when the publisher
    /// was dropped without publishing.
    pub fn wait(&self, deadline: Instant) -> Result<Arc<T>, ExperimentError> {
        if let Some(value) = self.try_get() {
            return Ok(value);
        }
        match self.receiver.recv_deadline(deadline) {
            Err(RecvTimeoutError::Timeout) => Err(ExperimentError::DeadlineExceeded),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => self
                .try_get()
                .ok_or(ExperimentError::PopulationUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    fn soon() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[test]
    fn every_subscriber_sees_the_published_value() {
        let (publisher, subscriber) = population_channel();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let subscriber = subscriber.clone();
                thread::spawn(move || subscriber.wait(soon()).map(|value| *value))
            })
            .collect();
        publisher.publish(42_u32);
        for reader in readers {
            assert_eq!(reader.join().expect("reader thread").expect("published"), 42);
        }
        assert_eq!(subscriber.try_get().as_deref(), Some(&42));
    }

    #[test]
    fn dropping_the_publisher_wakes_subscribers_with_an_error() {
        let (publisher, subscriber) = population_channel::<u32>();
        let reader = thread::spawn(move || subscriber.wait(soon()));
        drop(publisher);
        let err = reader
            .join()
            .expect("reader thread")
            .expect_err("nothing was published");
        assert!(matches!(err, ExperimentError::PopulationUnavailable));
    }

    #[test]
    fn waiting_past_the_deadline_times_out() {
        let (_publisher, subscriber) = population_channel::<u32>();
        let err = subscriber
            .wait(Instant::now() + Duration::from_millis(10))
            .expect_err("nothing was published");
        assert_eq!(err.code().as_str(), "EXPERIMENT_DEADLINE_EXCEEDED");
    }
}
