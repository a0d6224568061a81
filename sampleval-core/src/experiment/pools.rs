//! Priority tiers mapped onto dedicated rayon pools.

use std::{num::NonZeroUsize, sync::Arc, thread};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::error;

use crate::error::ExperimentError;

/// Thread counts for the three worker tiers.
///
/// The population tier computes exhaustive metrics on the parent graph, the
/// samples tier runs sampler jobs and the bookkeeping tier hosts slower
/// sibling analyzers.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use sampleval_core::PoolTiers;
///
/// let one = NonZeroUsize::MIN;
/// let tiers = PoolTiers::uniform(one);
/// assert_eq!(tiers.samples(), one);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolTiers {
    population: NonZeroUsize,
    samples: NonZeroUsize,
    bookkeeping: NonZeroUsize,
}

impl Default for PoolTiers {
    fn default() -> Self {
        let available = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let tier = |threads: usize| NonZeroUsize::new(threads).unwrap_or(NonZeroUsize::MIN);
        Self {
            population: tier(available),
            samples: tier(available.div_ceil(2)),
            bookkeeping: tier(available.div_ceil(4)),
        }
    }
}

impl PoolTiers {
    /// Sets explicit thread counts per tier.
    #[must_use]
    pub const fn new(
        population: NonZeroUsize,
        samples: NonZeroUsize,
        bookkeeping: NonZeroUsize,
    ) -> Self {
        Self {
            population,
            samples,
            bookkeeping,
        }
    }

    /// Gives every tier the same thread count.
    #[must_use]
    pub const fn uniform(threads: NonZeroUsize) -> Self {
        Self::new(threads, threads, threads)
    }

    /// Threads computing population metrics.
    #[must_use]
    pub const fn population(&self) -> NonZeroUsize {
        self.population
    }

    /// Threads running sampler jobs.
    #[must_use]
    pub const fn samples(&self) -> NonZeroUsize {
        self.samples
    }

    /// Threads running sibling analyzers.
    #[must_use]
    pub const fn bookkeeping(&self) -> NonZeroUsize {
        self.bookkeeping
    }

    pub(super) fn build(&self) -> Result<Pools, ExperimentError> {
        Ok(Pools {
            population: build_pool("population", self.population)?,
            samples: build_pool("samples", self.samples)?,
            bookkeeping: build_pool("bookkeeping", self.bookkeeping)?,
        })
    }
}

/// Live pools for one experiment run.
pub(super) struct Pools {
    pub(super) population: Arc<ThreadPool>,
    pub(super) samples: Arc<ThreadPool>,
    pub(super) bookkeeping: Arc<ThreadPool>,
}

pub(super) fn build_pool(
    tier: &'static str,
    threads: NonZeroUsize,
) -> Result<Arc<ThreadPool>, ExperimentError> {
    ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(move |index| format!("sampleval-{tier}-{index}"))
        // A panicking job drops its result sender; the collector reports it.
        .panic_handler(move |_| error!(tier, "worker panicked"))
        .build()
        .map(Arc::new)
        .map_err(|err| ExperimentError::PoolBuild {
            tier,
            reason: err.to_string(),
        })
}
