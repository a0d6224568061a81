//! Targeted graph samplers.
//!
//! A [`Sampler`] grows a subgraph of a parent graph by mixing uniform jumps
//! with one of several locally biased spread moves, selected through
//! [`SamplingPolicy`]. Growth state lives in a [`GrowthSession`], so a
//! sampler can be re-targeted with [`Sampler::change_alpha`] and resumed.

mod bfs;
mod driver;
mod forest_fire;
mod materialize;
mod params;
mod policy;
mod rng;
mod session;
mod walk;

pub use self::{
    driver::Sampler,
    params::{AchievedStats, SamplerParams},
    policy::{
        BfsConfig, DEFAULT_BACKWARD_BURN_MULTIPLIER, DEFAULT_FORWARD_BURN_PROBABILITY,
        DEFAULT_RERUN_MAX, ForestFireConfig, SamplingPolicy, WalkConfig, WalkTransition,
    },
    rng::mix_seed,
    session::{GrowthSession, SessionSnapshot},
};

#[cfg(test)]
mod tests;
