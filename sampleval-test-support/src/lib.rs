//! Shared test utilities used across sampleval crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so suites can assert
//! on instrumentation, and [`property_profile::ProptestRunProfile`] reads the
//! environment overrides every property suite honours.

pub mod property_profile;
pub mod tracing;
