//! Seeded random graph generators.
//!
//! Both models build undirected graphs over vertices `0..nodes`; the same
//! seed always yields the same edge list in the same order.

mod errors;
mod models;

pub use errors::SyntheticError;
pub use models::{GraphModel, barabasi_albert, erdos_renyi};
