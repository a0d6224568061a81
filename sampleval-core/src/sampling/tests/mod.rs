//! Behavioural and property tests for the targeted samplers.

mod bfs;
