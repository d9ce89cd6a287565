//! Deterministic turn-based team combat: characters with items fight in order, rounds
//! roll up into best-of-five matches, and bot strategies can be benchmarked against
//! each other in ranked runs.

pub mod bots;
pub mod cli;
pub mod combat;
pub mod data;
pub mod parallel;
pub mod ranked;
