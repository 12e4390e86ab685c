pub mod audit;
pub mod determinism;
pub mod schedule;

pub mod error;
