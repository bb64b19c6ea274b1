//! Student record access

pub mod ports;

pub use ports::StudentStore;
