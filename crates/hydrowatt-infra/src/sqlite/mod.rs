//! SQLite storage: the split reader/writer pool and the usage source.

pub mod pool;
pub mod usage;
