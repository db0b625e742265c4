//! Browser side of the review page: host bridge, DOM table, timers, storage.

pub mod bridge;
pub mod download;
pub mod poll;
pub mod session;
pub mod storage;
pub mod table;
pub mod timers;
