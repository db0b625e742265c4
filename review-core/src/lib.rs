//! Core of the spectrogram annotation review tool.
//!
//! Maps pointer positions on the spectrogram viewport to time/frequency,
//! hit-tests annotation boxes, and keeps the review table's visual filter in
//! step with clicks, transport changes and table rebuilds. Nothing in here
//! touches the DOM: the table, audio engine, draw engine and timers are traits
//! implemented by the front end (and by fakes in tests).

pub mod collab;
pub mod columns;
pub mod controls;
pub mod debounce;
pub mod error;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod prefs;
pub mod scale;
pub mod session;
pub mod table;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
