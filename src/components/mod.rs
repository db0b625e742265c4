pub mod app;
pub mod play_controls;
pub mod review_table;
pub mod spectrogram;
pub mod toolbar;
