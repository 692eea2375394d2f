pub mod config;
pub mod misc;
