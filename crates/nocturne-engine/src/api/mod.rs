pub mod config;
pub mod scheduler;
pub mod sky;
