pub mod ai_provider;
pub mod cli;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod generator;
pub mod interactive;
pub mod report;
