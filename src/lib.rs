pub mod config;
pub mod error;
pub mod logger;
pub mod parser;
pub mod report;
pub mod simulator;
pub mod traffic;
