pub mod build_mode;
pub mod cli;
pub mod cluster;
pub mod error;
