pub mod config;
pub mod error;
pub mod purge;
pub mod storage;
