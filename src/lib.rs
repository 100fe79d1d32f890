pub mod catalog;
pub mod commands;
pub mod config;
pub mod import;
pub mod media;
pub mod storage;
