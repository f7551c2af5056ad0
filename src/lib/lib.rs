pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod service;
pub mod storage;
