#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub type Result<T> = std::result::Result<T, error::Error>;
