#[macro_use]
extern crate serde_derive;

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod services;
