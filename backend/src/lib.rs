//! # Anomaly chart data layer
//!
//! Turns alert evaluation and anomaly breakdown payloads into the shapes an
//! anomaly dashboard draws: time series points, anomaly markers, concrete
//! time windows and current vs. baseline dimension comparisons.
//!
//! ## Architecture
//!
//! - [`models`]: payload and chart types, in the dashboard's JSON wire format
//! - [`services`]: pure shaping functions over those types
//! - [`config`]: TOML and environment configuration
//! - [`error`]: the crate's error type
//! - [`http`]: Axum server exposing the services (feature `http-server`)
//!
//! Library code logs through the `log` facade; the server binary installs a
//! `tracing` subscriber.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{VizError, VizResult};
