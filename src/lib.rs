//! Core library for the registrar service: admission evaluation with seat
//! allocation, and transfer-equivalence resolution with class enrollment.
//!
//! Storage and time stay behind the [`workflows`] repository traits and the
//! [`repository::Clock`] seam so the decision logic can be exercised without
//! a database.

pub mod config;
pub mod error;
pub mod repository;
pub mod telemetry;
pub mod workflows;
