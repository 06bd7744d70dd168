//! Rule engine and deal-desk services for a real-estate CRM marketplace.
//!
//! The [`rules`] module holds the pure business rules: commission splits,
//! credit pricing, boost ranking, client match scoring, and agent
//! gamification. The [`desk`] module composes those rules with repository
//! traits over the external data store and exposes them through an HTTP
//! router. Rules never own persistence; the desk is their caller.

pub mod config;
pub mod desk;
pub mod error;
pub mod rules;
pub mod telemetry;
