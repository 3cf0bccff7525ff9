//! Fleet telemetry simulation service.
//!
//! The [`domain`] layer holds the deterministic engine (profile resolution,
//! duty cycle, step function, sliding window, heat grids). The
//! [`application`] layer runs one engine per view on a tokio timer, and
//! [`infrastructure`] / [`presentation`] expose it over HTTP.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
