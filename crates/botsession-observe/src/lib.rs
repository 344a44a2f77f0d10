//! Observability setup for hosts embedding the session middleware.

pub mod tracing_setup;
