//! Core of the "today's classes" home screen widget.
//!
//! Projects the stored course list onto the current day and answers the
//! host's exact-alarm capability queries.

pub mod alarm;
pub mod channel;
pub mod config;
pub mod course;
pub mod server;
pub mod store;
pub mod types;
