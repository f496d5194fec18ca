//! Structured logging for shelf widget surfaces.
//!
//! This crate provides:
//! - `InstanceId` - Identifier of one mounted widget instance
//! - `StructuredLogger` - Structured logging with instance context
//! - `LogSettings` - Level and format, as read from configuration

mod instance;
mod logging;

pub use instance::*;
pub use logging::*;
