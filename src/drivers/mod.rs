//! Drivers bundled with the facade

pub mod writer;

pub use writer::{new_writer_logger, WriterLogger, WriterOptions, WRITER_DRIVER};

use crate::core::DriverRegistry;

/// Register every bundled driver on `registry`
pub fn register_builtin(registry: &DriverRegistry) {
    registry.register(WRITER_DRIVER, new_writer_logger);
}
