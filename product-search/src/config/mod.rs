//! Service configuration, logging setup and dependency wiring.

mod dependencies;
mod logging;
mod settings;

pub use dependencies::Dependencies;
pub use logging::init_tracing;
pub use settings::{Config, LogFormat};
