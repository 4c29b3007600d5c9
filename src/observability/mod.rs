//! Observability for the board engine
//!
//! Structured logging setup; the engine's operations emit `tracing` events
//! that callers route through whichever subscriber format fits their
//! deployment.

pub mod logging;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, LogFormat};
