// Utility Module
// Configuration and cancellation shared across the engines

pub mod cancel;
pub mod config;

pub use cancel::CancelToken;
pub use config::CoreConfig;
