pub mod kernel;
pub mod config;
pub mod services;
pub mod server;

// Convenience re-exports
pub use kernel::dispatch::{DialogueConfig, Dispatcher};
pub use kernel::template::ResponseTemplates;
