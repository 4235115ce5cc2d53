// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod history;
pub mod library;
pub mod passage;
pub mod reference;
pub mod runtime;
pub mod verses;
