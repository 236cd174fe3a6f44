pub mod analyzer;
pub mod application;
pub mod charts;
pub mod error;
pub mod filters;
pub mod loader;
pub mod metrics;
pub mod record;
