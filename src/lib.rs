// DocWatch - lib.rs
//
// Library entry point, exposing all non-CLI modules for integration testing
// and potential future programmatic use.

pub mod core;
pub mod platform;
pub mod store;
pub mod util;
