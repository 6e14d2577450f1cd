// DocWatch - core/mod.rs
//
// Core business logic layer: document model, expiry queries, CSV codec.
// Must NOT depend on: store, platform, or the CLI surface.

pub mod codec;
pub mod dates;
pub mod model;
pub mod query;
