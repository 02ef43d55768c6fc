//! Browser-facing viewer: page rendering and HTTP handlers.

pub mod handlers;
pub mod page;
