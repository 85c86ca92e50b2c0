//! Gateway server exposing list screens over HTTP
//!
//! This module provides a `ServerBuilder` that registers:
//! - list, refresh and delete routes for every configured screen
//! - health and screen index routes

pub mod builder;
pub mod handlers;
pub mod registry;
pub mod router;

pub use builder::ServerBuilder;
pub use registry::{ScreenDescriptor, ScreenRegistry};
