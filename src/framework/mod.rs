//! Generic actor framework for document collections.
//!
//! This module provides the building blocks the stores are made of: a generic
//! [`ResourceActor`] that owns a collection and serializes access to it, and a
//! [`ResourceClient`] handle that is cloned into every component needing the store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that document types implement to be stored
//! - [`ResourceActor`] - Generic actor that owns one collection
//! - [`ResourceClient`] - Type-safe, cloneable handle to a collection
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
