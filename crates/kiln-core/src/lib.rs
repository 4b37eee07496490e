//! Core types, component trees, and naming utilities for kiln.
//!
//! This crate provides the foundational types shared by every other kiln crate:
//! - Component tree nodes as read from JSON definition files
//! - Interface descriptions extracted from type-declaration text
//! - Resolved trees, where placeholders became property references
//! - Naming-convention transforms
//! - Error types

pub mod errors;
pub mod interface;
pub mod naming;
pub mod node;
pub mod resolved;

pub use errors::*;
pub use interface::*;
pub use node::*;
pub use resolved::*;
