#![forbid(unsafe_code)]

//! Attribute-driven translation for `localizable`.
//!
//! Walks an element tree, finds elements carrying the key attribute
//! (default `data-translate-key`), translates the key with the parameters
//! from the params attribute (default `data-translate-params`, comma
//! separated) and writes the result as the element's content.
//!
//! The tree is reached through the [`Element`] trait so any host node type
//! can be driven; [`MemoryElement`] is an owned tree for hosts without one
//! and for tests.

pub mod element;
pub mod sync;

pub use element::{Element, MemoryElement, walk_descendants};
pub use sync::{DocumentSync, split_params};
