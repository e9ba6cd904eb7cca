//! lexnote: the document core of a spaced-repetition vocabulary notebook.
//!
//! The heart of the crate is a pair of operations over an explicit tree of
//! editable blocks: resolving a captured text selection into its enclosing
//! sentence ([`selection`]), and replacing the selected range with a
//! persistent, re-clickable term marker ([`annotation`]). Around that core
//! sit the term and lesson stores, the dictionary lookup, SM-2 practice
//! scheduling, and per-session recall grading. All rendering, routing and
//! authentication belong to the containing editor.

pub mod annotation;
pub mod document;
pub mod review;
pub mod selection;
pub mod services;
pub mod session;

pub use annotation::{find_marker, inject, unlink};
pub use document::{CapturedRange, DocumentTree, NodeId, Position};
pub use selection::{ResolvedSelection, SelectionSnapshot, resolve_selection};
