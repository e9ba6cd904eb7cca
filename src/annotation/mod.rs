pub mod engine;

pub use engine::{find_marker, inject, unlink};
