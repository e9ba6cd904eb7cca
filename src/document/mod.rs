pub mod node;
pub mod range;
pub mod tree;

pub use node::{ElementNode, MarkerAttrs, Node, NodeId, NodeKind};
pub use range::{CapturedRange, Position};
pub use tree::DocumentTree;
