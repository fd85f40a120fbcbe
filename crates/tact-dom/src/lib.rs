//! Tact DOM - Retained element tree
//!
//! The minimal document model the gesture layer targets: arena-allocated
//! nodes, element attributes and class lists, simple selector queries, and
//! bubbling event dispatch.

mod document;
mod events;
mod node;
mod selector;
mod tree;

pub use document::Document;
pub use events::Event;
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use selector::SimpleSelector;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node is not attached to the document")]
    DetachedNode,

    #[error("node is not an element")]
    NotAnElement,
}
