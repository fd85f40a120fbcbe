//! DOM Tree (arena-based allocation)

use crate::{Node, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 is always the document node. Nodes are never deallocated;
/// `detach` only unlinks a subtree from its parent.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(parent.is_valid() && child.is_valid());
        let prev_last = self.nodes[parent.0 as usize].last_child;

        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(node) => (node.parent, node.prev_sibling, node.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Iterate the children of a node in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        std::iter::successors(first.is_valid().then_some(first), move |&cur| {
            let next = self.nodes[cur.0 as usize].next_sibling;
            next.is_valid().then_some(next)
        })
    }

    /// Iterate the ancestors of a node, nearest first, ending at the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&cur| self.parent(cur))
    }

    /// Whether a node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        if id == NodeId::ROOT {
            return true;
        }
        self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// The node itself if it is an element, else its nearest element ancestor
    ///
    /// This is the text-node hop: gestures address elements, never raw text.
    pub fn nearest_element(&self, id: NodeId) -> Option<NodeId> {
        if self.get(id)?.is_element() {
            return Some(id);
        }
        self.ancestors(id).find(|&a| {
            self.get(a).map(|n| n.is_element()).unwrap_or(false)
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        tree.append_child(tree.root(), div);
        tree.append_child(div, a);
        tree.append_child(div, b);

        let kids: Vec<NodeId> = tree.children(div).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree.parent(a), Some(div));
    }

    #[test]
    fn test_detach_disconnects_subtree() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), div);
        tree.append_child(div, span);
        assert!(tree.is_connected(span));

        tree.detach(div);
        assert!(!tree.is_connected(div));
        assert!(!tree.is_connected(span));
        assert_eq!(tree.children(tree.root()).count(), 0);
    }

    #[test]
    fn test_detach_middle_child_relinks_siblings() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        let c = tree.create_element("li");
        tree.append_child(tree.root(), parent);
        for id in [a, b, c] {
            tree.append_child(parent, id);
        }

        tree.detach(b);
        let kids: Vec<NodeId> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, c]);
    }

    #[test]
    fn test_nearest_element_hops_text() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let text = tree.create_text("hello");
        tree.append_child(tree.root(), p);
        tree.append_child(p, text);

        assert_eq!(tree.nearest_element(text), Some(p));
        assert_eq!(tree.nearest_element(p), Some(p));
    }
}
