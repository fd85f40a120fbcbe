//! Document - High-level document API

use crate::events::ListenerRegistry;
use crate::{DomTree, ElementData, NodeId, SimpleSelector};

/// A document: the tree, the html/head/body skeleton, and event listeners
pub struct Document {
    /// The DOM tree
    pub(crate) tree: DomTree,
    pub(crate) listeners: ListenerRegistry,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            listeners: ListenerRegistry::default(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create an element and append it to `parent`
    pub fn create_element_in(&mut self, tag_name: &str, parent: NodeId) -> NodeId {
        let el = self.tree.create_element(tag_name);
        self.tree.append_child(parent, el);
        el
    }

    /// Create a text node and append it to `parent`
    pub fn create_text_in(&mut self, content: &str, parent: NodeId) -> NodeId {
        let text = self.tree.create_text(content);
        self.tree.append_child(parent, text);
        text
    }

    /// Element data for a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id)?.as_element()
    }

    /// Mutable element data for a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id)?.as_element_mut()
    }

    /// Whether a node is an element with a truthy disabled attribute
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.element(id).map(ElementData::is_disabled).unwrap_or(false)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{id}"))
    }

    /// Query single element by simple selector
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        let mut matches = Vec::new();
        self.collect_matches(self.tree.root(), &selector, true, &mut matches);
        matches.into_iter().next()
    }

    /// Query all elements by simple selector, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let mut matches = Vec::new();
        if let Some(selector) = SimpleSelector::parse(selector) {
            self.collect_matches(self.tree.root(), &selector, false, &mut matches);
        }
        matches
    }

    fn collect_matches(
        &self,
        start: NodeId,
        selector: &SimpleSelector,
        first_only: bool,
        out: &mut Vec<NodeId>,
    ) {
        for child in self.tree.children(start).collect::<Vec<_>>() {
            if let Some(el) = self.element(child) {
                if selector.matches(el) {
                    out.push(child);
                    if first_only {
                        return;
                    }
                }
            }
            self.collect_matches(child, selector, first_only, out);
            if first_only && !out.is_empty() {
                return;
            }
        }
    }

    /// Concatenated text of a node's descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut content = String::new();
        self.append_text(id, &mut content);
        content
    }

    fn append_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.tree.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for child in self.tree.children(id).collect::<Vec<_>>() {
            self.append_text(child, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new();
        assert_eq!(doc.element(doc.head()).unwrap().tag_name, "head");
        assert_eq!(doc.element(doc.body()).unwrap().tag_name, "body");
        assert!(doc.tree().is_connected(doc.body()));
    }

    #[test]
    fn test_query_selector() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = doc.create_element_in("div", body);
        doc.element_mut(div).unwrap().set_attr("id", "main");
        let span = doc.create_element_in("span", div);
        doc.element_mut(span).unwrap().set_attr("class", "hot");

        assert_eq!(doc.query_selector("#main"), Some(div));
        assert_eq!(doc.query_selector(".hot"), Some(span));
        assert_eq!(doc.query_selector("span"), Some(span));
        assert_eq!(doc.query_selector(".missing"), None);
        assert_eq!(doc.get_element_by_id("main"), Some(div));
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element_in("li", body);
        let b = doc.create_element_in("li", body);
        doc.element_mut(a).unwrap().set_attr("class", "item");
        doc.element_mut(b).unwrap().set_attr("class", "item");

        assert_eq!(doc.query_selector_all(".item"), vec![a, b]);
        assert!(doc.query_selector_all(".none").is_empty());
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::new();
        let p = doc.create_element_in("p", doc.body());
        doc.create_text_in("hello ", p);
        let b = doc.create_element_in("b", p);
        doc.create_text_in("world", b);

        assert_eq!(doc.text_content(p), "hello world");
    }
}
