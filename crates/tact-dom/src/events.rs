//! Events
//!
//! Synthesized custom events, the per-node listener registry, and bubbling
//! dispatch.

use std::collections::HashMap;

use crate::{Document, DomError, NodeId};

/// A synthesized event
#[derive(Debug, Clone)]
pub struct Event {
    /// Event name, e.g. `swipe`
    pub name: String,
    /// Node the event was dispatched on
    pub target: NodeId,
    /// Node whose listeners are currently being invoked
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Custom payload attached by the emitter
    pub data: Option<String>,
    propagation_stopped: bool,
}

impl Event {
    /// Create a bubbling, non-cancelable custom event
    pub fn custom(name: &str, target: NodeId, data: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            target,
            current_target: target,
            bubbles: true,
            cancelable: false,
            data,
            propagation_stopped: false,
        }
    }

    /// Stop the event from bubbling further
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Listener registration
struct Listener {
    event: String,
    callback: Box<dyn FnMut(&mut Event)>,
}

/// Event listeners keyed by node
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<NodeId, Vec<Listener>>,
}

impl ListenerRegistry {
    fn invoke(&mut self, node: NodeId, event: &mut Event) -> usize {
        let mut invoked = 0;
        if let Some(list) = self.listeners.get_mut(&node) {
            for listener in list.iter_mut() {
                if listener.event == event.name {
                    (listener.callback)(event);
                    invoked += 1;
                }
            }
        }
        invoked
    }
}

impl Document {
    /// Register a listener for a named event on a node
    pub fn add_event_listener<F>(&mut self, node: NodeId, event: &str, callback: F)
    where
        F: FnMut(&mut Event) + 'static,
    {
        self.listeners
            .listeners
            .entry(node)
            .or_default()
            .push(Listener {
                event: event.to_string(),
                callback: Box::new(callback),
            });
    }

    /// Drop every listener registered on a node
    pub fn remove_event_listeners(&mut self, node: NodeId) {
        self.listeners.listeners.remove(&node);
    }

    /// Dispatch an event to the target's listeners, then bubble to ancestors
    ///
    /// Returns the number of listeners invoked. Dispatching on a node that is
    /// not attached to the document is an error.
    pub fn dispatch(&mut self, mut event: Event) -> Result<usize, DomError> {
        if !self.tree.is_connected(event.target) {
            return Err(DomError::DetachedNode);
        }

        let path: Vec<NodeId> = std::iter::once(event.target)
            .chain(self.tree.ancestors(event.target))
            .collect();

        tracing::trace!("dispatch {} on {:?}", event.name, event.target);
        let mut invoked = 0;
        for node in path {
            event.current_target = node;
            invoked += self.listeners.invoke(node, &mut event);
            if event.is_propagation_stopped() || !event.bubbles {
                break;
            }
        }
        Ok(invoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_bubbling_order() {
        let mut doc = Document::new();
        let outer = doc.create_element_in("div", doc.body());
        let inner = doc.create_element_in("span", outer);

        let seen = Rc::new(RefCell::new(Vec::new()));
        for (node, label) in [(inner, "inner"), (outer, "outer")] {
            let seen = Rc::clone(&seen);
            doc.add_event_listener(node, "tap", move |_| seen.borrow_mut().push(label));
        }

        let invoked = doc.dispatch(Event::custom("tap", inner, None)).unwrap();
        assert_eq!(invoked, 2);
        assert_eq!(*seen.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_stop_propagation() {
        let mut doc = Document::new();
        let outer = doc.create_element_in("div", doc.body());
        let inner = doc.create_element_in("span", outer);

        let outer_hits = Rc::new(RefCell::new(0));
        doc.add_event_listener(inner, "tap", |e| e.stop_propagation());
        {
            let outer_hits = Rc::clone(&outer_hits);
            doc.add_event_listener(outer, "tap", move |_| *outer_hits.borrow_mut() += 1);
        }

        doc.dispatch(Event::custom("tap", inner, None)).unwrap();
        assert_eq!(*outer_hits.borrow(), 0);
    }

    #[test]
    fn test_listener_name_filter() {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());

        let hits = Rc::new(RefCell::new(0));
        {
            let hits = Rc::clone(&hits);
            doc.add_event_listener(el, "swipe", move |_| *hits.borrow_mut() += 1);
        }

        doc.dispatch(Event::custom("tap", el, None)).unwrap();
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_dispatch_on_detached_node_fails() {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());
        doc.tree_mut().detach(el);

        let err = doc.dispatch(Event::custom("tap", el, None)).unwrap_err();
        assert_eq!(err, DomError::DetachedNode);
    }

    #[test]
    fn test_payload_reaches_listener() {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());

        let got = Rc::new(RefCell::new(None));
        {
            let got = Rc::clone(&got);
            doc.add_event_listener(el, "swipe", move |e| {
                *got.borrow_mut() = e.data.clone();
            });
        }

        doc.dispatch(Event::custom("swipe", el, Some("right".to_string())))
            .unwrap();
        assert_eq!(got.borrow().as_deref(), Some("right"));
    }
}
