//! Event emitter
//!
//! Fires a named event on an element and passes it some optional data.

use tact_dom::{Document, DomError, Event, NodeId};

/// Where an event should be dispatched
#[derive(Debug, Clone, Copy)]
pub enum EventTarget<'a> {
    /// A node already resolved by the caller
    Node(NodeId),
    /// First element matching a selector
    Selector(&'a str),
}

impl From<NodeId> for EventTarget<'static> {
    fn from(id: NodeId) -> Self {
        EventTarget::Node(id)
    }
}

impl<'a> From<&'a str> for EventTarget<'a> {
    fn from(selector: &'a str) -> Self {
        EventTarget::Selector(selector)
    }
}

/// Emitter error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("no element matches selector {selector:?}")]
    TargetNotFound { selector: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Synthesize a bubbling, non-cancelable event named `event` on `target`,
/// carrying `data` as its payload, and dispatch it synchronously.
///
/// An empty event name is a caller mistake: it is logged and nothing is
/// dispatched. An unresolved selector target fails fast. Returns the number
/// of listeners invoked.
pub fn trigger<'a>(
    doc: &mut Document,
    target: impl Into<EventTarget<'a>>,
    event: &str,
    data: Option<String>,
) -> Result<usize, TriggerError> {
    if event.is_empty() {
        tracing::error!("no event name was provided; nothing dispatched");
        return Ok(0);
    }

    let node = match target.into() {
        EventTarget::Node(id) => id,
        EventTarget::Selector(selector) => {
            doc.query_selector(selector)
                .ok_or_else(|| TriggerError::TargetNotFound {
                    selector: selector.to_string(),
                })?
        }
    };

    Ok(doc.dispatch(Event::custom(event, node, data))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn doc_with_target() -> (Document, NodeId, Rc<RefCell<Vec<(String, Option<String>)>>>) {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());
        doc.element_mut(el).unwrap().set_attr("id", "zone");

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            doc.add_event_listener(el, "swipe", move |e| {
                seen.borrow_mut().push((e.name.clone(), e.data.clone()));
            });
        }
        (doc, el, seen)
    }

    #[test]
    fn test_trigger_by_node() {
        let (mut doc, el, seen) = doc_with_target();
        let invoked = trigger(&mut doc, el, "swipe", Some("left".to_string())).unwrap();
        assert_eq!(invoked, 1);
        assert_eq!(
            *seen.borrow(),
            vec![("swipe".to_string(), Some("left".to_string()))]
        );
    }

    #[test]
    fn test_trigger_by_selector() {
        let (mut doc, _, seen) = doc_with_target();
        trigger(&mut doc, "#zone", "swipe", None).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_empty_event_name_is_logged_noop() {
        let (mut doc, el, seen) = doc_with_target();
        let invoked = trigger(&mut doc, el, "", None).unwrap();
        assert_eq!(invoked, 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unresolved_selector_fails_fast() {
        let (mut doc, _, _) = doc_with_target();
        let err = trigger(&mut doc, "#missing", "swipe", None).unwrap_err();
        assert_eq!(
            err,
            TriggerError::TargetNotFound {
                selector: "#missing".to_string()
            }
        );
    }

    #[test]
    fn test_detached_target_propagates_dom_error() {
        let (mut doc, el, _) = doc_with_target();
        doc.tree_mut().detach(el);
        let err = trigger(&mut doc, el, "swipe", None).unwrap_err();
        assert_eq!(err, TriggerError::Dom(DomError::DetachedNode));
    }
}
