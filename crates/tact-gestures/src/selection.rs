//! Selection guard
//!
//! Toggles a marker class that suppresses text selection, so swipe-enabled
//! regions do not select their text while being dragged. Independent of the
//! recognizer; callers invoke it directly.

use tact_dom::Document;

use crate::emitter::EventTarget;

/// Class marking elements (and the stylesheet node) for selection suppression
pub const MARKER_CLASS: &str = "disable-user-select";

const RULE_TEXT: &str = ".disable-user-select, .disable-user-select * \
{ user-select: none; -webkit-user-select: none; -ms-user-select: none; }";

/// Disable text selection on a target.
///
/// With `all` set and a selector target, every match is marked; otherwise
/// only the first match (or the node itself). Also guarantees, idempotently,
/// that the single global stylesheet rule for the marker class exists in
/// `<head>`. A falsy (empty-selector) target is a no-op.
pub fn disable_text_selection<'a>(
    doc: &mut Document,
    target: impl Into<EventTarget<'a>>,
    all: bool,
) {
    let target = target.into();
    if let EventTarget::Selector("") = target {
        return;
    }

    for id in resolve(doc, target, all) {
        if let Some(element) = doc.element_mut(id) {
            element.add_class(MARKER_CLASS);
        }
    }
    ensure_stylesheet(doc);
}

/// Re-enable text selection on a target previously disabled.
///
/// Unresolved targets are a no-op. The global stylesheet rule is left in
/// place; it only affects elements carrying the marker class.
pub fn enable_text_selection<'a>(
    doc: &mut Document,
    target: impl Into<EventTarget<'a>>,
    all: bool,
) {
    for id in resolve(doc, target.into(), all) {
        if let Some(element) = doc.element_mut(id) {
            element.remove_class(MARKER_CLASS);
        }
    }
}

fn resolve(doc: &Document, target: EventTarget<'_>, all: bool) -> Vec<tact_dom::NodeId> {
    match target {
        EventTarget::Node(id) => vec![id],
        EventTarget::Selector(selector) if all => doc.query_selector_all(selector),
        EventTarget::Selector(selector) => doc.query_selector(selector).into_iter().collect(),
    }
}

/// Create the suppression stylesheet in `<head>` at most once
fn ensure_stylesheet(doc: &mut Document) {
    let head = doc.head();
    let exists = doc.tree().children(head).any(|child| {
        doc.element(child)
            .map(|e| e.tag_name == "style" && e.has_class(MARKER_CLASS))
            .unwrap_or(false)
    });
    if exists {
        return;
    }

    tracing::debug!("creating text-selection suppression stylesheet");
    let style = doc.create_element_in("style", head);
    if let Some(element) = doc.element_mut(style) {
        element.add_class(MARKER_CLASS);
    }
    doc.create_text_in(RULE_TEXT, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stylesheet_count(doc: &Document) -> usize {
        doc.tree()
            .children(doc.head())
            .filter(|&c| {
                doc.element(c)
                    .map(|e| e.tag_name == "style" && e.has_class(MARKER_CLASS))
                    .unwrap_or(false)
            })
            .count()
    }

    #[test]
    fn test_disable_is_idempotent() {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());
        doc.element_mut(el).unwrap().set_attr("id", "zone");

        disable_text_selection(&mut doc, "#zone", false);
        disable_text_selection(&mut doc, "#zone", false);

        assert_eq!(stylesheet_count(&doc), 1);
        let classes = &doc.element(el).unwrap().classes;
        assert_eq!(
            classes.iter().filter(|c| *c == MARKER_CLASS).count(),
            1
        );
    }

    #[test]
    fn test_disable_all_matches() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element_in("div", body);
        let b = doc.create_element_in("div", body);
        for id in [a, b] {
            doc.element_mut(id).unwrap().set_attr("class", "pane");
        }

        disable_text_selection(&mut doc, ".pane", true);
        assert!(doc.element(a).unwrap().has_class(MARKER_CLASS));
        assert!(doc.element(b).unwrap().has_class(MARKER_CLASS));
    }

    #[test]
    fn test_disable_first_match_only() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element_in("div", body);
        let b = doc.create_element_in("div", body);
        for id in [a, b] {
            doc.element_mut(id).unwrap().set_attr("class", "pane");
        }

        disable_text_selection(&mut doc, ".pane", false);
        assert!(doc.element(a).unwrap().has_class(MARKER_CLASS));
        assert!(!doc.element(b).unwrap().has_class(MARKER_CLASS));
    }

    #[test]
    fn test_enable_removes_marker() {
        let mut doc = Document::new();
        let el = doc.create_element_in("div", doc.body());
        disable_text_selection(&mut doc, el, false);
        assert!(doc.element(el).unwrap().has_class(MARKER_CLASS));

        enable_text_selection(&mut doc, el, false);
        assert!(!doc.element(el).unwrap().has_class(MARKER_CLASS));
        // the global rule stays
        assert_eq!(stylesheet_count(&doc), 1);
    }

    #[test]
    fn test_falsy_target_is_noop() {
        let mut doc = Document::new();
        disable_text_selection(&mut doc, "", false);
        assert_eq!(stylesheet_count(&doc), 0);
    }

    #[test]
    fn test_enable_unresolved_is_noop() {
        let mut doc = Document::new();
        enable_text_selection(&mut doc, "#missing", false);
        assert_eq!(stylesheet_count(&doc), 0);
    }
}
