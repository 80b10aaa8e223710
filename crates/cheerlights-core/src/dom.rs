//! Minimal tagged-element document.
//!
//! Stands in for the host page: elements carry class markers, and a poll
//! result is written to every element carrying the color-sink or
//! update-sink marker. The document is externally owned; the poller only
//! writes to it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::types::ColorUpdate;

/// Marker for elements whose background color tracks the latest color.
pub const COLOR_SINK_CLASS: &str = "cheerlightsColor";

/// Marker for elements whose text shows the latest color and update time.
pub const UPDATE_SINK_CLASS: &str = "cheerlightsUpdate";

/// Render `"<color> <timestamp>"` with a browser `Date`-style timestamp.
///
/// ```text
/// ("red", 2026-10-16T12:00:00Z) -> "red Fri Oct 16 2026 12:00:00 GMT+0000"
/// ```
pub fn format_update_text(color: &str, at: DateTime<Utc>) -> String {
    format!("{color} {}", at.format("%a %b %d %Y %H:%M:%S GMT%z"))
}

// ─── Element ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    classes: BTreeSet<String>,
    pub background_color: Option<String>,
    pub text: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: BTreeSet::new(),
            background_color: None,
            text: String::new(),
        }
    }

    /// Element tagged as a color sink.
    pub fn color_sink(id: impl Into<String>) -> Self {
        Self::new(id).with_class(COLOR_SINK_CLASS)
    }

    /// Element tagged as an update sink.
    pub fn update_sink(id: impl Into<String>) -> Self {
        Self::new(id).with_class(UPDATE_SINK_CLASS)
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

// ─── Document ───────────────────────────────────────────────────────

/// Ordered collection of elements, queried by class marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with one color sink and one update sink.
    pub fn with_default_sinks() -> Self {
        let mut doc = Self::new();
        doc.add(Element::color_sink("swatch"));
        doc.add(Element::update_sink("status"));
        doc
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All elements carrying `class`, in document order.
    pub fn select<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.has_class(class))
    }

    pub fn select_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements.iter_mut().filter(move |e| e.has_class(class))
    }

    /// Write `update` into every sink. Returns the number of writes.
    ///
    /// An element tagged with both markers receives both writes.
    pub fn apply(&mut self, update: &ColorUpdate) -> usize {
        let mut written = 0;

        for element in self.select_mut(COLOR_SINK_CLASS) {
            element.background_color = Some(update.color.clone());
            written += 1;
        }

        let text = update.update_text();
        for element in self.select_mut(UPDATE_SINK_CLASS) {
            element.text.clone_from(&text);
            written += 1;
        }

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid datetime")
    }

    fn page() -> Document {
        let mut doc = Document::new();
        doc.add(Element::color_sink("a"));
        doc.add(Element::color_sink("b"));
        doc.add(Element::update_sink("c"));
        doc.add(Element::new("plain").with_text("untouched"));
        doc
    }

    #[test]
    fn format_matches_browser_date_style() {
        assert_eq!(
            format_update_text("red", ts()),
            "red Fri Oct 16 2026 12:00:00 GMT+0000"
        );
    }

    #[test]
    fn apply_writes_every_sink() {
        let mut doc = page();
        let written = doc.apply(&ColorUpdate::new("red", ts()));
        assert_eq!(written, 3);

        for e in doc.select(COLOR_SINK_CLASS) {
            assert_eq!(e.background_color.as_deref(), Some("red"));
        }
        let status = doc.get("c").expect("update sink");
        assert!(status.text.contains("red"));
        assert!(status.text.contains("2026"));
    }

    #[test]
    fn apply_leaves_untagged_elements_alone() {
        let mut doc = page();
        doc.apply(&ColorUpdate::new("blue", ts()));
        let plain = doc.get("plain").expect("plain element");
        assert_eq!(plain.text, "untouched");
        assert!(plain.background_color.is_none());
    }

    #[test]
    fn color_is_passed_through_verbatim() {
        let mut doc = page();
        doc.apply(&ColorUpdate::new("#FF00FF\n", ts()));
        let a = doc.get("a").expect("color sink");
        assert_eq!(a.background_color.as_deref(), Some("#FF00FF\n"));
    }

    #[test]
    fn element_with_both_markers_gets_both_writes() {
        let mut doc = Document::new();
        doc.add(Element::color_sink("both").with_class(UPDATE_SINK_CLASS));
        assert_eq!(doc.apply(&ColorUpdate::new("green", ts())), 2);
        let both = doc.get("both").expect("element");
        assert_eq!(both.background_color.as_deref(), Some("green"));
        assert!(both.text.starts_with("green "));
    }

    #[test]
    fn empty_document_is_noop() {
        let mut doc = Document::new();
        assert_eq!(doc.apply(&ColorUpdate::new("red", ts())), 0);
    }

    #[test]
    fn default_sinks_layout() {
        let doc = Document::with_default_sinks();
        assert_eq!(doc.select(COLOR_SINK_CLASS).count(), 1);
        assert_eq!(doc.select(UPDATE_SINK_CLASS).count(), 1);
    }
}
