//! Text handles.

use std::fmt;

use super::element::SelectorRoot;
use super::node::{ChildId, TextData};
use super::{Document, Element, NodeId, Parent};

/// A borrowed, trimmed, non-empty text run of a [`Document`].
#[derive(Clone, Copy)]
pub struct Text<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> Text<'a> {
    pub(crate) fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    fn data(self) -> &'a TextData {
        &self.document.texts[self.id.0]
    }

    /// Arena id of this text node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The trimmed text.
    #[must_use]
    pub fn text(self) -> &'a str {
        &self.data().text
    }

    /// The element containing this text.
    #[must_use]
    pub fn parent(self) -> Element<'a> {
        Element::new(self.document, self.data().parent)
    }

    /// CSS-style path ending in `#text:nth-child(i)`.
    #[must_use]
    pub fn selector(self, from: Option<SelectorRoot<'_>>) -> String {
        let parent = self.parent();
        let index = Parent::Element(parent).nth_child_of(ChildId::Text(self.id));
        format!("{} > #text:nth-child({index})", parent.selector(from))
    }

    /// The text with every line indented.
    #[must_use]
    pub fn pretty_print(self, indent: usize) -> String {
        let prefix = " ".repeat(indent);
        self.text()
            .lines()
            .map(|line| format!("{prefix}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PartialEq for Text<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Text<'_> {}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Text").field(&self.text()).finish()
    }
}
