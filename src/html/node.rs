//! Arena storage behind [`super::Document`].
//!
//! Elements and text runs live in two `Vec`s owned by the document. Children
//! are listed by id; the parent link is a plain index as well, so ownership
//! only ever flows downward.

use std::collections::BTreeMap;

use super::{Document, Element, Text};

/// Index of a node inside its document's element or text arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildId {
    Element(NodeId),
    Text(NodeId),
}

/// Where an element hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParentSlot {
    Document,
    Element(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) children: Vec<ChildId>,
    pub(crate) parent: ParentSlot,
}

#[derive(Debug, Clone)]
pub(crate) struct TextData {
    pub(crate) text: String,
    pub(crate) parent: NodeId,
}

/// The owner of an element: the document itself or another element.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    /// Top-level element of the document.
    Document(&'a Document),
    /// Nested element.
    Element(Element<'a>),
}

impl PartialEq for Parent<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Document(a), Self::Document(b)) => std::ptr::eq(*a, *b),
            (Self::Element(a), Self::Element(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Parent<'_> {}

impl Parent<'_> {
    /// 1-based position of `id` among this parent's children, as used by
    /// `:nth-child`.
    pub(crate) fn nth_child_of(self, id: ChildId) -> usize {
        let position = match self {
            Self::Document(document) => match id {
                ChildId::Element(element) => {
                    document.roots.iter().position(|&root| root == element)
                }
                ChildId::Text(_) => None,
            },
            Self::Element(element) => element
                .data()
                .children
                .iter()
                .position(|&child| child == id),
        };
        position.map_or(0, |index| index + 1)
    }
}

/// A node that can sit in an element's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a> {
    /// An element.
    Element(Element<'a>),
    /// A trimmed, non-empty text run.
    Text(Text<'a>),
}

impl<'a> Child<'a> {
    pub(crate) fn resolve(document: &'a Document, id: ChildId) -> Self {
        match id {
            ChildId::Element(id) => Self::Element(Element::new(document, id)),
            ChildId::Text(id) => Self::Text(Text::new(document, id)),
        }
    }

    /// The element, if this child is one.
    #[must_use]
    pub fn as_element(self) -> Option<Element<'a>> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// The text node, if this child is one.
    #[must_use]
    pub fn as_text(self) -> Option<Text<'a>> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// Text content: the element's joined text or the text node's value.
    #[must_use]
    pub fn text(self) -> String {
        match self {
            Self::Element(element) => element.text(),
            Self::Text(text) => text.text().to_string(),
        }
    }

    /// Direct children; text nodes have none.
    #[must_use]
    pub fn children(self) -> Vec<Child<'a>> {
        match self {
            Self::Element(element) => element.children().collect(),
            Self::Text(_) => Vec::new(),
        }
    }

    /// Pretty-printed markup for this child.
    #[must_use]
    pub fn pretty_print(self, indent: usize) -> String {
        match self {
            Self::Element(element) => element.pretty_print(indent),
            Self::Text(text) => text.pretty_print(indent),
        }
    }
}
