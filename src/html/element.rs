//! Element handles.

use std::collections::BTreeMap;
use std::fmt;

use super::node::{ChildId, ElementData, ParentSlot};
use super::select::{self, Selection};
use super::{Child, Document, NodeId, Parent};
use crate::traverse::{unfold_tree, TreeOrder};

/// A borrowed element of a [`Document`].
///
/// Handles are `Copy`. Two handles are equal when they point at the same node
/// of the same document, which is the identity the table reader relies on to
/// recognise colspan duplicates.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> Element<'a> {
    pub(crate) fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    pub(crate) fn data(self) -> &'a ElementData {
        &self.document.elements[self.id.0]
    }

    /// Arena id of this element.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The document this element belongs to.
    #[must_use]
    pub fn document(self) -> &'a Document {
        self.document
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(self) -> &'a str {
        &self.data().tag
    }

    /// All attributes, keyed by (prefix-qualified) name.
    #[must_use]
    pub fn attributes(self) -> &'a BTreeMap<String, String> {
        &self.data().attributes
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name).map(String::as_str)
    }

    /// Leading integer of an attribute value, `None` when absent or when the
    /// value does not start with digits. `"3px"` reads as `3`.
    #[must_use]
    pub fn numeric_attr(self, name: &str) -> Option<i64> {
        self.attr(name).and_then(parse_leading_int)
    }

    /// The element or document owning this element.
    #[must_use]
    pub fn parent(self) -> Parent<'a> {
        match self.data().parent {
            ParentSlot::Document => Parent::Document(self.document),
            ParentSlot::Element(id) => Parent::Element(Element::new(self.document, id)),
        }
    }

    /// Direct children in source order.
    pub fn children(self) -> impl Iterator<Item = Child<'a>> + 'a {
        let document = self.document;
        self.data()
            .children
            .iter()
            .map(move |&id| Child::resolve(document, id))
    }

    /// Direct element children in source order.
    pub fn child_elements(self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.children().filter_map(Child::as_element)
    }

    /// Text of every child joined with a single space, recursively.
    #[must_use]
    pub fn text(self) -> String {
        self.children()
            .map(Child::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every node below this element, depth-first.
    pub fn descendants(self) -> impl Iterator<Item = Child<'a>> + 'a {
        self.traverse(TreeOrder::Depth)
    }

    /// Every node below this element in the given order.
    pub fn traverse(self, order: TreeOrder) -> impl Iterator<Item = Child<'a>> + 'a {
        unfold_tree(self.children(), |child| child, |child: &Child<'a>| child.children(), order)
    }

    /// Descendant whose tag is one of `tags`, chosen by `selection`.
    #[must_use]
    pub fn find(self, tags: &[&str], selection: Selection<'_>) -> Option<Element<'a>> {
        select::find(self.descendants(), tags, selection)
    }

    /// First descendant whose tag is one of `tags`.
    #[must_use]
    pub fn find_first(self, tags: &[&str]) -> Option<Element<'a>> {
        self.find(tags, Selection::First)
    }

    /// Like [`Element::find`], reporting a miss through `or_else`.
    pub fn find_or_else<E, F>(self, tags: &[&str], selection: Selection<'_>, or_else: F) -> Result<Element<'a>, E>
    where
        F: FnOnce() -> E,
    {
        self.find(tags, selection).ok_or_else(or_else)
    }

    /// Every descendant whose tag is one of `tags`, in document order.
    #[must_use]
    pub fn find_all(self, tags: &[&str]) -> Vec<Element<'a>> {
        select::find_all(self.descendants(), tags)
    }

    /// Like [`Element::find_all`], reporting an empty result through `or_else`.
    pub fn find_some_or_else<E, F>(self, tags: &[&str], or_else: F) -> Result<Vec<Element<'a>>, E>
    where
        F: FnOnce() -> E,
    {
        select::non_empty(self.find_all(tags), or_else)
    }

    /// CSS-style path to this element.
    ///
    /// The path starts at the document root, or at `from` when it is an
    /// ancestor tag name or the element itself.
    #[must_use]
    pub fn selector(self, from: Option<SelectorRoot<'_>>) -> String {
        if from.is_some_and(|root| root.matches(self)) {
            return self.tag().to_string();
        }

        match self.parent() {
            Parent::Document(_) => self.tag().to_string(),
            parent @ Parent::Element(element) => {
                let index = parent.nth_child_of(ChildId::Element(self.id));
                format!(
                    "{} > {}:nth-child({index})",
                    element.selector(from),
                    self.tag()
                )
            }
        }
    }

    /// Indented markup for this element and its subtree.
    #[must_use]
    pub fn pretty_print(self, indent: usize) -> String {
        let prefix = " ".repeat(indent);
        let attributes: String = self
            .attributes()
            .iter()
            .map(|(key, value)| format!(" {key}=\"{value}\""))
            .collect();

        if self.data().children.is_empty() {
            return format!("{prefix}<{}{attributes} />", self.tag());
        }

        let mut lines = vec![format!("{prefix}<{}{attributes}>", self.tag())];
        lines.extend(self.children().map(|child| child.pretty_print(indent + 2)));
        lines.push(format!("{prefix}</{}>", self.tag()));
        lines.join("\n")
    }
}

/// Where [`Element::selector`] stops climbing.
#[derive(Debug, Clone, Copy)]
pub enum SelectorRoot<'s> {
    /// The first ancestor (or self) with this tag.
    Tag(&'s str),
    /// A specific element.
    Element(Element<'s>),
}

impl SelectorRoot<'_> {
    fn matches(self, element: Element<'_>) -> bool {
        match self {
            Self::Tag(tag) => element.tag() == tag,
            Self::Element(root) => {
                std::ptr::eq(root.document, element.document) && root.id == element.id
            }
        }
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Element<'_> {}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id.0)
            .field("tag", &self.tag())
            .finish()
    }
}

/// Integer prefix of `value` after leading whitespace, with an optional sign.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
