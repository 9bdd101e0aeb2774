//! The document root and its parse entry points.

use std::collections::BTreeMap;

use super::builder::{self, BuildMode};
use super::node::{ChildId, ElementData, ParentSlot, TextData};
use super::select::{self, Selection};
use super::{Child, Element, NodeId};
use crate::encoding;
use crate::error::ParseError;
use crate::traverse::{unfold_tree, TreeOrder};

/// A parsed HTML document.
///
/// Owns every element and text node. Handles borrow the document, so a
/// finished document is read-only.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) elements: Vec<ElementData>,
    pub(crate) texts: Vec<TextData>,
    pub(crate) roots: Vec<NodeId>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete HTML page.
    ///
    /// The HTML parser recovers from any markup, so this never fails. The
    /// implied `html`, `head` and `body` elements are part of the result.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        builder::build(&dom_query::Document::from(html), BuildMode::Document)
    }

    /// Parse an HTML fragment; top-level elements become the roots.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_cfn_spec::html::Document;
    ///
    /// let doc = Document::parse_fragment("<div><!--c--> <p>Hi</p></div>");
    /// let roots: Vec<_> = doc.children().map(|e| e.tag()).collect();
    /// assert_eq!(roots, vec!["div"]);
    /// ```
    #[must_use]
    pub fn parse_fragment(html: &str) -> Self {
        builder::build(&dom_query::Document::fragment(html), BuildMode::Fragment)
    }

    /// Decode raw page bytes with their declared charset, then parse.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedBytes`] if the bytes are not valid in
    /// the detected encoding.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let html = encoding::decode_strict(bytes)?;
        Ok(Self::parse(&html))
    }

    /// Top-level elements in source order.
    pub fn children(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        self.roots.iter().map(move |&id| Element::new(self, id))
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of text nodes in the document.
    #[must_use]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// True when the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node of the document, depth-first.
    pub fn descendants(&self) -> impl Iterator<Item = Child<'_>> + '_ {
        self.traverse(TreeOrder::Depth)
    }

    /// Every node of the document in the given order.
    pub fn traverse(&self, order: TreeOrder) -> impl Iterator<Item = Child<'_>> + '_ {
        unfold_tree(
            self.children().map(Child::Element),
            |child| child,
            |child: &Child<'_>| child.children(),
            order,
        )
    }

    /// Element whose tag is one of `tags`, chosen by `selection`.
    #[must_use]
    pub fn find(&self, tags: &[&str], selection: Selection<'_>) -> Option<Element<'_>> {
        select::find(self.descendants(), tags, selection)
    }

    /// First element whose tag is one of `tags`.
    #[must_use]
    pub fn find_first(&self, tags: &[&str]) -> Option<Element<'_>> {
        self.find(tags, Selection::First)
    }

    /// Like [`Document::find`], reporting a miss through `or_else`.
    ///
    /// # Errors
    ///
    /// Returns `or_else()` when nothing matches.
    pub fn find_or_else<E, F>(&self, tags: &[&str], selection: Selection<'_>, or_else: F) -> Result<Element<'_>, E>
    where
        F: FnOnce() -> E,
    {
        self.find(tags, selection).ok_or_else(or_else)
    }

    /// Every element whose tag is one of `tags`, in document order.
    #[must_use]
    pub fn find_all(&self, tags: &[&str]) -> Vec<Element<'_>> {
        select::find_all(self.descendants(), tags)
    }

    /// Like [`Document::find_all`], reporting an empty result through `or_else`.
    ///
    /// # Errors
    ///
    /// Returns `or_else()` when nothing matches.
    pub fn find_some_or_else<E, F>(&self, tags: &[&str], or_else: F) -> Result<Vec<Element<'_>>, E>
    where
        F: FnOnce() -> E,
    {
        select::non_empty(self.find_all(tags), or_else)
    }

    /// Indented markup for the whole document.
    #[must_use]
    pub fn pretty_print(&self, indent: usize) -> String {
        self.children()
            .map(|element| element.pretty_print(indent))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn push_element(
        &mut self,
        parent: ParentSlot,
        tag: String,
        attributes: BTreeMap<String, String>,
    ) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(ElementData {
            tag,
            attributes,
            children: Vec::new(),
            parent,
        });
        match parent {
            ParentSlot::Document => self.roots.push(id),
            ParentSlot::Element(parent) => self.elements[parent.0].children.push(ChildId::Element(id)),
        }
        id
    }

    pub(crate) fn push_text(&mut self, parent: NodeId, text: String) -> NodeId {
        let id = NodeId(self.texts.len());
        self.texts.push(TextData { text, parent });
        self.elements[parent.0].children.push(ChildId::Text(id));
        id
    }
}
