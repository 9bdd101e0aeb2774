//! Builds a typed [`Document`] out of a `dom_query` parse tree.
//!
//! Only elements and non-blank text are content. Anything else (the parser's
//! document node, comments, doctypes, processing instructions, whitespace
//! runs) is a wrapper: its own children take its place, in source order, so
//! the ancestry of real content is never broken.

use std::collections::BTreeMap;
use std::convert::Infallible;

use dom_query::NodeRef;
use tendril::StrTendril;

use super::node::ParentSlot;
use super::Document;
use crate::queue::Queue;
use crate::traverse::{unfold_tree, TreeOrder};

/// How the source tree was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildMode {
    /// Full document; the implied `html`/`head`/`body` elements are kept.
    Document,
    /// Fragment; the parser's synthetic top-level `html` element is unwrapped.
    Fragment,
}

enum Content {
    Element(String),
    Text(String),
    Wrapper,
}

/// A node waiting to be created, with the built node it attaches to.
struct Pending<'n> {
    node: NodeRef<'n>,
    parent: ParentSlot,
}

fn trimmed(text: &StrTendril) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn classify(node: &NodeRef<'_>, unwrap_html: bool) -> Content {
    if node.is_text() {
        return trimmed(&node.text()).map_or(Content::Wrapper, Content::Text);
    }
    if !node.is_element() {
        return Content::Wrapper;
    }
    match node.node_name() {
        Some(name) if unwrap_html && &*name == "html" => Content::Wrapper,
        Some(name) => Content::Element(name.to_string()),
        None => Content::Wrapper,
    }
}

/// Attribute map with namespace prefixes glued in front of local names.
fn attributes(node: &NodeRef<'_>) -> BTreeMap<String, String> {
    node.attrs()
        .iter()
        .map(|attr| {
            let mut key = String::new();
            if let Some(prefix) = &attr.name.prefix {
                key.push_str(prefix);
            }
            key.push_str(&attr.name.local);
            (key, attr.value.to_string())
        })
        .collect()
}

/// Content nodes under `node`, with wrappers replaced by their children.
fn valid_children<'n>(node: &NodeRef<'n>, parent: ParentSlot, mode: BuildMode) -> Vec<Pending<'n>> {
    let unwrap_html = mode == BuildMode::Fragment && parent == ParentSlot::Document;
    let is_wrapper = move |node: &NodeRef<'n>| matches!(classify(node, unwrap_html), Content::Wrapper);

    unfold_tree(
        node.children(),
        |node| node,
        move |node: &NodeRef<'n>| {
            if is_wrapper(node) {
                node.children()
            } else {
                Vec::new()
            }
        },
        TreeOrder::Depth,
    )
    .filter(|node| !is_wrapper(node))
    .map(|node| Pending { node, parent })
    .collect()
}

pub(crate) fn build(source: &dom_query::Document, mode: BuildMode) -> Document {
    let mut document = Document::new();
    let queue = Queue::unbounded();
    queue.offer_all(valid_children(&source.root(), ParentSlot::Document, mode));

    let built: Result<(), Infallible> = queue.iterate(|Pending { node, parent }, queue| {
        let unwrap_html = mode == BuildMode::Fragment && parent == ParentSlot::Document;
        match (classify(&node, unwrap_html), parent) {
            (Content::Text(text), ParentSlot::Element(parent)) => {
                document.push_text(parent, text);
            }
            // Only elements own text.
            (Content::Text(_) | Content::Wrapper, _) => {}
            (Content::Element(tag), parent) => {
                let id = document.push_element(parent, tag, attributes(&node));
                queue.offer_all(valid_children(&node, ParentSlot::Element(id), mode));
            }
        }
        Ok(())
    });
    match built {
        Ok(()) => {}
        Err(never) => match never {},
    }

    tracing::debug!(
        elements = document.element_count(),
        texts = document.text_count(),
        "document built"
    );
    document
}
