//! Tag-set queries over a traversal.
//!
//! Every lookup filters the lazy traversal by tag membership and then picks
//! one match, so `First` stops at the first hit while `Last` walks the whole
//! subtree.

use super::{Child, Element};

/// Which match a `find` call returns.
#[derive(Clone, Copy, Default)]
pub enum Selection<'p> {
    /// The first match in traversal order.
    #[default]
    First,
    /// The last match; always walks the entire subtree.
    Last,
    /// The match at this 0-based position.
    Nth(usize),
    /// The first match also accepted by the predicate.
    Matching(&'p dyn Fn(&Element<'_>) -> bool),
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => f.write_str("First"),
            Self::Last => f.write_str("Last"),
            Self::Nth(n) => f.debug_tuple("Nth").field(n).finish(),
            Self::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}

fn tagged<'a, 't, I>(nodes: I, tags: &'t [&'t str]) -> impl Iterator<Item = Element<'a>> + 't
where
    I: Iterator<Item = Child<'a>> + 't,
    'a: 't,
{
    nodes
        .filter_map(Child::as_element)
        .filter(move |element| tags.contains(&element.tag()))
}

pub(crate) fn find<'a, I>(nodes: I, tags: &[&str], selection: Selection<'_>) -> Option<Element<'a>>
where
    I: Iterator<Item = Child<'a>>,
{
    let mut matches = tagged(nodes, tags);
    match selection {
        Selection::First => matches.next(),
        Selection::Last => matches.last(),
        Selection::Nth(n) => matches.nth(n),
        Selection::Matching(predicate) => matches.find(|element| predicate(element)),
    }
}

pub(crate) fn find_all<'a, I>(nodes: I, tags: &[&str]) -> Vec<Element<'a>>
where
    I: Iterator<Item = Child<'a>>,
{
    tagged(nodes, tags).collect()
}

pub(crate) fn non_empty<T, E, F>(items: Vec<T>, or_else: F) -> Result<Vec<T>, E>
where
    F: FnOnce() -> E,
{
    if items.is_empty() {
        Err(or_else())
    } else {
        Ok(items)
    }
}
