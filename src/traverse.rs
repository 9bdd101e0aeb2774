//! Lazy tree traversal.
//!
//! [`unfold_tree`] walks any tree shape given a "children of" function and
//! yields a projection of every node it reaches. Nothing is visited until the
//! iterator is advanced, so `find`-style queries stop as soon as they match.

use std::collections::VecDeque;

/// Order in which [`unfold_tree`] visits nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeOrder {
    /// A node's children come right after it, before its remaining siblings.
    #[default]
    Depth,
    /// Every node of one level comes before any node of the next.
    Breadth,
}

/// Iterator returned by [`unfold_tree`].
#[derive(Debug, Clone)]
pub struct UnfoldTree<A, P, C> {
    remaining: VecDeque<A>,
    project: P,
    children: C,
    order: TreeOrder,
}

/// Walk a tree starting from `initial`.
///
/// `children` lists the nodes under a node; `project` maps each visited node
/// to the yielded value. Depth-first prepends a node's children to the work
/// list, breadth-first appends them. Calling this again restarts the walk.
///
/// ```
/// use rs_cfn_spec::traverse::{unfold_tree, TreeOrder};
///
/// // 1 -> [2, 3], 2 -> [4]
/// let children = |n: &u32| match n {
///     1 => vec![2, 3],
///     2 => vec![4],
///     _ => vec![],
/// };
/// let depth: Vec<u32> = unfold_tree([1], |n| n, children, TreeOrder::Depth).collect();
/// assert_eq!(depth, vec![1, 2, 4, 3]);
///
/// let breadth: Vec<u32> = unfold_tree([1], |n| n, children, TreeOrder::Breadth).collect();
/// assert_eq!(breadth, vec![1, 2, 3, 4]);
/// ```
pub fn unfold_tree<A, B, P, C, I>(
    initial: impl IntoIterator<Item = A>,
    project: P,
    children: C,
    order: TreeOrder,
) -> UnfoldTree<A, P, C>
where
    P: FnMut(A) -> B,
    C: FnMut(&A) -> I,
    I: IntoIterator<Item = A>,
{
    UnfoldTree {
        remaining: initial.into_iter().collect(),
        project,
        children,
        order,
    }
}

impl<A, B, P, C, I> Iterator for UnfoldTree<A, P, C>
where
    P: FnMut(A) -> B,
    C: FnMut(&A) -> I,
    I: IntoIterator<Item = A>,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        let node = self.remaining.pop_front()?;
        let more = (self.children)(&node);

        match self.order {
            TreeOrder::Depth => {
                let more: Vec<A> = more.into_iter().collect();
                for child in more.into_iter().rev() {
                    self.remaining.push_front(child);
                }
            }
            TreeOrder::Breadth => self.remaining.extend(more),
        }

        Some((self.project)(node))
    }
}
