//! Breadth-first, depth-first (pre-order) and in-order traversals.
//!
//! All three borrow the tree immutably for as long as they live, so the tree cannot be restructured behind the
//! traversal frontier. None of them recurse: their state lives in plain `Vec`s.
//!
//! Each traversal is positioned on a node (its [`current`](Traversal::current) one) until it is exhausted.
//! [`Iterator::next`] yields the current node and moves on. A default-constructed traversal is exhausted, and two
//! traversals compare equal if both are exhausted or both are positioned on the same node.

use crate::*;

use std::iter::FusedIterator;
use std::{mem, ptr, slice};

/// Common interface of the traversal iterators, used by [`Node::traverse`].
pub trait Traversal<'t, T: 't, P: StoragePolicy>: Iterator<Item = &'t Node<T, P>> + Default {
    /// Start a traversal of the subtree rooted at `root`.
    fn start(root: &'t Node<T, P>) -> Self;

    /// The node the traversal will yield next.
    fn current(&self) -> Option<&'t Node<T, P>>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.current().is_none()
    }
}

impl<T, P: StoragePolicy> Node<T, P> {
    /// Traverse the subtree rooted at this node with the traversal `I`.
    ///
    /// ```
    /// use policy_tree::{DepthFirst, Node, Unique};
    ///
    /// let tree = Node::<_, Unique>::new(1, vec![Node::leaf(2), Node::leaf(3)]);
    /// let values: Vec<i32> = tree.traverse::<DepthFirst<_, _>>().map(|node| *node.value()).collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn traverse<'t, I: Traversal<'t, T, P>>(&'t self) -> I {
        I::start(self)
    }

    #[inline]
    pub fn breadth_first(&self) -> BreadthFirst<'_, T, P> {
        BreadthFirst::start(self)
    }

    #[inline]
    pub fn depth_first(&self) -> DepthFirst<'_, T, P> {
        DepthFirst::start(self)
    }

    #[inline]
    pub fn in_order(&self) -> InOrder<'_, T, P> {
        InOrder::start(self)
    }
}

#[inline(always)]
fn same_node<N>(a: Option<&N>, b: Option<&N>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Level-by-level traversal: the root, then all its children left to right, then all grandchildren grouped by
/// parent, and so on. Absent slots are skipped.
pub struct BreadthFirst<'t, T, P: StoragePolicy> {
    this_level: Vec<&'t Node<T, P>>,
    pos: usize, // index of the current node in this_level
    next_level: Vec<&'t Node<T, P>>,
}

impl<'t, T, P: StoragePolicy> BreadthFirst<'t, T, P> {
    fn advance(&mut self) {
        debug_assert!(!self.is_empty(), "advancing an exhausted breadth-first traversal");
        let current = self.this_level[self.pos];
        self.next_level.extend(current.children().filter_map(Handle::get));
        self.pos += 1;
        if self.pos == self.this_level.len() {
            // reuse the old level's allocation for the level after the next one
            self.this_level.clear();
            mem::swap(&mut self.this_level, &mut self.next_level);
            self.pos = 0;
        }
    }
}

impl<'t, T: 't, P: StoragePolicy> Traversal<'t, T, P> for BreadthFirst<'t, T, P> {
    fn start(root: &'t Node<T, P>) -> Self {
        BreadthFirst {
            this_level: vec![root],
            pos: 0,
            next_level: Vec::new(),
        }
    }

    #[inline]
    fn current(&self) -> Option<&'t Node<T, P>> {
        self.this_level.get(self.pos).copied()
    }
}

impl<'t, T, P: StoragePolicy> Iterator for BreadthFirst<'t, T, P> {
    type Item = &'t Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current()?;
        self.advance();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.this_level.len() - self.pos + self.next_level.len(), None)
    }
}

impl<'t, T, P: StoragePolicy> FusedIterator for BreadthFirst<'t, T, P> {}

impl<'t, T, P: StoragePolicy> Default for BreadthFirst<'t, T, P> {
    fn default() -> Self {
        BreadthFirst {
            this_level: Vec::new(),
            pos: 0,
            next_level: Vec::new(),
        }
    }
}

impl<'t, T, P: StoragePolicy> Clone for BreadthFirst<'t, T, P> {
    fn clone(&self) -> Self {
        BreadthFirst {
            this_level: self.this_level.clone(),
            pos: self.pos,
            next_level: self.next_level.clone(),
        }
    }
}

impl<'t, T, P: StoragePolicy> PartialEq for BreadthFirst<'t, T, P> {
    fn eq(&self, other: &Self) -> bool {
        same_node(self.current(), other.current())
    }
}

/// Pre-order traversal: a node, then each of its subtrees left to right. Absent slots are skipped.
pub struct DepthFirst<'t, T, P: StoragePolicy> {
    current: Option<&'t Node<T, P>>,
    // one entry per ancestor whose children are not fully visited yet
    stack: Vec<slice::Iter<'t, Handle<T, P>>>,
}

impl<'t, T, P: StoragePolicy> DepthFirst<'t, T, P> {
    fn advance(&mut self) {
        debug_assert!(!self.is_empty(), "advancing an exhausted depth-first traversal");
        if let Some(current) = self.current {
            if current.has_child() {
                self.stack.push(current.children());
            }
        }
        self.current = loop {
            let top = match self.stack.last_mut() {
                Some(top) => top,
                None => break None,
            };
            match top.find_map(Handle::get) {
                Some(node) => break Some(node),
                None => {
                    self.stack.pop();
                }
            }
        };
    }
}

impl<'t, T: 't, P: StoragePolicy> Traversal<'t, T, P> for DepthFirst<'t, T, P> {
    fn start(root: &'t Node<T, P>) -> Self {
        DepthFirst {
            current: Some(root),
            stack: Vec::new(),
        }
    }

    #[inline]
    fn current(&self) -> Option<&'t Node<T, P>> {
        self.current
    }
}

impl<'t, T, P: StoragePolicy> Iterator for DepthFirst<'t, T, P> {
    type Item = &'t Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.advance();
        Some(current)
    }
}

impl<'t, T, P: StoragePolicy> FusedIterator for DepthFirst<'t, T, P> {}

impl<'t, T, P: StoragePolicy> Default for DepthFirst<'t, T, P> {
    fn default() -> Self {
        DepthFirst {
            current: None,
            stack: Vec::new(),
        }
    }
}

impl<'t, T, P: StoragePolicy> Clone for DepthFirst<'t, T, P> {
    fn clone(&self) -> Self {
        DepthFirst {
            current: self.current,
            stack: self.stack.clone(),
        }
    }
}

impl<'t, T, P: StoragePolicy> PartialEq for DepthFirst<'t, T, P> {
    fn eq(&self, other: &Self) -> bool {
        same_node(self.current, other.current)
    }
}

struct InOrderFrame<'t, T, P: StoragePolicy> {
    // the ancestor itself, until it has been yielded
    pending: Option<&'t Node<T, P>>,
    // its children after the left-most one
    siblings: slice::Iter<'t, Handle<T, P>>,
}

impl<'t, T, P: StoragePolicy> Clone for InOrderFrame<'t, T, P> {
    fn clone(&self) -> Self {
        InOrderFrame {
            pending: self.pending,
            siblings: self.siblings.clone(),
        }
    }
}

/// In-order traversal, generalized to any number of children: the left-most subtree, then the node itself, then
/// the remaining subtrees left to right.
///
/// For nodes with two child slots this is the classic left, self, right order. When the left-most slot of a node
/// is absent, the node comes first, followed by its other subtrees.
pub struct InOrder<'t, T, P: StoragePolicy> {
    current: Option<&'t Node<T, P>>,
    stack: Vec<InOrderFrame<'t, T, P>>,
}

impl<'t, T, P: StoragePolicy> InOrder<'t, T, P> {
    // Follows left-most children down from `node`, pushing a frame for every node passed on the way, and returns
    // the node where the descent stops.
    fn descend_leftmost(&mut self, mut node: &'t Node<T, P>) -> &'t Node<T, P> {
        loop {
            let mut siblings = node.children();
            let leftmost = match siblings.next() {
                Some(leftmost) => leftmost,
                None => return node,
            };
            match leftmost.get() {
                Some(child) => {
                    self.stack.push(InOrderFrame {
                        pending: Some(node),
                        siblings,
                    });
                    node = child;
                }
                None => {
                    self.stack.push(InOrderFrame {
                        pending: None,
                        siblings,
                    });
                    return node;
                }
            }
        }
    }

    fn advance(&mut self) {
        debug_assert!(!self.is_empty(), "advancing an exhausted in-order traversal");
        self.current = loop {
            let top = match self.stack.last_mut() {
                Some(top) => top,
                None => break None,
            };
            if let Some(node) = top.pending.take() {
                break Some(node);
            }
            if let Some(next) = top.siblings.find_map(Handle::get) {
                break Some(self.descend_leftmost(next));
            }
            self.stack.pop();
        };
    }
}

impl<'t, T: 't, P: StoragePolicy> Traversal<'t, T, P> for InOrder<'t, T, P> {
    fn start(root: &'t Node<T, P>) -> Self {
        let mut iter = InOrder::default();
        iter.current = Some(iter.descend_leftmost(root));
        iter
    }

    #[inline]
    fn current(&self) -> Option<&'t Node<T, P>> {
        self.current
    }
}

impl<'t, T, P: StoragePolicy> Iterator for InOrder<'t, T, P> {
    type Item = &'t Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.advance();
        Some(current)
    }
}

impl<'t, T, P: StoragePolicy> FusedIterator for InOrder<'t, T, P> {}

impl<'t, T, P: StoragePolicy> Default for InOrder<'t, T, P> {
    fn default() -> Self {
        InOrder {
            current: None,
            stack: Vec::new(),
        }
    }
}

impl<'t, T, P: StoragePolicy> Clone for InOrder<'t, T, P> {
    fn clone(&self) -> Self {
        InOrder {
            current: self.current,
            stack: self.stack.clone(),
        }
    }
}

impl<'t, T, P: StoragePolicy> PartialEq for InOrder<'t, T, P> {
    fn eq(&self, other: &Self) -> bool {
        same_node(self.current, other.current)
    }
}
