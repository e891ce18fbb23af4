//! Core contains the node type, the child handles and the iterative teardown.
use crate::policy::{DefaultPolicy, StoragePolicy};

use std::mem;
use std::slice;

use tracing::trace;

/// A link from a parent to one child slot.
///
/// A slot is either [`Present`](Handle::Present), pointing at a live node through the policy's pointer, or
/// [`Absent`](Handle::Absent), which keeps the position of a missing child (e.g. "no left child" in a binary tree).
pub enum Handle<T, P: StoragePolicy = DefaultPolicy> {
    Present(P::Ptr<Node<T, P>>),
    Absent,
}

/// A tree node: a value plus an ordered list of child slots.
///
/// Dropping a node tears its subtree down iteratively (see [`remove_children`](Node::remove_children)), so even
/// a degenerate chain of millions of nodes can be dropped without running out of stack.
#[derive(destructure)]
pub struct Node<T, P: StoragePolicy = DefaultPolicy> {
    value: T,
    children: Vec<Handle<T, P>>,
}

impl<T, P: StoragePolicy> Handle<T, P> {
    /// The "no node here" slot.
    #[inline(always)]
    pub const fn absent() -> Self {
        Handle::Absent
    }

    #[inline(always)]
    pub fn is_present(&self) -> bool {
        match self {
            Handle::Present(_) => true,
            Handle::Absent => false,
        }
    }

    #[inline(always)]
    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// The node behind this handle, or `None` for an absent slot.
    #[inline]
    pub fn get(&self) -> Option<&Node<T, P>> {
        match self {
            Handle::Present(ptr) => Some(&**ptr),
            Handle::Absent => None,
        }
    }

    /// Mutable access to the node behind this handle.
    ///
    /// Returns `None` for an absent slot, and also for a shared node that can still be reached through another handle.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut Node<T, P>> {
        match self {
            Handle::Present(ptr) => P::get_mut(ptr),
            Handle::Absent => None,
        }
    }

    /// Move the handle out, leaving an absent slot behind.
    #[inline]
    pub fn take(&mut self) -> Handle<T, P> {
        mem::replace(self, Handle::Absent)
    }

    /// Take the node out of the handle.
    ///
    /// Fails, giving the handle back, if the slot is absent or if the node is shared with other handles.
    pub fn try_into_node(self) -> Result<Node<T, P>, Handle<T, P>> {
        match self {
            Handle::Present(ptr) => P::try_unwrap(ptr).map_err(Handle::Present),
            Handle::Absent => Err(Handle::Absent),
        }
    }

    /// Release this handle, tearing the subtree down without recursion when this was its last owner.
    pub fn destroy(mut self) {
        if let Some(node) = self.get_mut() {
            node.remove_children();
        }
    }
}

impl<T, P: StoragePolicy> Default for Handle<T, P> {
    #[inline(always)]
    fn default() -> Self {
        Handle::Absent
    }
}

impl<T, P: StoragePolicy> From<Node<T, P>> for Handle<T, P> {
    #[inline]
    fn from(node: Node<T, P>) -> Self {
        Handle::Present(P::wrap(node))
    }
}

/// Handles compare by identity: two present handles are equal when they point at the same node.
impl<T, P: StoragePolicy> PartialEq for Handle<T, P> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Handle::Present(a), Handle::Present(b)) => P::ptr_eq(a, b),
            (Handle::Absent, Handle::Absent) => true,
            _ => false,
        }
    }
}

impl<T, P: StoragePolicy> Eq for Handle<T, P> {}

impl<T, P: StoragePolicy> Node<T, P> {
    /// Create a node that isn't linked into any tree yet.
    #[inline]
    pub fn new(value: T, children: Vec<Handle<T, P>>) -> Node<T, P> {
        Node { value, children }
    }

    /// Create a node and return the handle owning it.
    ///
    /// Trees are usually built bottom-up with this:
    /// ```
    /// use policy_tree::{Handle, Node, Unique};
    ///
    /// let tree: Handle<i32, Unique> = Node::create(1, vec![Node::leaf(2), Handle::absent(), Node::leaf(3)]);
    /// assert_eq!(tree.get().unwrap().child_count(), 3);
    /// ```
    #[inline]
    pub fn create(value: T, children: Vec<Handle<T, P>>) -> Handle<T, P> {
        Handle::from(Node::new(value, children))
    }

    /// Create a childless node and return the handle owning it.
    #[inline]
    pub fn leaf(value: T) -> Handle<T, P> {
        Node::create(value, Vec::new())
    }

    #[inline(always)]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline(always)]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consume the node and return its value. The children are torn down iteratively first.
    pub fn into_value(mut self) -> T {
        self.remove_children();
        let (value, _children) = self.destructure();
        value
    }

    /// The child slot at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.child_count()`.
    #[inline]
    pub fn child(&self, index: usize) -> &Handle<T, P> {
        &self.children[index]
    }

    /// The child slot at `index`, mutably. Assigning to it replaces (and drops) the previous child.
    ///
    /// # Panics
    /// Panics if `index >= self.child_count()`.
    #[inline]
    pub fn child_mut(&mut self, index: usize) -> &mut Handle<T, P> {
        &mut self.children[index]
    }

    #[inline]
    pub fn get_child(&self, index: usize) -> Option<&Handle<T, P>> {
        self.children.get(index)
    }

    /// Put `handle` into the slot at `index` and return what was there before.
    ///
    /// # Panics
    /// Panics if `index >= self.child_count()`.
    #[inline]
    pub fn replace_child(&mut self, index: usize, handle: Handle<T, P>) -> Handle<T, P> {
        mem::replace(&mut self.children[index], handle)
    }

    #[inline]
    pub fn push_back(&mut self, handle: Handle<T, P>) {
        self.children.push(handle);
    }

    /// Remove the last child slot and return it, or `None` if there are no children.
    #[inline]
    pub fn pop_back(&mut self) -> Option<Handle<T, P>> {
        self.children.pop()
    }

    #[inline]
    pub fn front(&self) -> Option<&Handle<T, P>> {
        self.children.first()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut Handle<T, P>> {
        self.children.first_mut()
    }

    #[inline]
    pub fn back(&self) -> Option<&Handle<T, P>> {
        self.children.last()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut Handle<T, P>> {
        self.children.last_mut()
    }

    /// Iterate over the child slots, absent ones included, in order.
    #[inline]
    pub fn children(&self) -> slice::Iter<'_, Handle<T, P>> {
        self.children.iter()
    }

    #[inline]
    pub fn children_mut(&mut self) -> slice::IterMut<'_, Handle<T, P>> {
        self.children.iter_mut()
    }

    #[inline]
    pub fn as_children(&self) -> &[Handle<T, P>] {
        &self.children
    }

    /// Replace all child slots at once. The previous children are dropped.
    #[inline]
    pub fn set_children(&mut self, children: Vec<Handle<T, P>>) {
        self.children = children;
    }

    /// Whether there is at least one child slot (present or absent).
    #[inline(always)]
    pub fn has_child(&self) -> bool {
        !self.children.is_empty()
    }

    /// The number of child slots, absent ones included.
    #[inline(always)]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Removes all children without recursion.
    ///
    /// This node's own child list doubles as the work list. The last slot is popped; if it is a node nobody else
    /// owns, its children are moved onto the end of the list first, so the popped node is childless by the time it
    /// is dropped. Anything else popped is a leaf, an absent slot or a reference to a shared node that other
    /// handles keep alive. Every slot is popped exactly once, and the list never holds more than the pending
    /// siblings along the current path.
    pub fn remove_children(&mut self) {
        let mut popped = 0usize;
        while let Some(mut slot) = self.children.pop() {
            if let Some(node) = slot.get_mut() {
                self.children.append(&mut node.children);
            }
            popped += 1;
        }
        if popped > 0 {
            trace!(popped, "removed children iteratively");
        }
    }
}

impl<T, P: StoragePolicy> Drop for Node<T, P> {
    fn drop(&mut self) {
        self.remove_children();
    }
}

impl<'a, T, P: StoragePolicy> IntoIterator for &'a Node<T, P> {
    type Item = &'a Handle<T, P>;
    type IntoIter = slice::Iter<'a, Handle<T, P>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<'a, T, P: StoragePolicy> IntoIterator for &'a mut Node<T, P> {
    type Item = &'a mut Handle<T, P>;
    type IntoIter = slice::IterMut<'a, Handle<T, P>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter_mut()
    }
}
