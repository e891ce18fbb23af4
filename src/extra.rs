// This file contains the trait implementations and helpers around Node and Handle
// that aren't needed by the structure itself: formatting, printing and shared-handle extras.

use crate::*;

use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::iter::Peekable;
use std::slice;

impl<T> Clone for Handle<T, Shared> {
    /// Make another handle to the same node. Only shared handles can be duplicated.
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Handle::Present(ptr) => Handle::Present(ptr.clone()),
            Handle::Absent => Handle::Absent,
        }
    }
}

impl<T> Handle<T, Shared> {
    /// The number of handles currently pointing at this node, or 0 for an absent slot.
    #[inline]
    pub fn use_count(&self) -> usize {
        match self {
            Handle::Present(ptr) => std::sync::Arc::strong_count(ptr),
            Handle::Absent => 0,
        }
    }
}

impl<T: Debug, P: StoragePolicy> Debug for Node<T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("children", &self.as_children())
            .finish()
    }
}

impl<T: Debug, P: StoragePolicy> Debug for Handle<T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(node) => Debug::fmt(node, f),
            None => write!(f, "Absent"),
        }
    }
}

/// Box-drawing rendering of a tree, see [`Handle::pretty`].
pub struct Pretty<'t, T, P: StoragePolicy> {
    root: &'t Handle<T, P>,
}

fn write_label<T: Display, P: StoragePolicy>(f: &mut Formatter<'_>, handle: &Handle<T, P>) -> fmt::Result {
    match handle.get() {
        Some(node) => writeln!(f, "{}", node.value()),
        None => writeln!(f, "(null)"),
    }
}

impl<'t, T: Display, P: StoragePolicy> Display for Pretty<'t, T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_label(f, self.root)?;

        // Each entry holds the children still to print at some depth and the prefix for their lines.
        let mut stack: Vec<(Peekable<slice::Iter<'t, Handle<T, P>>>, String)> = Vec::new();
        if let Some(node) = self.root.get() {
            stack.push((node.children().peekable(), String::new()));
        }
        while let Some((siblings, prefix)) = stack.last_mut() {
            let child = match siblings.next() {
                Some(child) => child,
                None => {
                    stack.pop();
                    continue;
                }
            };
            let is_last = siblings.peek().is_none();
            write!(f, "{}{} ", prefix, if is_last { "└──" } else { "├──" })?;
            write_label(f, child)?;
            if let Some(node) = child.get() {
                if node.has_child() {
                    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                    stack.push((node.children().peekable(), child_prefix));
                }
            }
        }
        Ok(())
    }
}

impl<T, P: StoragePolicy> Handle<T, P> {
    /// Render the tree below this handle for diagnostics, one node per line:
    ///
    /// ```
    /// use policy_tree::{Handle, Node, Unique};
    ///
    /// let tree: Handle<i32, Unique> = Node::create(1, vec![Node::create(2, vec![Node::leaf(4), Handle::absent()]), Node::leaf(3)]);
    /// assert_eq!(tree.pretty().to_string(), "1\n├── 2\n│   ├── 4\n│   └── (null)\n└── 3\n");
    /// ```
    #[inline]
    pub fn pretty(&self) -> Pretty<'_, T, P> {
        Pretty { root: self }
    }
}

/// Write the [`pretty`](Handle::pretty) rendering of `handle` to `out`.
pub fn print_tree<T: Display, P: StoragePolicy, W: io::Write>(handle: &Handle<T, P>, out: &mut W) -> io::Result<()> {
    write!(out, "{}", handle.pretty())
}
