//! Storage policies: how a parent holds on to its children.
//!
//! The policy is a type parameter of [`Node`](crate::Node) and [`Handle`](crate::Handle), so it is fixed when the
//! tree type is named and every node of that tree pays exactly the same cost.

use std::ops::Deref;
use std::sync::Arc;

/// The smart pointer family a tree uses for its child links.
pub trait StoragePolicy: Sized + 'static {
    /// The owning pointer to a node.
    type Ptr<N>: Deref<Target = N>;

    /// Move a node onto the heap behind a fresh pointer.
    fn wrap<N>(node: N) -> Self::Ptr<N>;

    /// Mutable access to the pointee, if no other pointer can observe it.
    fn get_mut<N>(ptr: &mut Self::Ptr<N>) -> Option<&mut N>;

    /// Whether `ptr` is the only pointer to its node. When this returns `true`, [`get_mut`](StoragePolicy::get_mut)
    /// on the same pointer succeeds.
    fn is_unique<N>(ptr: &Self::Ptr<N>) -> bool;

    /// Pointer identity.
    fn ptr_eq<N>(a: &Self::Ptr<N>, b: &Self::Ptr<N>) -> bool;

    /// Take the node out of the pointer, or give the pointer back if other owners remain.
    fn try_unwrap<N>(ptr: Self::Ptr<N>) -> Result<N, Self::Ptr<N>>;
}

/// Exclusive ownership: every node has exactly one owning handle.
///
/// Handles can be moved (see [`Handle::take`](crate::Handle::take)) but never duplicated.
#[derive(Debug)]
pub enum Unique {}

/// Shared ownership: handles are reference counted and can be cloned freely.
///
/// Counts are updated atomically, so handles may be cloned and dropped from several threads. That says nothing
/// about the node contents: a shared node can only be mutated through a handle that is currently the sole owner.
#[derive(Debug)]
pub enum Shared {}

impl StoragePolicy for Unique {
    type Ptr<N> = Box<N>;

    #[inline(always)]
    fn wrap<N>(node: N) -> Box<N> {
        Box::new(node)
    }

    #[inline(always)]
    fn get_mut<N>(ptr: &mut Box<N>) -> Option<&mut N> {
        Some(&mut **ptr)
    }

    #[inline(always)]
    fn is_unique<N>(_ptr: &Box<N>) -> bool {
        true
    }

    #[inline(always)]
    fn ptr_eq<N>(a: &Box<N>, b: &Box<N>) -> bool {
        std::ptr::eq::<N>(&**a, &**b)
    }

    #[inline(always)]
    fn try_unwrap<N>(ptr: Box<N>) -> Result<N, Box<N>> {
        Ok(*ptr)
    }
}

impl StoragePolicy for Shared {
    type Ptr<N> = Arc<N>;

    #[inline(always)]
    fn wrap<N>(node: N) -> Arc<N> {
        Arc::new(node)
    }

    #[inline(always)]
    fn get_mut<N>(ptr: &mut Arc<N>) -> Option<&mut N> {
        Arc::get_mut(ptr)
    }

    #[inline]
    fn is_unique<N>(ptr: &Arc<N>) -> bool {
        Arc::strong_count(ptr) == 1 && Arc::weak_count(ptr) == 0
    }

    #[inline(always)]
    fn ptr_eq<N>(a: &Arc<N>, b: &Arc<N>) -> bool {
        Arc::ptr_eq(a, b)
    }

    #[inline(always)]
    fn try_unwrap<N>(ptr: Arc<N>) -> Result<N, Arc<N>> {
        Arc::try_unwrap(ptr)
    }
}

/// The policy used when a tree type doesn't name one.
///
/// This is [`Shared`], unless the `unique-default` feature is enabled.
#[cfg(not(feature = "unique-default"))]
pub type DefaultPolicy = Shared;

/// The policy used when a tree type doesn't name one.
///
/// This is [`Unique`] because the `unique-default` feature is enabled.
#[cfg(feature = "unique-default")]
pub type DefaultPolicy = Unique;
