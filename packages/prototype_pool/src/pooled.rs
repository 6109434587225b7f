use std::ops::{Deref, DerefMut};

use crate::Placement;

/// A pooled instance together with the key of the pool that owns it.
///
/// Handles are only created by a [`PoolRegistry`][crate::PoolRegistry]. A handle returned by
/// [`get()`][crate::PoolRegistry::get] is active and belongs to the caller until it is passed
/// back to [`release()`][crate::PoolRegistry::release]. Releasing consumes the handle, so the
/// same instance cannot be returned to its pool twice.
///
/// The handle dereferences to the instance.
///
/// # Example
///
/// ```rust
/// use prototype_pool::fake::FakeHost;
/// use prototype_pool::PoolRegistry;
///
/// let mut registry = PoolRegistry::new(FakeHost::new());
/// registry.create_pool("coin", 1).unwrap();
///
/// let coin = registry.get(&"coin").unwrap();
/// assert_eq!(*coin.pool_key(), "coin");
/// assert!(coin.is_active());
/// assert!(coin.placement().is_none());
/// # registry.release(coin).unwrap();
/// ```
#[derive(Debug)]
pub struct Pooled<P, I> {
    instance: I,

    /// The prototype the instance was created from. Never changes.
    pool_key: P,

    active: bool,

    /// The placement applied when the handle was last handed out, if any.
    placement: Option<Placement>,
}

impl<P, I> Pooled<P, I> {
    /// Wraps a freshly created instance. New handles start out inactive.
    pub(crate) fn new(instance: I, pool_key: P) -> Self {
        Self {
            instance,
            pool_key,
            active: false,
            placement: None,
        }
    }

    /// The prototype this instance was created from, identifying the pool that owns it.
    #[must_use]
    pub fn pool_key(&self) -> &P {
        &self.pool_key
    }

    /// Whether the instance is currently handed out.
    ///
    /// This is always `true` for a handle you hold; instances waiting in a pool are inactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The placement that was applied when this handle was handed out, if the caller supplied
    /// one.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The pooled instance.
    #[must_use]
    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// The pooled instance, for modification.
    #[must_use]
    pub fn instance_mut(&mut self) -> &mut I {
        &mut self.instance
    }

    pub(crate) fn activate(&mut self, placement: Option<Placement>) {
        self.active = true;
        self.placement = placement;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

impl<P, I> Deref for Pooled<P, I> {
    type Target = I;

    fn deref(&self) -> &I {
        &self.instance
    }
}

impl<P, I> DerefMut for Pooled<P, I> {
    fn deref_mut(&mut self) -> &mut I {
        &mut self.instance
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::Vec3;

    assert_impl_all!(Pooled<u32, String>: Send, Sync);
    assert_not_impl_any!(Pooled<u32, String>: Clone, Copy);

    #[test]
    fn new_handle_is_inactive() {
        let handle = Pooled::new("instance", 7_u32);

        assert!(!handle.is_active());
        assert_eq!(*handle.pool_key(), 7);
        assert_eq!(*handle.instance(), "instance");
        assert!(handle.placement().is_none());
    }

    #[test]
    fn activation_records_placement() {
        let mut handle = Pooled::new(0_u8, "p");
        let placement = Placement::Position(Vec3::new(1.0, 2.0, 3.0));

        handle.activate(Some(placement));
        assert!(handle.is_active());
        assert_eq!(handle.placement(), Some(placement));

        handle.deactivate();
        assert!(!handle.is_active());

        // A later activation without placement clears the old one.
        handle.activate(None);
        assert!(handle.placement().is_none());
    }

    #[test]
    fn derefs_to_instance() {
        let mut handle = Pooled::new(String::from("ember"), 1_u32);

        handle.push_str("s");
        assert_eq!(handle.len(), 6);

        handle.instance_mut().clear();
        assert!(handle.is_empty());
    }
}
