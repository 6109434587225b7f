//! An in-memory [`Host`] for testing code that uses a [`PoolRegistry`][crate::PoolRegistry].
//!
//! [`FakeHost`] uses string literals as prototypes and creates [`FakeInstance`] values that
//! remember everything the registry did to them. The host itself counts what it was asked to do,
//! so tests can verify that instances are created, activated and grouped as expected.
//!
//! This module is available in the crate's own tests and, for other crates, via the `test-util`
//! package feature.
//!
//! # Example
//!
//! ```rust
//! use prototype_pool::PoolRegistry;
//! use prototype_pool::fake::FakeHost;
//!
//! let mut host = FakeHost::new();
//! host.remove_capability("legacy");
//!
//! let mut registry = PoolRegistry::new(host);
//!
//! registry.create_pool("modern", 2).unwrap();
//! assert!(registry.create_pool("legacy", 2).is_err());
//!
//! let modern = registry.get(&"modern").unwrap();
//! assert!(modern.is_visible());
//! assert_eq!(registry.host().instantiated(), 2);
//! # registry.release(modern).unwrap();
//! ```

use std::collections::HashSet;

use crate::{GroupId, Host, Placement, Quat, Vec3};

/// An instance created by [`FakeHost`], tracking its own state.
#[derive(Debug, PartialEq)]
pub struct FakeInstance {
    id: u64,
    prototype: &'static str,
    group: Option<GroupId>,
    visible: bool,
    position: Option<Vec3>,
    rotation: Option<Quat>,
}

impl FakeInstance {
    /// Sequence number of the instance, unique within its host and increasing in creation order.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The prototype the instance was created from.
    #[must_use]
    pub fn prototype(&self) -> &'static str {
        self.prototype
    }

    /// The group the instance was created in, if any.
    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Whether the host has the instance activated.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The position last applied by the host, if any.
    #[must_use]
    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    /// The rotation last applied by the host, if any.
    #[must_use]
    pub fn rotation(&self) -> Option<Quat> {
        self.rotation
    }
}

/// A [`Host`] that creates [`FakeInstance`] values and records its interactions with the
/// registry.
///
/// Every prototype has the pooling capability unless it is removed with
/// [`remove_capability()`][Self::remove_capability].
#[derive(Debug, Default)]
pub struct FakeHost {
    next_id: u64,

    without_capability: HashSet<&'static str>,
    attached_capabilities: Vec<&'static str>,
    groups: Vec<(&'static str, GroupId)>,

    activations: usize,
    deactivations: usize,
}

impl FakeHost {
    /// Creates a host where every prototype can be pooled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the host report that `prototype` lacks the pooling capability until the registry
    /// attaches it.
    pub fn remove_capability(&mut self, prototype: &'static str) {
        self.without_capability.insert(prototype);
    }

    /// The number of instances created so far.
    #[must_use]
    pub fn instantiated(&self) -> u64 {
        self.next_id
    }

    /// How many times an instance was activated.
    #[must_use]
    pub fn activations(&self) -> usize {
        self.activations
    }

    /// How many times an instance was deactivated, including right after creation.
    #[must_use]
    pub fn deactivations(&self) -> usize {
        self.deactivations
    }

    /// The prototypes the registry attached the pooling capability to, in order.
    #[must_use]
    pub fn attached_capabilities(&self) -> &[&'static str] {
        &self.attached_capabilities
    }

    /// The groups the registry created, in order.
    #[must_use]
    pub fn groups(&self) -> &[(&'static str, GroupId)] {
        &self.groups
    }
}

impl Host for FakeHost {
    type Prototype = &'static str;
    type Instance = FakeInstance;

    fn instantiate(&mut self, prototype: &&'static str, group: Option<GroupId>) -> FakeInstance {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("tests never create that many instances");

        FakeInstance {
            id,
            prototype: *prototype,
            group,
            // Like most engines, new instances start out active.
            visible: true,
            position: None,
            rotation: None,
        }
    }

    fn set_active(&mut self, instance: &mut FakeInstance, active: bool) {
        instance.visible = active;

        let counter = if active {
            &mut self.activations
        } else {
            &mut self.deactivations
        };

        *counter = counter
            .checked_add(1)
            .expect("tests never toggle instances that often");
    }

    fn place(&mut self, instance: &mut FakeInstance, placement: Placement) {
        instance.position = Some(placement.position());

        if let Some(rotation) = placement.rotation() {
            instance.rotation = Some(rotation);
        }
    }

    fn has_pool_capability(&self, prototype: &&'static str) -> bool {
        !self.without_capability.contains(prototype)
    }

    fn attach_pool_capability(&mut self, prototype: &&'static str) {
        self.without_capability.remove(prototype);
        self.attached_capabilities.push(*prototype);
    }

    fn create_group(&mut self, prototype: &&'static str, group: GroupId) {
        self.groups.push((*prototype, group));
    }
}
