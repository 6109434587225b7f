use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::Placement;

/// Identifies a grouping context created for one pool when pool grouping is enabled.
///
/// Groups are purely organizational (e.g. a parent node in the host's scene graph that all
/// instances of one pool are attached to). The registry allocates the identifiers and the host
/// decides what they mean.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GroupId(u32);

impl GroupId {
    pub(crate) const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The numeric value of the identifier. Identifiers are assigned sequentially from zero
    /// by each registry.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// The embedding application, as seen by a [`PoolRegistry`][crate::PoolRegistry].
///
/// The registry never constructs, renders or positions anything itself. It asks the host to
/// create instances of a prototype and tells it when an instance becomes active or inactive and
/// where it should be placed. What any of that means (enabling rendering, attaching to a scene
/// graph, registering with a physics world) is entirely up to the host.
///
/// # Example
///
/// ```rust
/// use prototype_pool::{GroupId, Host, Placement, PoolRegistry};
///
/// #[derive(Debug)]
/// struct Particle {
///     visible: bool,
/// }
///
/// struct Emitter;
///
/// impl Host for Emitter {
///     type Prototype = u32;
///     type Instance = Particle;
///
///     fn instantiate(&mut self, _prototype: &u32, _group: Option<GroupId>) -> Particle {
///         Particle { visible: true }
///     }
///
///     fn set_active(&mut self, instance: &mut Particle, active: bool) {
///         instance.visible = active;
///     }
///
///     fn place(&mut self, _instance: &mut Particle, _placement: Placement) {}
/// }
///
/// let mut registry = PoolRegistry::new(Emitter);
/// registry.create_pool(1, 8).unwrap();
///
/// let particle = registry.get(&1).unwrap();
/// assert!(particle.instance().visible);
/// # registry.release(particle).unwrap();
/// ```
pub trait Host {
    /// Identifies a reusable object template. Each prototype gets at most one pool.
    type Prototype: Clone + Eq + Hash + Debug;

    /// A concrete object created from a prototype.
    type Instance;

    /// Creates a new instance of `prototype`.
    ///
    /// `group` is the grouping context of the pool the instance is created for, if pool grouping
    /// is enabled. The registry deactivates the instance right after this returns.
    fn instantiate(
        &mut self,
        prototype: &Self::Prototype,
        group: Option<GroupId>,
    ) -> Self::Instance;

    /// Makes an instance active (handed out to a caller) or inactive (waiting in its pool).
    fn set_active(&mut self, instance: &mut Self::Instance, active: bool);

    /// Applies a caller-supplied placement to an instance that is about to be handed out.
    fn place(&mut self, instance: &mut Self::Instance, placement: Placement);

    /// Whether instances of `prototype` can be pooled as they are.
    ///
    /// If this returns `false`, pool creation fails unless the registry is configured to
    /// [attach the capability automatically][crate::PoolRegistryBuilder::auto_attach_capability].
    fn has_pool_capability(&self, prototype: &Self::Prototype) -> bool {
        _ = prototype;
        true
    }

    /// Equips `prototype` with whatever it needs to be pooled. Only called when
    /// [`has_pool_capability()`][Self::has_pool_capability] returned `false` and automatic
    /// attachment is enabled.
    fn attach_pool_capability(&mut self, prototype: &Self::Prototype) {
        _ = prototype;
    }

    /// Creates the grouping context `group` for the pool of `prototype`. Called once per pool,
    /// before any instance of the pool is created, when pool grouping is enabled.
    fn create_group(&mut self, prototype: &Self::Prototype, group: GroupId) {
        _ = (prototype, group);
    }
}
