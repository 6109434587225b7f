use std::any::type_name;
use std::fmt;
use std::num::NonZero;

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace, warn};

use crate::{
    Error, GroupId, Host, Placement, Pool, PoolConfig, PoolRegistryBuilder, Pooled, ReleaseError,
    Result,
};

/// The handle type handed out by a [`PoolRegistry`] for host `H`.
pub type PooledOf<H> = Pooled<<H as Host>::Prototype, <H as Host>::Instance>;

/// A registry of first-in-first-out object pools, one per prototype.
///
/// The registry owns the [`Host`] that creates instances and mediates all traffic between
/// callers and pools:
///
/// * [`create_pool()`][1] asks the host for a number of instances of a prototype and keeps them
///   inactive until they are needed. Creating a pool that already exists does nothing.
/// * [`get()`][2] and [`get_placed()`][3] hand out the instance that has been inactive the
///   longest, activating (and optionally placing) it first.
/// * [`release()`][4] deactivates an instance and puts it at the back of its pool.
///
/// Instances are never destroyed while the registry lives. They only cycle between waiting in
/// their pool and being handed out.
///
/// # Running dry
///
/// When a pool is empty and [dynamic extension][5] is enabled, the registry creates
/// [more instances][6] on the spot and hands out the first of them. Otherwise the request fails
/// with [`Error::PoolExhausted`].
///
/// # Errors
///
/// Every failure is reported as an [`Error`] and leaves the registry as it was, so callers can
/// simply skip whatever they wanted to spawn.
///
/// [1]: Self::create_pool
/// [2]: Self::get
/// [3]: Self::get_placed
/// [4]: Self::release
/// [5]: PoolRegistryBuilder::dynamic_extend
/// [6]: PoolRegistryBuilder::extend_amount
pub struct PoolRegistry<H: Host> {
    host: H,

    config: PoolConfig,

    pools: HashMap<H::Prototype, Pool<H::Prototype, H::Instance>>,

    /// The identifier given to the next group we create.
    next_group: u32,
}

impl<H: Host> fmt::Debug for PoolRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("config", &self.config)
            .field("pool_count", &self.pools.len())
            .field("next_group", &self.next_group)
            .finish_non_exhaustive()
    }
}

impl<H: Host> PoolRegistry<H> {
    pub(crate) fn new_inner(host: H, config: PoolConfig) -> Self {
        Self {
            host,
            config,
            pools: HashMap::new(),
            next_group: 0,
        }
    }

    /// Creates a registry with the default configuration and no pools.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prototype_pool::PoolRegistry;
    /// use prototype_pool::fake::FakeHost;
    ///
    /// let registry = PoolRegistry::new(FakeHost::new());
    ///
    /// assert!(registry.is_empty());
    /// assert!(registry.config().dynamic_extend());
    /// ```
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::new_inner(host, PoolConfig::default())
    }

    /// Starts building a new [`PoolRegistry`].
    ///
    /// Use this when you want to customize the registry configuration beyond the defaults.
    pub fn builder() -> PoolRegistryBuilder<H> {
        PoolRegistryBuilder::new()
    }

    /// The configuration the registry was built with.
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The host that creates and manages the pooled instances.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host that creates and manages the pooled instances, for modification.
    #[must_use]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Dismantles the registry, returning the host. Instances still waiting in pools are
    /// dropped without notifying the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// The number of pools in the registry.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Whether the registry has no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Whether a pool has been created for `prototype`.
    #[must_use]
    pub fn contains_pool(&self, prototype: &H::Prototype) -> bool {
        self.pools.contains_key(prototype)
    }

    /// The number of instances of `prototype` waiting to be handed out, or `None` if there is
    /// no pool for `prototype`.
    #[must_use]
    pub fn available(&self, prototype: &H::Prototype) -> Option<usize> {
        self.pools.get(prototype).map(Pool::available)
    }

    /// The number of instances ever created for the pool of `prototype`, including those that
    /// are currently handed out, or `None` if there is no pool for `prototype`.
    #[must_use]
    pub fn created(&self, prototype: &H::Prototype) -> Option<usize> {
        self.pools.get(prototype).map(Pool::created)
    }

    /// The grouping context of the pool of `prototype`, if the pool exists and was created with
    /// pool grouping enabled.
    #[must_use]
    pub fn group(&self, prototype: &H::Prototype) -> Option<GroupId> {
        self.pools.get(prototype).and_then(Pool::group)
    }

    /// Creates a pool of `size` inactive instances of `prototype`.
    ///
    /// If a pool for `prototype` already exists, this does nothing.
    ///
    /// If the host reports that `prototype` lacks the pooling capability, the capability is
    /// attached if [configured][1] to do so and the prototype is rejected otherwise.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSize`] if `size` is zero.
    /// * [`Error::InvalidPrototype`] if `prototype` cannot be pooled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prototype_pool::PoolRegistry;
    /// use prototype_pool::fake::FakeHost;
    ///
    /// let mut registry = PoolRegistry::new(FakeHost::new());
    ///
    /// registry.create_pool("arrow", 4).unwrap();
    /// registry.create_pool("arrow", 100).unwrap();
    ///
    /// assert_eq!(registry.available(&"arrow"), Some(4));
    /// ```
    ///
    /// [1]: PoolRegistryBuilder::auto_attach_capability
    pub fn create_pool(&mut self, prototype: H::Prototype, size: usize) -> Result<()> {
        let size = NonZero::new(size).ok_or(Error::InvalidSize)?;

        self.create_pool_inner(prototype, size)
    }

    /// Creates a pool of [the default size][1] for `prototype`, as
    /// [`create_pool()`][Self::create_pool] does.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPrototype`] if `prototype` cannot be pooled.
    ///
    /// [1]: PoolRegistryBuilder::default_size
    pub fn create_default_pool(&mut self, prototype: H::Prototype) -> Result<()> {
        self.create_pool_inner(prototype, self.config.default_size())
    }

    fn create_pool_inner(&mut self, prototype: H::Prototype, size: NonZero<usize>) -> Result<()> {
        if !self.host.has_pool_capability(&prototype) {
            if !self.config.auto_attach_capability() {
                warn!(?prototype, "prototype does not support pooling");
                return Err(Error::invalid_prototype(&prototype));
            }

            debug!(?prototype, "attaching pooling capability to prototype");
            self.host.attach_pool_capability(&prototype);
        }

        if self.pools.contains_key(&prototype) {
            trace!(?prototype, "pool already exists");
            return Ok(());
        }

        let group = self.config.pool_grouping().then(|| {
            let group = self.allocate_group();
            self.host.create_group(&prototype, group);
            group
        });

        let mut pool = Pool::new(group);
        populate(&mut self.host, &mut pool, &prototype, size);

        debug!(?prototype, size = size.get(), ?group, "pool created");

        self.pools.insert(prototype, pool);

        Ok(())
    }

    /// Adds `amount` inactive instances of `prototype` to the back of its existing pool.
    ///
    /// This is what happens automatically when an empty pool is asked for an instance and
    /// dynamic extension is enabled. Calling it directly is useful to prepare for a burst of
    /// requests.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSize`] if `amount` is zero.
    /// * [`Error::UnknownPool`] if there is no pool for `prototype`.
    pub fn extend_pool(&mut self, prototype: &H::Prototype, amount: usize) -> Result<()> {
        let amount = NonZero::new(amount).ok_or(Error::InvalidSize)?;

        let Some(pool) = self.pools.get_mut(prototype) else {
            debug!(?prototype, "cannot extend pool that does not exist");
            return Err(Error::unknown_pool(prototype));
        };

        populate(&mut self.host, pool, prototype, amount);

        debug!(
            ?prototype,
            amount = amount.get(),
            created = pool.created(),
            "pool extended"
        );

        Ok(())
    }

    /// Takes the longest-waiting instance of `prototype` out of its pool and activates it.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownPool`] if there is no pool for `prototype`.
    /// * [`Error::PoolExhausted`] if the pool is empty and dynamic extension is disabled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prototype_pool::PoolRegistry;
    /// use prototype_pool::fake::FakeHost;
    ///
    /// let mut registry = PoolRegistry::<FakeHost>::builder()
    ///     .dynamic_extend(false)
    ///     .build(FakeHost::new())
    ///     .unwrap();
    ///
    /// registry.create_pool("shell", 1).unwrap();
    ///
    /// let shell = registry.get(&"shell").unwrap();
    /// assert!(registry.get(&"shell").is_err());
    ///
    /// registry.release(shell).unwrap();
    /// assert!(registry.get(&"shell").is_ok());
    /// ```
    pub fn get(&mut self, prototype: &H::Prototype) -> Result<PooledOf<H>> {
        self.take(prototype, None)
    }

    /// Takes the longest-waiting instance of `prototype` out of its pool, applies `placement`
    /// to it and activates it.
    ///
    /// The placement is applied before activation, so the host never sees the instance active
    /// at its previous location.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownPool`] if there is no pool for `prototype`.
    /// * [`Error::PoolExhausted`] if the pool is empty and dynamic extension is disabled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prototype_pool::fake::FakeHost;
    /// use prototype_pool::{PoolRegistry, Quat, Vec3};
    ///
    /// let mut registry = PoolRegistry::new(FakeHost::new());
    /// registry.create_pool("crate", 2).unwrap();
    ///
    /// let here = registry.get_placed(&"crate", Vec3::new(1.0, 2.0, 3.0)).unwrap();
    /// assert_eq!(here.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
    ///
    /// let there = registry
    ///     .get_placed(&"crate", (Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY))
    ///     .unwrap();
    /// assert_eq!(there.rotation(), Some(Quat::IDENTITY));
    /// # registry.release(here).unwrap();
    /// # registry.release(there).unwrap();
    /// ```
    pub fn get_placed(
        &mut self,
        prototype: &H::Prototype,
        placement: impl Into<Placement>,
    ) -> Result<PooledOf<H>> {
        self.take(prototype, Some(placement.into()))
    }

    fn take(
        &mut self,
        prototype: &H::Prototype,
        placement: Option<Placement>,
    ) -> Result<PooledOf<H>> {
        let Some(pool) = self.pools.get_mut(prototype) else {
            debug!(?prototype, "requested instance from pool that does not exist");
            return Err(Error::unknown_pool(prototype));
        };

        if pool.available() == 0 {
            if !self.config.dynamic_extend() {
                debug!(?prototype, "requested instance from exhausted pool");
                return Err(Error::pool_exhausted(prototype));
            }

            populate(&mut self.host, pool, prototype, self.config.extend_amount());

            debug!(
                ?prototype,
                amount = self.config.extend_amount().get(),
                created = pool.created(),
                "pool extended on demand"
            );
        }

        let mut handle = pool
            .pop()
            .expect("pool was either non-empty or we just extended it");

        if let Some(placement) = placement {
            self.host.place(handle.instance_mut(), placement);
        }

        self.host.set_active(handle.instance_mut(), true);
        handle.activate(placement);

        trace!(?prototype, available = pool.available(), "instance taken from pool");

        Ok(handle)
    }

    /// Deactivates an instance and puts it at the back of the pool it came from.
    ///
    /// The pool is identified by the handle's [pool key][Pooled::pool_key]. Handles are only
    /// accepted by a registry that has a pool with that key; normally that is the registry that
    /// handed the handle out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPool`] if this registry has no pool for the handle's key. The
    /// handle is not destroyed and can be taken back from the [`ReleaseError`].
    pub fn release(
        &mut self,
        mut handle: PooledOf<H>,
    ) -> std::result::Result<(), ReleaseError<PooledOf<H>>> {
        let Some(pool) = self.pools.get_mut(handle.pool_key()) else {
            warn!(
                prototype = ?handle.pool_key(),
                "released instance does not belong to any pool"
            );
            let error = Error::unknown_pool(handle.pool_key());
            return Err(ReleaseError::new(handle, error));
        };

        self.host.set_active(handle.instance_mut(), false);
        handle.deactivate();

        pool.push(handle);

        trace!(available = pool.available(), "instance returned to pool");

        Ok(())
    }

    fn allocate_group(&mut self) -> GroupId {
        let group = GroupId::new(self.next_group);

        self.next_group = self
            .next_group
            .checked_add(1)
            .expect("one group per pool cannot exhaust the identifier space");

        group
    }
}

/// Creates `count` inactive instances of `prototype` and appends them to `pool`.
fn populate<H: Host>(
    host: &mut H,
    pool: &mut Pool<H::Prototype, H::Instance>,
    prototype: &H::Prototype,
    count: NonZero<usize>,
) {
    for _ in 0..count.get() {
        let mut instance = host.instantiate(prototype, pool.group());
        host.set_active(&mut instance, false);

        pool.push_new(Pooled::new(instance, prototype.clone()));
    }
}
