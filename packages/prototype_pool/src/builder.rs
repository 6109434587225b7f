use std::any::type_name;
use std::fmt;
use std::num::NonZero;

use crate::{Host, PoolRegistry, Result};

const DEFAULT_EXTEND_AMOUNT: NonZero<usize> = NonZero::<usize>::MIN;

const DEFAULT_SIZE: NonZero<usize> = match NonZero::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// The behavior settings of a [`PoolRegistry`], fixed when the registry is built.
///
/// Obtain it from [`PoolRegistry::config()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    dynamic_extend: bool,
    extend_amount: NonZero<usize>,
    pool_grouping: bool,
    auto_attach_capability: bool,
    default_size: NonZero<usize>,
}

impl PoolConfig {
    /// Whether an empty pool grows when an instance is requested from it.
    #[must_use]
    pub fn dynamic_extend(&self) -> bool {
        self.dynamic_extend
    }

    /// How many instances an empty pool grows by.
    #[must_use]
    pub fn extend_amount(&self) -> NonZero<usize> {
        self.extend_amount
    }

    /// Whether each pool gets its own grouping context in the host.
    #[must_use]
    pub fn pool_grouping(&self) -> bool {
        self.pool_grouping
    }

    /// Whether the pooling capability is attached to prototypes that lack it.
    #[must_use]
    pub fn auto_attach_capability(&self) -> bool {
        self.auto_attach_capability
    }

    /// The size of pools created via [`PoolRegistry::create_default_pool()`] or listed in
    /// [`PoolRegistryBuilder::prototypes_to_pool()`].
    #[must_use]
    pub fn default_size(&self) -> NonZero<usize> {
        self.default_size
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            dynamic_extend: true,
            extend_amount: DEFAULT_EXTEND_AMOUNT,
            pool_grouping: true,
            auto_attach_capability: false,
            default_size: DEFAULT_SIZE,
        }
    }
}

/// Builder for creating an instance of [`PoolRegistry`].
///
/// You only need to use this builder if you want to customize the registry configuration or
/// create pools as part of building it. The default configuration used by
/// [`PoolRegistry::new()`][1] extends empty pools by one instance and groups each pool.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use prototype_pool::PoolRegistry;
/// use prototype_pool::fake::FakeHost;
///
/// let registry = PoolRegistry::<FakeHost>::builder()
///     .extend_amount(NonZero::new(5).unwrap())
///     .pool_grouping(false)
///     .prototype_to_pool("rock")
///     .build(FakeHost::new())
///     .unwrap();
///
/// assert_eq!(registry.config().extend_amount().get(), 5);
/// assert_eq!(registry.available(&"rock"), Some(10));
/// assert_eq!(registry.group(&"rock"), None);
/// ```
///
/// [1]: PoolRegistry::new
#[must_use]
pub struct PoolRegistryBuilder<H: Host> {
    config: PoolConfig,

    /// Pools to create, with the default size, when the registry is built.
    prototypes_to_pool: Vec<H::Prototype>,
}

impl<H: Host> fmt::Debug for PoolRegistryBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistryBuilder")
            .field("host_type", &format_args!("{}", type_name::<H>()))
            .field("config", &self.config)
            .field("prototypes_to_pool", &self.prototypes_to_pool)
            .finish()
    }
}

impl<H: Host> PoolRegistryBuilder<H> {
    pub(crate) fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            prototypes_to_pool: Vec::new(),
        }
    }

    /// Sets whether an empty pool grows by [`extend_amount()`][Self::extend_amount] instances
    /// when an instance is requested from it. If disabled, such requests fail with
    /// [`Error::PoolExhausted`][crate::Error::PoolExhausted].
    ///
    /// Enabled by default.
    pub fn dynamic_extend(mut self, enabled: bool) -> Self {
        self.config.dynamic_extend = enabled;
        self
    }

    /// Sets how many instances an empty pool grows by when dynamic extension is enabled.
    ///
    /// Defaults to 1.
    pub fn extend_amount(mut self, amount: NonZero<usize>) -> Self {
        self.config.extend_amount = amount;
        self
    }

    /// Sets whether the registry asks the host to [create a group][Host::create_group] for each
    /// new pool and passes that group along when instantiating members of the pool.
    ///
    /// Enabled by default.
    pub fn pool_grouping(mut self, enabled: bool) -> Self {
        self.config.pool_grouping = enabled;
        self
    }

    /// Sets whether prototypes that lack the pooling capability get it
    /// [attached automatically][Host::attach_pool_capability] instead of being rejected.
    ///
    /// Disabled by default.
    pub fn auto_attach_capability(mut self, enabled: bool) -> Self {
        self.config.auto_attach_capability = enabled;
        self
    }

    /// Sets the size of pools created via [`PoolRegistry::create_default_pool()`] and of pools
    /// listed via [`prototypes_to_pool()`][Self::prototypes_to_pool].
    ///
    /// Defaults to 10.
    pub fn default_size(mut self, size: NonZero<usize>) -> Self {
        self.config.default_size = size;
        self
    }

    /// Adds a prototype whose pool is created, with the default size, when the registry is
    /// built.
    pub fn prototype_to_pool(mut self, prototype: H::Prototype) -> Self {
        self.prototypes_to_pool.push(prototype);
        self
    }

    /// Adds prototypes whose pools are created, with the default size, when the registry is
    /// built.
    pub fn prototypes_to_pool(
        mut self,
        prototypes: impl IntoIterator<Item = H::Prototype>,
    ) -> Self {
        self.prototypes_to_pool.extend(prototypes);
        self
    }

    /// Builds the registry around `host` and creates the requested pools, in the order the
    /// prototypes were added.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while creating the requested pools, typically
    /// [`Error::InvalidPrototype`][crate::Error::InvalidPrototype].
    pub fn build(self, host: H) -> Result<PoolRegistry<H>> {
        let mut registry = PoolRegistry::new_inner(host, self.config);

        for prototype in self.prototypes_to_pool {
            registry.create_default_pool(prototype)?;
        }

        Ok(registry)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;
    use crate::fake::FakeHost;

    #[test]
    fn defaults_match_documentation() {
        let config = PoolConfig::default();

        assert!(config.dynamic_extend());
        assert_eq!(config.extend_amount().get(), 1);
        assert!(config.pool_grouping());
        assert!(!config.auto_attach_capability());
        assert_eq!(config.default_size().get(), 10);
    }

    #[test]
    fn settings_reach_registry() {
        let registry = PoolRegistry::<FakeHost>::builder()
            .dynamic_extend(false)
            .extend_amount(NonZero::new(3).unwrap())
            .pool_grouping(false)
            .auto_attach_capability(true)
            .default_size(NonZero::new(2).unwrap())
            .build(FakeHost::new())
            .unwrap();

        let config = registry.config();
        assert!(!config.dynamic_extend());
        assert_eq!(config.extend_amount().get(), 3);
        assert!(!config.pool_grouping());
        assert!(config.auto_attach_capability());
        assert_eq!(config.default_size().get(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn listed_prototypes_are_pooled_with_default_size() {
        let registry = PoolRegistry::<FakeHost>::builder()
            .default_size(NonZero::new(3).unwrap())
            .prototype_to_pool("a")
            .prototypes_to_pool(["b", "c"])
            .build(FakeHost::new())
            .unwrap();

        assert_eq!(registry.pool_count(), 3);
        assert_eq!(registry.available(&"a"), Some(3));
        assert_eq!(registry.available(&"b"), Some(3));
        assert_eq!(registry.available(&"c"), Some(3));
        assert_eq!(registry.host().instantiated(), 9);
    }

    #[test]
    fn duplicate_listed_prototype_is_pooled_once() {
        let registry = PoolRegistry::<FakeHost>::builder()
            .default_size(NonZero::new(2).unwrap())
            .prototypes_to_pool(["a", "a"])
            .build(FakeHost::new())
            .unwrap();

        assert_eq!(registry.pool_count(), 1);
        assert_eq!(registry.created(&"a"), Some(2));
    }

    #[test]
    fn build_fails_on_prototype_without_capability() {
        let mut host = FakeHost::new();
        host.remove_capability("plain");

        let result = PoolRegistry::<FakeHost>::builder()
            .prototypes_to_pool(["fancy", "plain"])
            .build(host);

        assert!(matches!(result, Err(Error::InvalidPrototype { .. })));
    }

    #[test]
    fn debug_lists_pending_prototypes() {
        let builder = PoolRegistry::<FakeHost>::builder().prototype_to_pool("orb");

        let rendered = format!("{builder:?}");
        assert!(rendered.contains("orb"));
        assert!(rendered.contains("FakeHost"));
    }
}
