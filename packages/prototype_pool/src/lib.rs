#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`PoolRegistry`], a registry of first-in-first-out object pools keyed
//! by prototype.
//!
//! A host application (typically a game engine driving a per-frame update loop) describes its
//! reusable object templates as *prototypes*. The registry asks the host to create instances of
//! a prototype up front and then recycles those instances instead of letting the host construct
//! and destroy objects while the application is running.
//!
//! The engine itself stays outside the registry. Everything the registry needs from it
//! (instantiation, activation, placement, optional grouping) is expressed via the [`Host`]
//! trait.
//!
//! # Features
//!
//! - **Idempotent pool creation**: creating a pool for a prototype that already has one does
//!   nothing.
//! - **Strict FIFO recycling**: the instance that has been inactive the longest is handed out
//!   next.
//! - **Optional dynamic extension**: an empty pool can grow on demand by a configured increment.
//! - **Placement pass-through**: instances can be positioned (and rotated) as they are handed out.
//! - **Move-only handles**: a [`Pooled`] handle is consumed when released, so it cannot be
//!   returned to its pool twice.
//! - **Recoverable errors**: every failure is reported as an [`Error`] and leaves the registry
//!   unchanged.
//!
//! # Example
//!
//! ```rust
//! use prototype_pool::fake::FakeHost;
//! use prototype_pool::{Placement, PoolRegistry, Vec3};
//!
//! let mut registry = PoolRegistry::new(FakeHost::new());
//!
//! registry.create_pool("spark", 3).unwrap();
//!
//! let spark = registry
//!     .get_placed(&"spark", Placement::Position(Vec3::new(1.0, 2.0, 3.0)))
//!     .unwrap();
//!
//! assert!(spark.is_active());
//! assert_eq!(registry.available(&"spark"), Some(2));
//!
//! registry.release(spark).unwrap();
//! assert_eq!(registry.available(&"spark"), Some(3));
//! ```
//!
//! # Configuration
//!
//! Use [`PoolRegistry::builder()`] to control dynamic extension, pool grouping, automatic
//! attachment of the pooling capability and pools to create when the registry is built.
//!
//! ```rust
//! use std::num::NonZero;
//!
//! use prototype_pool::PoolRegistry;
//! use prototype_pool::fake::FakeHost;
//!
//! let registry = PoolRegistry::<FakeHost>::builder()
//!     .dynamic_extend(false)
//!     .default_size(NonZero::new(4).unwrap())
//!     .prototypes_to_pool(["bullet", "casing"])
//!     .build(FakeHost::new())
//!     .unwrap();
//!
//! assert_eq!(registry.available(&"bullet"), Some(4));
//! assert_eq!(registry.available(&"casing"), Some(4));
//! ```
//!
//! # Thread safety
//!
//! All operations take `&mut self` and complete synchronously. The registry is meant to be owned
//! by whatever drives the host update loop. If it must be shared between threads, wrap it in a
//! mutex.

mod builder;
mod error;
mod host;
mod placement;
mod pool;
mod pooled;
mod registry;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use builder::*;
pub use error::*;
pub use host::*;
pub use placement::*;
pub(crate) use pool::*;
pub use pooled::*;
pub use registry::*;
