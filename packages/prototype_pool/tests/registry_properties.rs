//! Behavioral properties of `PoolRegistry`, exercised through the public API only.

use std::num::NonZero;

use prototype_pool::fake::FakeHost;
use prototype_pool::{Error, Placement, PoolRegistry, Quat, Vec3};

fn registry(dynamic_extend: bool) -> PoolRegistry<FakeHost> {
    PoolRegistry::<FakeHost>::builder()
        .dynamic_extend(dynamic_extend)
        .build(FakeHost::new())
        .unwrap()
}

#[test]
fn pool_of_any_size_serves_exactly_that_many() {
    for size in [1, 2, 7, 32] {
        let mut registry = registry(false);
        registry.create_pool("p", size).unwrap();

        let handles = (0..size)
            .map(|_| registry.get(&"p").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(handles.len(), size);
        assert!(handles.iter().all(|h| h.is_active()));
        assert!(matches!(
            registry.get(&"p"),
            Err(Error::PoolExhausted { .. })
        ));
    }
}

#[test]
fn pool_of_any_size_extends_when_enabled() {
    for size in [1, 3, 10] {
        let mut registry = registry(true);
        registry.create_pool("p", size).unwrap();

        let _handles = (0..size)
            .map(|_| registry.get(&"p").unwrap())
            .collect::<Vec<_>>();

        let extra = registry.get(&"p").unwrap();
        assert!(extra.is_active());
        assert_eq!(registry.created(&"p"), Some(size + 1));
    }
}

#[test]
fn repeated_create_keeps_first_size() {
    let mut registry = registry(true);

    registry.create_pool("p", 4).unwrap();
    registry.create_pool("p", 9).unwrap();

    assert_eq!(registry.available(&"p"), Some(4));
    assert_eq!(registry.created(&"p"), Some(4));
}

#[test]
fn single_member_round_trip_returns_same_instance() {
    let mut registry = registry(false);
    registry.create_pool("p", 1).unwrap();

    let first = registry.get(&"p").unwrap();
    let id = first.id();
    registry.release(first).unwrap();

    let again = registry.get(&"p").unwrap();
    assert_eq!(again.id(), id);
}

#[test]
fn fifo_across_gets_and_returns() {
    let mut registry = registry(false);
    registry.create_pool("p", 3).unwrap();

    let o1 = registry.get(&"p").unwrap();
    let o2 = registry.get(&"p").unwrap();
    let o3 = registry.get(&"p").unwrap();

    assert_eq!([o1.id(), o2.id(), o3.id()], [0, 1, 2]);

    registry.release(o2).unwrap();
    registry.release(o1).unwrap();

    assert_eq!(registry.get(&"p").unwrap().id(), 1);
    assert_eq!(registry.get(&"p").unwrap().id(), 0);
}

#[test]
fn extension_with_size_one() {
    let mut extending = registry(true);
    extending.create_pool("p", 1).unwrap();

    let _a = extending.get(&"p").unwrap();
    let _b = extending.get(&"p").unwrap();
    assert_eq!(extending.created(&"p"), Some(2));

    let mut fixed = registry(false);
    fixed.create_pool("p", 1).unwrap();

    let _a = fixed.get(&"p").unwrap();
    assert!(matches!(fixed.get(&"p"), Err(Error::PoolExhausted { .. })));
    assert_eq!(fixed.created(&"p"), Some(1));
    assert_eq!(fixed.host().instantiated(), 1);
}

#[test]
fn orphaned_release_does_not_mutate_pools() {
    let mut source = registry(true);
    source.create_pool("stray", 1).unwrap();
    let stray = source.get(&"stray").unwrap();

    let mut target = registry(true);
    target.create_pool("p", 2).unwrap();

    let rejected = target.release(stray).unwrap_err();

    assert!(matches!(rejected.error(), Error::UnknownPool { .. }));
    assert_eq!(target.pool_count(), 1);
    assert_eq!(target.available(&"p"), Some(2));
    assert_eq!(target.host().deactivations(), 2);

    let stray = rejected.into_handle();
    assert_eq!(*stray.pool_key(), "stray");
}

#[test]
fn get_without_pool_is_unknown() {
    let mut registry = registry(true);

    assert_eq!(
        registry.get(&"missing").unwrap_err(),
        Error::UnknownPool {
            prototype: "\"missing\"".to_string()
        }
    );
    assert!(registry.is_empty());
}

#[test]
fn placement_is_passed_through_exactly() {
    let mut registry = registry(true);
    registry.create_pool("p", 1).unwrap();

    let handle = registry.get_placed(&"p", Vec3::new(1.0, 2.0, 3.0)).unwrap();

    assert_eq!(handle.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(
        handle.placement(),
        Some(Placement::Position(Vec3::new(1.0, 2.0, 3.0)))
    );
}

#[test]
fn reused_instance_gets_new_placement() {
    let mut registry = registry(false);
    registry.create_pool("p", 1).unwrap();

    let rotation = Quat::new(0.0, 0.0, 1.0, 0.0);
    let handle = registry
        .get_placed(&"p", (Vec3::new(1.0, 1.0, 1.0), rotation))
        .unwrap();
    registry.release(handle).unwrap();

    let handle = registry.get_placed(&"p", Vec3::new(2.0, 2.0, 2.0)).unwrap();

    assert_eq!(handle.position(), Some(Vec3::new(2.0, 2.0, 2.0)));
    // Position-only placement leaves the host's rotation alone.
    assert_eq!(handle.rotation(), Some(rotation));
    assert_eq!(handle.placement().and_then(|p| p.rotation()), None);
}

#[test]
fn failures_leave_registry_consistent() {
    let mut host = FakeHost::new();
    host.remove_capability("broken");

    let mut registry = PoolRegistry::<FakeHost>::builder()
        .dynamic_extend(false)
        .default_size(NonZero::new(2).unwrap())
        .prototype_to_pool("p")
        .build(host)
        .unwrap();

    assert_eq!(registry.create_pool("q", 0), Err(Error::InvalidSize));
    assert!(matches!(
        registry.create_pool("broken", 1),
        Err(Error::InvalidPrototype { .. })
    ));
    assert!(matches!(
        registry.extend_pool(&"q", 1),
        Err(Error::UnknownPool { .. })
    ));

    let a = registry.get(&"p").unwrap();
    let b = registry.get(&"p").unwrap();
    assert!(registry.get(&"p").is_err());

    registry.release(a).unwrap();
    registry.release(b).unwrap();

    assert_eq!(registry.pool_count(), 1);
    assert_eq!(registry.available(&"p"), Some(2));
    assert_eq!(registry.created(&"p"), Some(2));
}
