use std::collections::VecDeque;

use crate::{GroupId, Pooled};

/// The available instances of one prototype, in the order they became available.
///
/// A pool only stores inactive handles. Handles that are handed out are owned by the caller and
/// the pool only remembers how many instances it has ever created.
#[derive(Debug)]
pub(crate) struct Pool<P, I> {
    available: VecDeque<Pooled<P, I>>,

    /// Total number of instances created for this pool, whether available or handed out.
    created: usize,

    group: Option<GroupId>,
}

impl<P, I> Pool<P, I> {
    pub(crate) fn new(group: Option<GroupId>) -> Self {
        Self {
            available: VecDeque::new(),
            created: 0,
            group,
        }
    }

    pub(crate) fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn available(&self) -> usize {
        self.available.len()
    }

    pub(crate) fn created(&self) -> usize {
        self.created
    }

    /// Adds a freshly created instance at the back of the queue.
    pub(crate) fn push_new(&mut self, handle: Pooled<P, I>) {
        self.created = self
            .created
            .checked_add(1)
            .expect("a pool cannot hold more instances than fit in memory");

        self.push(handle);
    }

    /// Adds a returned instance at the back of the queue.
    pub(crate) fn push(&mut self, handle: Pooled<P, I>) {
        debug_assert!(!handle.is_active(), "pooled handles must be inactive");

        self.available.push_back(handle);
    }

    /// Takes the instance that has been waiting longest.
    pub(crate) fn pop(&mut self) -> Option<Pooled<P, I>> {
        self.available.pop_front()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut pool = Pool::new(None);

        pool.push_new(Pooled::new(1, "p"));
        pool.push_new(Pooled::new(2, "p"));
        pool.push_new(Pooled::new(3, "p"));

        assert_eq!(pool.pop().map(|h| *h.instance()), Some(1));
        assert_eq!(pool.pop().map(|h| *h.instance()), Some(2));
        assert_eq!(pool.pop().map(|h| *h.instance()), Some(3));
        assert!(pool.pop().is_none());
    }

    #[test]
    fn returned_handles_do_not_count_as_created() {
        let mut pool = Pool::new(Some(GroupId::new(4)));

        pool.push_new(Pooled::new((), 0_u8));
        let handle = pool.pop().unwrap();
        assert_eq!(pool.available(), 0);

        pool.push(handle);

        assert_eq!(pool.available(), 1);
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.group(), Some(GroupId::new(4)));
    }
}
