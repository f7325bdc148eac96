//! Reusable-object cache for transient effect instances.
//!
//! Instances are pre-created at warm-up and reused for the whole process
//! lifetime. A pooled item decides for itself when it is free again (an
//! effect finishes its activation and goes idle); the pool never destroys
//! items and grows by one whenever every item is busy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Stable slot of an item inside its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolHandle(pub usize);

impl fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Items an [`ObjectPool`] can manage.
pub trait Poolable {
    /// Template new items are created from.
    type Prototype;

    fn instantiate(prototype: &Self::Prototype, handle: PoolHandle) -> Self;

    /// True while the item sits unused in the pool.
    fn is_available(&self) -> bool;

    /// Called when the item leaves the pool; it must stop reporting available.
    fn on_acquire(&mut self);

    /// Called when the item is handed back explicitly.
    fn on_release(&mut self);
}

/// Occupancy snapshot for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolStats {
    pub name: String,
    pub total: usize,
    pub in_use: usize,
}

/// Pool of `T`, grown on demand.
pub struct ObjectPool<T: Poolable> {
    name: String,
    prototype: T::Prototype,
    items: Vec<T>,
}

impl<T: Poolable> ObjectPool<T> {
    /// Creates a pool and pre-instantiates `capacity` items.
    pub fn new(name: impl Into<String>, prototype: T::Prototype, capacity: usize) -> Self {
        let mut pool = Self {
            name: name.into(),
            prototype,
            items: Vec::with_capacity(capacity),
        };
        for _ in 0..capacity {
            pool.grow();
        }
        debug!(
            target: "skill::pool",
            pool = %pool.name,
            capacity,
            "Pool warmed up"
        );
        pool
    }

    fn grow(&mut self) -> PoolHandle {
        let handle = PoolHandle(self.items.len());
        self.items.push(T::instantiate(&self.prototype, handle));
        handle
    }

    /// Hands out a free item, creating one if all are in use.
    pub fn acquire(&mut self) -> PoolHandle {
        let handle = match self.items.iter().position(T::is_available) {
            Some(index) => PoolHandle(index),
            None => {
                let handle = self.grow();
                debug!(
                    target: "skill::pool",
                    pool = %self.name,
                    size = self.items.len(),
                    "Pool exhausted, grew by one"
                );
                handle
            }
        };
        self.items[handle.0].on_acquire();
        trace!(target: "skill::pool", pool = %self.name, slot = %handle, "Acquired");
        handle
    }

    /// Returns an item to the pool explicitly.
    ///
    /// Returns `false` for an unknown handle or an item already in the pool.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        match self.items.get_mut(handle.0) {
            Some(item) if !item.is_available() => {
                item.on_release();
                trace!(target: "skill::pool", pool = %self.name, slot = %handle, "Released");
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.items.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.items.get_mut(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of items ever created.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of items currently out of the pool.
    pub fn in_use(&self) -> usize {
        self.items.iter().filter(|item| !item.is_available()).count()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            name: self.name.clone(),
            total: self.count(),
            in_use: self.in_use(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spark {
        slot: PoolHandle,
        busy: bool,
        created_from: &'static str,
    }

    impl Poolable for Spark {
        type Prototype = &'static str;

        fn instantiate(prototype: &Self::Prototype, handle: PoolHandle) -> Self {
            Self {
                slot: handle,
                busy: false,
                created_from: prototype,
            }
        }

        fn is_available(&self) -> bool {
            !self.busy
        }

        fn on_acquire(&mut self) {
            self.busy = true;
        }

        fn on_release(&mut self) {
            self.busy = false;
        }
    }

    #[test]
    fn warm_up_creates_capacity_items() {
        let pool: ObjectPool<Spark> = ObjectPool::new("spark", "spark.prefab", 3);

        assert_eq!(pool.count(), 3);
        assert_eq!(pool.in_use(), 0);
        assert!(pool.iter().all(|s| s.created_from == "spark.prefab"));
    }

    #[test]
    fn acquire_reuses_free_items_before_growing() {
        let mut pool: ObjectPool<Spark> = ObjectPool::new("spark", "spark.prefab", 2);

        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.count(), 2);

        let c = pool.acquire();
        assert_eq!(pool.count(), 3);
        assert_eq!(pool.get(c).map(|s| s.slot), Some(c));

        assert!(pool.release(a));
        assert_eq!(pool.acquire(), a);
        assert_eq!(pool.count(), 3);
    }

    #[test]
    fn items_freed_by_themselves_are_reacquired() {
        let mut pool: ObjectPool<Spark> = ObjectPool::new("spark", "spark.prefab", 1);

        let handle = pool.acquire();
        if let Some(spark) = pool.get_mut(handle) {
            spark.busy = false;
        }

        assert_eq!(pool.acquire(), handle);
        assert_eq!(pool.count(), 1);
    }

    #[test]
    fn releasing_a_free_item_is_a_no_op() {
        let mut pool: ObjectPool<Spark> = ObjectPool::new("spark", "spark.prefab", 1);

        assert!(!pool.release(PoolHandle(0)));

        let handle = pool.acquire();
        assert!(pool.release(handle));
        assert!(!pool.release(handle));
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn releasing_unknown_handle_fails() {
        let mut pool: ObjectPool<Spark> = ObjectPool::new("spark", "spark.prefab", 0);
        assert!(!pool.release(PoolHandle(5)));
        assert_eq!(
            pool.stats(),
            PoolStats {
                name: "spark".to_string(),
                total: 0,
                in_use: 0
            }
        );
    }
}
