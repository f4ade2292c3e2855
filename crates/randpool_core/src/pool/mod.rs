//! Generic concurrent object pool.
//!
//! [`ObjectPool`] keeps idle objects in a mutex-guarded stack. A checkout
//! either pops an idle object or builds a new one with a caller-supplied
//! constructor. Construction runs after the lock is released, so concurrent
//! misses never wait on each other.
//!
//! # Design Goals
//!
//! - **Exclusive ownership**: a checked-out object lives only in its [`Pooled`]
//!   guard until it is handed back
//! - **Unbounded**: the pool never reports exhaustion and never shrinks
//! - **RAII semantics**: objects return to the pool when the guard drops, even
//!   while unwinding
//! - **Statistics tracking**: monitor reuse versus construction
//!
//! # Example
//!
//! ```rust
//! use randpool_core::pool::ObjectPool;
//!
//! let pool: ObjectPool<Vec<u8>> = ObjectPool::new();
//!
//! let mut buf = pool.get_or_create(|| Vec::with_capacity(64));
//! buf.push(1);
//! drop(buf);
//!
//! let buf = pool.get_or_create(Vec::new);
//! assert_eq!(buf.len(), 1);
//! assert_eq!(pool.stats().reused, 1);
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Statistics about pool usage.
///
/// Counters are sampled independently, so a snapshot taken while other
/// threads are active may be momentarily inconsistent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total checkout requests.
    pub requests: usize,
    /// Objects built because the idle set was empty.
    pub created: usize,
    /// Checkouts served from the idle set.
    pub reused: usize,
    /// Objects handed back to the pool.
    pub returned: usize,
    /// Objects currently idle.
    pub idle: usize,
}

impl PoolStats {
    /// Returns the fraction of checkouts served from the idle set (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.reused as f64 / self.requests as f64
        }
    }
}

/// An unbounded, thread-safe pool of reusable objects.
pub struct ObjectPool<T> {
    idle: Mutex<Vec<T>>,
    requests: AtomicUsize,
    created: AtomicUsize,
    reused: AtomicUsize,
    returned: AtomicUsize,
}

impl<T> ObjectPool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            requests: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
            reused: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
        }
    }

    /// Checks out an idle object, or builds one with `create` if none is idle.
    ///
    /// # Errors
    ///
    /// Propagates the error from `create`. Nothing is added to the pool in
    /// that case.
    pub fn try_get_or_create<E, F>(&self, create: F) -> Result<Pooled<'_, T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.requests.fetch_add(1, Ordering::Relaxed);

        if let Some(item) = self.pop_idle() {
            self.reused.fetch_add(1, Ordering::Relaxed);
            return Ok(Pooled::new(self, item));
        }

        let item = create()?;
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(Pooled::new(self, item))
    }

    /// Infallible form of [`try_get_or_create`](Self::try_get_or_create).
    pub fn get_or_create<F>(&self, create: F) -> Pooled<'_, T>
    where
        F: FnOnce() -> T,
    {
        match self.try_get_or_create(|| Ok::<T, std::convert::Infallible>(create())) {
            Ok(pooled) => pooled,
            Err(never) => match never {},
        }
    }

    /// Places an object into the idle set.
    ///
    /// Handing back an object that did not come from this pool, or the same
    /// object twice, is not detected.
    pub fn put(&self, item: T) {
        self.lock_idle().push(item);
        self.returned.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds a freshly built object to the idle set without counting a return.
    pub(crate) fn seed_idle(&self, item: T) {
        self.lock_idle().push(item);
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of idle objects.
    pub fn idle_len(&self) -> usize {
        self.lock_idle().len()
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            requests: self.requests.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            idle: self.idle_len(),
        }
    }

    // Guard is dropped on return, before any construction happens.
    fn pop_idle(&self) -> Option<T> {
        self.lock_idle().pop()
    }

    // The idle stack stays consistent across a panic elsewhere, so poisoning
    // is ignored.
    fn lock_idle(&self) -> MutexGuard<'_, Vec<T>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("stats", &self.stats())
            .finish()
    }
}

/// An object checked out of an [`ObjectPool`]; returns to the pool on drop.
///
/// Dereferences to `T`. Use [`detach`](Self::detach) to keep the object
/// instead of returning it.
pub struct Pooled<'a, T> {
    pool: &'a ObjectPool<T>,
    item: Option<T>,
}

impl<'a, T> Pooled<'a, T> {
    fn new(pool: &'a ObjectPool<T>, item: T) -> Self {
        Self {
            pool,
            item: Some(item),
        }
    }

    /// Consumes the guard and returns the object without handing it back.
    pub fn detach(mut self) -> T {
        self.item.take().expect("pooled object present until drop")
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item.as_ref().expect("pooled object present until drop")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().expect("pooled object present until drop")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.put(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.item).finish()
    }
}
