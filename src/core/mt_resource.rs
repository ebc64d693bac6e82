//! Shared, lock-guarded ownership of a value across threads.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` provides synchronized access to a value of type `T` that can be shared
/// across threads. It uses an `Arc<RwLock<T>>` internally. Readers proceed concurrently;
/// a writer holds the value exclusively for as long as its guard lives, so a mutation
/// and everything derived from it can be published as one step.
///
/// # Type Parameters
/// - `T`: The type of the contained resource, must be `Send + Sync`
///
/// # Examples
///
/// ## Basic Usage
/// ```
/// use voxel_chunk::core::MtResource;
///
/// let counter = MtResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// ## Sharing Between Threads
/// ```
/// # use std::thread;
/// use voxel_chunk::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// let handle = thread::spawn(move || {
///     *counter_clone.get_mut() += 1;
/// });
///
/// handle.join().unwrap();
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Poisoning
/// A panic while a guard is held poisons the lock. The value behind it is still
/// structurally valid for every type this crate stores, so the guard is recovered and a
/// warning is logged instead of propagating the panic to every later caller.
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(|poisoned| {
            warn!("Recovering poisoned lock for reading");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(|poisoned| {
            warn!("Recovering poisoned lock for writing");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Number of handles sharing this resource.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_value() {
        let a = MtResource::new(vec![1, 2]);
        let b = a.clone();
        b.get_mut().push(3);
        assert_eq!(*a.get(), vec![1, 2, 3]);
        assert_eq!(a.handle_count(), 2);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let value = MtResource::new(5);
        let clone = value.clone();
        let result = std::thread::spawn(move || {
            let _guard = clone.get_mut();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        *value.get_mut() += 1;
        assert_eq!(*value.get(), 6);
    }
}
