use std::fmt;

use log::trace;
use rand::{
    seq::{IteratorRandom, SliceRandom},
    thread_rng,
};

use crate::{
    ds::RingBuffer,
    error::{Error, Result},
};

/// A first-in first-out memory with an optional capacity and uniform random sampling
///
/// Once `max_size` elements are stored, each [`add`](Self::add) evicts exactly the oldest
/// element before appending the new one. Without a capacity the memory grows without bound.
///
/// Commonly used as an experience replay buffer by storing [experiences](super::Exp).
#[derive(Clone)]
pub struct BoundedMemory<T> {
    memory: RingBuffer<T>,
}

impl<T> BoundedMemory<T> {
    /// Construct an empty memory
    ///
    /// **Panics** if `max_size` is `Some(0)`
    pub fn new(max_size: Option<usize>) -> Self {
        Self {
            memory: RingBuffer::new(max_size),
        }
    }

    /// Construct an empty memory, rejecting a capacity of zero
    ///
    /// ### Errors
    /// [`Error::InvalidConfig`] if `max_size` is `Some(0)`
    pub fn try_new(max_size: Option<usize>) -> Result<Self> {
        if max_size == Some(0) {
            return Err(Error::InvalidConfig {
                field: "max_size",
                reason: "must be positive".into(),
            });
        }
        Ok(Self::new(max_size))
    }

    /// Construct an empty memory holding at most `max_size` values
    ///
    /// **Panics** if `max_size` is 0, see [`try_new`](Self::try_new) for a fallible version
    pub fn bounded(max_size: usize) -> Self {
        Self::new(Some(max_size))
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Add a value, evicting the oldest value first if the memory is full
    pub fn add(&mut self, value: T) {
        if self.memory.push(value).is_some() {
            trace!("memory full at {}, evicted oldest value", self.memory.len());
        }
    }

    /// Sample one value uniformly at random without removing it
    ///
    /// ### Errors
    /// [`Error::EmptyMemory`] if nothing has been added yet
    pub fn sample(&self) -> Result<&T> {
        self.memory
            .view()
            .choose(&mut thread_rng())
            .ok_or(Error::EmptyMemory)
    }

    /// Sample `batch_size` distinct values uniformly at random
    ///
    /// ### Returns
    /// - `Some(values)` if `batch_size` is less than or equal to the memory length
    /// - `None` otherwise
    pub fn sample_batch(&self, batch_size: usize) -> Option<Vec<&T>> {
        (batch_size <= self.len()).then(|| {
            self.memory
                .view()
                .iter()
                .choose_multiple(&mut thread_rng(), batch_size)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.memory.len() == 0
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn max_size(&self) -> Option<usize> {
        self.memory.capacity()
    }

    /// Iterate from the oldest to the newest value
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.memory.iter()
    }
}

impl<T> Default for BoundedMemory<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> Extend<T> for BoundedMemory<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BoundedMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the contents oldest first, e.g. `(1, 2, 3)`
impl<T: fmt::Display> fmt::Display for BoundedMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}
