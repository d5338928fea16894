#![allow(clippy::len_without_is_empty)]
use std::{iter::Chain, ops::Index, slice::Iter};

/// A ring buffer with an optional fixed capacity
///
/// Once a bounded buffer is full, each push overwrites the oldest element. An unbounded buffer
/// behaves like a plain `Vec`. Logical indices always count from the oldest element.
#[derive(Debug, Default, Clone)]
pub struct RingBuffer<T> {
    buffer: Vec<T>,
    ix: usize,
    capacity: Option<usize>,
}

impl<T> RingBuffer<T> {
    /// Constructs an empty `RingBuffer`
    ///
    /// **Panics** if `capacity` is `Some(0)`
    pub fn new(capacity: Option<usize>) -> Self {
        assert!(
            capacity != Some(0),
            "Ring buffer capacity must be greater than zero."
        );
        Self {
            buffer: Vec::with_capacity(capacity.unwrap_or_default()),
            ix: 0,
            capacity,
        }
    }

    /// Returns the buffer length
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len() == cap)
    }

    /// Insert an element into the buffer, overwriting the oldest element if full
    ///
    /// **Returns** the evicted element, if any
    pub fn push(&mut self, item: T) -> Option<T> {
        let Some(cap) = self.capacity else {
            self.buffer.push(item);
            return None;
        };

        let ix = self.ix;
        self.ix = (ix + 1) % cap;
        if ix >= self.len() {
            self.buffer.push(item);
            None
        } else {
            Some(std::mem::replace(&mut self.buffer[ix], item))
        }
    }

    /// Get the element at logical index `index`, where `0` is the oldest element
    pub fn get(&self, index: usize) -> Option<&T> {
        let len = self.len();
        (index < len).then(|| &self.buffer[(self.ix + index) % len])
    }

    /// Iterate from the oldest to the newest element
    pub fn iter(&self) -> Chain<Iter<'_, T>, Iter<'_, T>> {
        let (newer, older) = self.buffer.split_at(self.ix.min(self.len()));
        older.iter().chain(newer.iter())
    }

    /// Get a slice view of the internal buffer in storage order
    pub fn view(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("ring buffer index out of bounds")
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Chain<Iter<'a, T>, Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
