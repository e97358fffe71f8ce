use crate::{Coordinate, Precision};
use std::ops::Index;
use std::slice;
use std::sync::Arc;

/// Growable coordinate storage shared by the linear geometry kinds.
///
/// Clones alias one backing allocation. Every mutating call first makes the
/// allocation exclusive to `self`, copying the full array (capacity included)
/// when another value still references it, so a write is never visible
/// through an alias. Every stored coordinate has passed through the buffer's
/// precision.
#[derive(Debug, Clone)]
pub struct CoordinateBuffer {
    storage: Arc<Vec<Coordinate>>,
    precision: Precision,
}

impl Default for CoordinateBuffer {
    fn default() -> Self {
        CoordinateBuffer::new(Precision::Floating)
    }
}

impl PartialEq for CoordinateBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl CoordinateBuffer {
    pub fn new(precision: Precision) -> Self {
        CoordinateBuffer::with_capacity(0, precision)
    }

    pub fn with_capacity(capacity: usize, precision: Precision) -> Self {
        CoordinateBuffer {
            storage: Arc::new(Vec::with_capacity(capacity)),
            precision,
        }
    }

    pub fn from_coordinates<I, C>(coords: I, precision: Precision) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let mut buffer = CoordinateBuffer::new(precision);
        buffer.append_all(coords);
        buffer
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// True if no other value aliases this buffer's allocation.
    pub fn is_uniquely_referenced(&self) -> bool {
        Arc::strong_count(&self.storage) == 1 && Arc::weak_count(&self.storage) == 0
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        self.storage.as_slice()
    }

    pub fn iter(&self) -> slice::Iter<'_, Coordinate> {
        self.storage.iter()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.storage.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.storage.last()
    }

    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.storage.get(index)
    }

    pub fn append<C: Into<Coordinate>>(&mut self, coord: C) {
        let coord = self.precision.convert_coordinate(coord.into());
        let len = self.len();
        self.ensure_capacity(len + 1);
        self.unique_storage().push(coord);
    }

    pub fn append_all<I, C>(&mut self, coords: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let coords = coords.into_iter();
        let (lower, _) = coords.size_hint();
        self.reserve_capacity(self.len() + lower);
        for coord in coords {
            self.append(coord);
        }
    }

    /// Inserts at `index`, shifting later coordinates towards the end.
    ///
    /// Panics if `index > len`.
    pub fn insert<C: Into<Coordinate>>(&mut self, index: usize, coord: C) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {}) should be <= len (is {})",
            index,
            len
        );
        let coord = self.precision.convert_coordinate(coord.into());
        self.ensure_capacity(len + 1);
        self.unique_storage().insert(index, coord);
    }

    /// Removes and returns the coordinate at `index`, shifting later
    /// coordinates towards the start.
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Coordinate {
        let len = self.len();
        assert!(
            index < len,
            "removal index (is {}) should be < len (is {})",
            index,
            len
        );
        self.unique_storage().remove(index)
    }

    /// Panics if the buffer is empty.
    pub fn remove_last(&mut self) -> Coordinate {
        let len = self.len();
        assert!(len > 0, "remove_last called on an empty buffer");
        self.remove(len - 1)
    }

    /// Overwrites the coordinate at `index`.
    ///
    /// Panics if `index >= len`.
    pub fn set<C: Into<Coordinate>>(&mut self, index: usize, coord: C) {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {} but the index is {}",
            len,
            index
        );
        let coord = self.precision.convert_coordinate(coord.into());
        self.unique_storage()[index] = coord;
    }

    /// Grows the allocation to hold at least `capacity` coordinates. Never
    /// shrinks.
    pub fn reserve_capacity(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            self.reallocate(capacity);
        }
    }

    /// Removes every coordinate. Without `keep_capacity` the allocation is
    /// released as well.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        if !keep_capacity {
            self.storage = Arc::new(Vec::new());
        } else if self.is_uniquely_referenced() {
            self.unique_storage().clear();
        } else {
            self.storage = Arc::new(Vec::with_capacity(self.capacity()));
        }
    }

    /// A copy of this buffer with every coordinate converted to `precision`.
    pub fn converted(&self, precision: Precision) -> CoordinateBuffer {
        if precision == self.precision {
            return self.clone();
        }
        let mut buffer = CoordinateBuffer::with_capacity(self.len(), precision);
        buffer.append_all(self.iter().copied());
        buffer
    }

    fn ensure_capacity(&mut self, required: usize) {
        let capacity = self.capacity();
        if required > capacity {
            self.reallocate(required.max(capacity * 2));
        }
    }

    fn reallocate(&mut self, capacity: usize) {
        let mut fresh = Vec::with_capacity(capacity);
        fresh.extend_from_slice(&self.storage);
        self.storage = Arc::new(fresh);
    }

    fn unique_storage(&mut self) -> &mut Vec<Coordinate> {
        if !self.is_uniquely_referenced() {
            self.reallocate(self.capacity());
        }
        // The allocation is exclusive here, so make_mut never clones.
        Arc::make_mut(&mut self.storage)
    }
}

impl Index<usize> for CoordinateBuffer {
    type Output = Coordinate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.storage[index]
    }
}

impl<'a> IntoIterator for &'a CoordinateBuffer {
    type Item = &'a Coordinate;
    type IntoIter = slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
