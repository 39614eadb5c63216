//! Fixed-capacity rolling buffer
//!
//! Backs both the fingertip point history and the two vote histories, so
//! all three evict oldest-first in exactly the same way.

/// Rolling buffer that keeps the last `capacity` items in chronological order
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Slot storage, grows up to `capacity` then is overwritten in place
    data: Vec<T>,

    /// Next slot to overwrite once full (also the oldest item)
    write_index: usize,

    capacity: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// Capacity is clamped to at least one slot
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            write_index: 0,
            capacity,
        }
    }

    /// Append an item, evicting the oldest one if the buffer is full
    pub fn push(&mut self, item: T) {
        if self.data.len() < self.capacity {
            self.data.push(item);
        } else {
            self.data[self.write_index] = item;
            self.write_index = (self.write_index + 1) % self.capacity;
        }
    }

    /// True once `capacity` items are held (and from then on)
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items oldest first. Reading never clears the buffer.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.data.split_at(self.write_index);
        older.iter().chain(newer.iter())
    }

    /// Snapshot of the contents, oldest first
    pub fn contents(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_up_to_capacity() {
        let mut buffer = RingBuffer::new(3);
        assert!(buffer.is_empty());
        buffer.push(1);
        buffer.push(2);
        assert!(!buffer.is_full());
        assert_eq!(buffer.contents(), vec![1, 2]);
        buffer.push(3);
        assert!(buffer.is_full());
        assert_eq!(buffer.contents(), vec![1, 2, 3]);
    }

    #[test]
    fn test_evicts_oldest_after_capacity() {
        let mut buffer = RingBuffer::new(16);
        for i in 0..17 {
            buffer.push(i);
            assert!(buffer.len() <= 16);
        }
        let contents = buffer.contents();
        assert_eq!(contents.len(), 16);
        assert_eq!(contents.first(), Some(&1));
        assert_eq!(contents.last(), Some(&16));
        assert!(!contents.contains(&0));
    }

    #[test]
    fn test_stays_ordered_across_many_wraps() {
        let mut buffer = RingBuffer::new(4);
        for i in 0..103 {
            buffer.push(i);
        }
        assert_eq!(buffer.contents(), vec![99, 100, 101, 102]);
        // Reading does not consume
        assert_eq!(buffer.contents(), vec![99, 100, 101, 102]);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = RingBuffer::new(0);
        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.contents(), vec!['b']);
    }
}
