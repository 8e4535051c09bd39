use alloc::vec::Vec;

/// A fixed-size, circular buffer (ring buffer) holding a sliding window of observations.
///
/// Pushing into a full buffer evicts the oldest element, which makes it a strict
/// FIFO of fixed capacity. Storage grows with the elements pushed, so the capacity
/// is only a bound. A zero-capacity buffer is allowed and never stores anything.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// The underlying buffer holding the elements, at most `capacity` long.
    data: Vec<T>,
    /// The maximum number of elements kept.
    capacity: usize,
    /// The index of the oldest element in the buffer (the "head").
    /// Stays at 0 until the buffer fills up for the first time.
    index: usize,
}

impl<T: Copy> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            index: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Appends `value`, returning the element that fell out of the window.
    ///
    /// With zero capacity the value itself falls straight through.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(value);
        }

        if self.is_full() {
            let evicted = core::mem::replace(&mut self.data[self.index], value);
            self.index = (self.index + 1) % self.capacity;
            Some(evicted)
        } else {
            self.data.push(value);
            None
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.data.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let len = self.data.len();
        (0..len).map(move |i| &self.data[(self.index + i) % len])
    }

    /// Rotates the storage so the head sits at the front and returns the
    /// elements oldest-to-newest as one slice.
    pub fn make_contiguous(&mut self) -> &[T] {
        if self.index != 0 {
            self.data.rotate_left(self.index);
            self.index = 0;
        }
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;
    use alloc::vec::Vec;

    #[test]
    fn test_new_and_capacity() {
        let buf: RingBuffer<f64> = RingBuffer::new(4);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.len(), 0);
        assert!(!buf.is_full());
    }

    #[test]
    fn test_huge_capacity_is_not_allocated() {
        let mut buf: RingBuffer<f64> = RingBuffer::new(usize::MAX);
        assert_eq!(buf.push(1.0), None);
        assert_eq!(buf.push(2.0), None);
        assert_eq!(buf.make_contiguous(), &[1.0, 2.0]);
        assert!(buf.data.capacity() < 1024);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut buf = RingBuffer::new(2);
        assert_eq!(buf.push(1.0), None);
        assert_eq!(buf.push(2.0), None);
        assert!(buf.is_full());

        assert_eq!(buf.push(3.0), Some(1.0));
        assert_eq!(buf.push(4.0), Some(2.0));
        assert_eq!(buf.len(), 2);

        let elems: Vec<_> = buf.iter().copied().collect();
        assert_eq!(elems, vec![3.0, 4.0]);
    }

    #[test]
    fn test_zero_capacity_passes_value_through() {
        let mut buf: RingBuffer<f64> = RingBuffer::new(0);
        assert!(buf.is_full());
        assert_eq!(buf.push(7.0), Some(7.0));
        assert_eq!(buf.len(), 0);
        assert!(buf.make_contiguous().is_empty());
    }

    #[test]
    fn test_make_contiguous_keeps_logical_order() {
        let mut buf = RingBuffer::new(3);
        buf.push(5.0);
        buf.push(6.0);
        assert_eq!(buf.make_contiguous(), &[5.0, 6.0]);

        buf.push(7.0);
        buf.push(8.0);
        buf.push(9.0);
        assert_eq!(buf.make_contiguous(), &[7.0, 8.0, 9.0]);

        // Pushing after a rotation continues from the rotated head
        assert_eq!(buf.push(10.0), Some(7.0));
        assert_eq!(buf.make_contiguous(), &[8.0, 9.0, 10.0]);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_reset_clears_internal_state() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        buf.reset();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.index, 0);
        assert_eq!(buf.capacity(), 3);

        buf.push(42.0);
        assert_eq!(buf.make_contiguous(), &[42.0]);
    }
}
