//! Binary min-heap over a growable vector.
//!
//! The root at index 0 is always the smallest element under `T`'s `Ord`.
//! Children of index `i` live at `2i + 1` and `2i + 2`.

/// Minimum-first priority queue.
#[derive(Clone, Debug)]
pub struct MinHeap<T: Ord> {
    items: Vec<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Smallest element without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<&T> {
        self.items.first()
    }

    /// Appends the item and swims it up to its place.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.swim(self.items.len() - 1);
    }

    /// Removes and returns the smallest element.
    pub fn pop_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        // move the last leaf to the root, then restore heap order
        let min = self.items.swap_remove(0);
        self.sink(0);
        Some(min)
    }

    fn swim(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.items[parent] <= self.items[child] {
                break;
            }
            self.items.swap(parent, child);
            child = parent;
        }
    }

    fn sink(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.items[right] < self.items[left] {
                right
            } else {
                left
            };
            if self.items[smaller] >= self.items[parent] {
                break;
            }
            self.items.swap(parent, smaller);
            parent = smaller;
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for item in iter {
            heap.insert(item);
        }
        heap
    }
}
