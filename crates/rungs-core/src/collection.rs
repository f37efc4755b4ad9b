use std::collections::VecDeque;

/// A finite sequence that can report its length and be read by position.
///
/// This is the input shape for bulk-loading a skip list.
pub trait OrderedCollection {
    type Item;

    fn len(&self) -> usize;

    fn at(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy every element, in order, into a fresh vector.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            if let Some(item) = self.at(i) {
                out.push(item.clone());
            }
        }
        out
    }
}

impl<T> OrderedCollection for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T, const N: usize> OrderedCollection for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> OrderedCollection for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> OrderedCollection for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}
