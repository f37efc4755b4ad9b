use std::iter::FusedIterator;

use super::node::{Arena, NodeId};

/// Ascending iterator over every value, walking the bottom layer.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, start: Option<NodeId>, len: usize) -> Self {
        Iter {
            nodes,
            current: start,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.current?];
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Ascending iterator over values below an exclusive upper bound.
pub struct Range<'a, T> {
    nodes: &'a Arena<T>,
    current: Option<NodeId>,
    end: &'a T,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, start: Option<NodeId>, end: &'a T) -> Self {
        Range {
            nodes,
            current: start,
            end,
        }
    }
}

impl<'a, T: Ord> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.current?];
        if node.data < *self.end {
            self.current = node.next;
            Some(&node.data)
        } else {
            self.current = None;
            None
        }
    }
}

impl<T: Ord> FusedIterator for Range<'_, T> {}
