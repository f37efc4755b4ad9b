//! An indexable skip list over a set of ordered values.
//!
//! Values live in stacked singly linked layers. The bottom layer holds every
//! value in ascending order and each layer above holds a random subset of the
//! one below, chosen by a caller supplied [`Coin`]. The smallest value (the
//! head) is present in every layer, so every search starts at the top-left
//! node and alternates between moving right and dropping down.
//!
//! Every `next` edge records how many bottom-layer positions it skips. Adding
//! up those widths while descending gives positional access in expected
//! `O(log n)`, the same cost as a value search.
//!
//! ```text
//! layer 2: 1 ---------------------> 7
//!            w=4
//! layer 1: 1 ---------> 4 --------> 7
//!            w=2          w=2
//! layer 0: 1 --> 3 --> 4 --> 5 --> 7
//! ```

mod insert;
mod iter;
mod node;
mod remove;

pub use iter::{Iter, Range};

use std::fmt;

use tracing::{debug, warn};

use crate::coin::{Coin, RandomCoin};
use crate::collection::OrderedCollection;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sort::{is_sorted, merge_sort};
use node::{Arena, NodeId, Width};

pub struct SkipList<T, C = RandomCoin> {
    nodes: Arena<T>,
    /// Top-left node. `None` iff the list is empty.
    head: Option<NodeId>,
    len: usize,
    height: usize,
    coin: C,
    max_promotions: Option<usize>,
}

impl<T: Ord + Clone> SkipList<T, RandomCoin> {
    /// An empty list promoting with probability 1/2 and no promotion cap.
    pub fn new() -> Self {
        Self::with_coin(RandomCoin::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let coin = RandomCoin::from_config(config)?;
        let mut list = Self::with_coin(coin);
        list.max_promotions = config.max_promotions;
        Ok(list)
    }
}

impl<T: Ord + Clone> Default for SkipList<T, RandomCoin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SkipList<T, C> {
    pub fn with_coin(coin: C) -> Self {
        SkipList {
            nodes: Arena::new(),
            head: None,
            len: 0,
            height: 0,
            coin,
            max_promotions: None,
        }
    }

    /// Cap how many layers a single insertion may climb above the bottom one.
    pub fn with_max_promotions(mut self, max_promotions: usize) -> Self {
        self.max_promotions = Some(max_promotions);
        self
    }

    pub fn max_promotions(&self) -> Option<usize> {
        self.max_promotions
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of populated layers, zero for an empty list.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The smallest value.
    pub fn first(&self) -> Option<&T> {
        self.head.map(|id| &self.nodes[id].data)
    }

    /// The largest value.
    pub fn last(&self) -> Option<&T> {
        let mut current = self.head?;
        loop {
            let node = &self.nodes[current];
            match (node.next, node.down) {
                (Some(next), _) => current = next,
                (None, Some(down)) => current = down,
                (None, None) => return Some(&node.data),
            }
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.len = 0;
        self.height = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.bottom_head(), self.len)
    }

    /// The head's node in the bottom layer.
    fn bottom_head(&self) -> Option<NodeId> {
        let mut current = self.head?;
        while let Some(down) = self.nodes[current].down {
            current = down;
        }
        Some(current)
    }

    /// Head nodes of every layer, top first.
    fn head_column(&self) -> Vec<NodeId> {
        let mut column = Vec::with_capacity(self.height);
        let mut current = self.head;
        while let Some(id) = current {
            column.push(id);
            current = self.nodes[id].down;
        }
        column
    }

    fn layer_ids(&self, start: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut current = Some(start);
        while let Some(id) = current {
            ids.push(id);
            current = self.nodes[id].next;
        }
        ids
    }
}

impl<T: Ord + Clone, C: Coin> SkipList<T, C> {
    /// Build a list holding every element of `collection`.
    ///
    /// Input that is already ascending is inserted as is; anything else is
    /// copied and merge-sorted first. Repeated elements collapse to one.
    pub fn from_collection<Coll>(coin: C, collection: &Coll, max_promotions: Option<usize>) -> Self
    where
        Coll: OrderedCollection<Item = T> + ?Sized,
    {
        let mut list = Self::with_coin(coin);
        list.max_promotions = max_promotions;

        let sorted = is_sorted(collection);
        if sorted {
            for i in 0..collection.len() {
                if let Some(item) = collection.at(i) {
                    list.insert(item.clone());
                }
            }
        } else {
            for item in merge_sort(&OrderedCollection::to_vec(collection)) {
                list.insert(item);
            }
        }

        debug!(input = collection.len(), len = list.len, height = list.height, sorted, "bulk loaded skip list");
        list
    }
}

impl<T: Ord, C> SkipList<T, C> {
    pub fn contains(&self, value: &T) -> bool {
        let mut current = match self.head {
            Some(id) => id,
            None => return false,
        };

        loop {
            let node = &self.nodes[current];
            if node.data == *value {
                return true;
            }
            match node.next {
                Some(next) if self.nodes[next].data <= *value => current = next,
                _ => match node.down {
                    Some(down) => current = down,
                    None => return false,
                },
            }
        }
    }

    /// The value at bottom-layer position `index`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] past the end and with
    /// [`Error::Corruption`] if the recorded widths disagree with the links.
    pub fn at(&self, index: usize) -> Result<&T> {
        let out_of_bounds = Error::IndexOutOfBounds { index, len: self.len };
        let mut current = self.head.ok_or_else(|| out_of_bounds.clone())?;
        if index == 0 {
            return Ok(&self.nodes[current].data);
        }

        let mut passed = 0;
        loop {
            let node = &self.nodes[current];
            if let (Some(next), Width::Bounded(width)) = (node.next, node.width) {
                let reach = passed + width;
                if reach == index {
                    return Ok(&self.nodes[next].data);
                }
                if reach < index {
                    passed = reach;
                    current = next;
                    continue;
                }
            }

            match (node.down, node.next) {
                (Some(down), _) => current = down,
                (None, None) => return Err(out_of_bounds),
                (None, Some(_)) => {
                    warn!(index, passed, width = ?node.width, "width bookkeeping gap in bottom layer");
                    return Err(Error::Corruption(format!(
                        "bottom-layer edge at position {} has width {:?} while seeking index {}",
                        passed, node.width, index
                    )));
                }
            }
        }
    }

    /// Ascending iterator over values in `[start, end)`.
    pub fn range<'a>(&'a self, start: &T, end: &'a T) -> Range<'a, T> {
        let first = match self.head {
            Some(head) if self.nodes[head].data < *start => {
                let mut current = head;
                loop {
                    let node = &self.nodes[current];
                    match node.next {
                        Some(next) if self.nodes[next].data < *start => current = next,
                        _ => match node.down {
                            Some(down) => current = down,
                            None => break node.next,
                        },
                    }
                }
            }
            _ => self.bottom_head(),
        };

        Range::new(&self.nodes, first, end)
    }

    /// Walk every layer and confirm the structural invariants hold.
    ///
    /// Checks strict ordering within layers, that the head value starts every
    /// layer, that `down` links join nodes carrying the same value, that every
    /// width equals the bottom-position distance it claims, and that the cached
    /// length and height match.
    pub fn check_integrity(&self) -> Result<()> {
        let corrupt = |msg: String| Err(Error::Corruption(msg));

        let head = match self.head {
            Some(head) => head,
            None => {
                if self.len != 0 || self.height != 0 || self.nodes.live() != 0 {
                    return corrupt(format!(
                        "empty list reports len {} height {} with {} live nodes",
                        self.len,
                        self.height,
                        self.nodes.live()
                    ));
                }
                return Ok(());
            }
        };

        let column = self.head_column();
        if column.len() != self.height {
            return corrupt(format!("head column spans {} layers, height is {}", column.len(), self.height));
        }

        let head_value = &self.nodes[head].data;
        let bottom: Vec<&T> = self.layer_ids(column[column.len() - 1]).into_iter().map(|id| &self.nodes[id].data).collect();
        if bottom.len() != self.len {
            return corrupt(format!("bottom layer holds {} values, len is {}", bottom.len(), self.len));
        }

        let mut nodes_seen = 0;
        for (layer, &start) in column.iter().enumerate() {
            if self.nodes[start].data != *head_value {
                return corrupt(format!("layer {} does not start with the head value", layer));
            }
            if self.nodes[start].next.is_none() && layer + 1 < column.len() {
                return corrupt(format!("layer {} above the bottom holds only the head", layer));
            }

            let ids = self.layer_ids(start);
            nodes_seen += ids.len();
            for &id in &ids {
                let node = &self.nodes[id];
                let position = match bottom.binary_search(&&node.data) {
                    Ok(position) => position,
                    Err(_) => return corrupt(format!("layer {} holds a value missing from the bottom layer", layer)),
                };

                if let Some(down) = node.down {
                    if self.nodes[down].data != node.data {
                        return corrupt(format!("layer {} position {} links down to a different value", layer, position));
                    }
                } else if layer + 1 != column.len() {
                    return corrupt(format!("layer {} position {} has no lower node", layer, position));
                }

                match (node.next, node.width) {
                    (None, Width::Unbounded) => {}
                    (None, width) => {
                        return corrupt(format!("layer {} ends at position {} with width {:?}", layer, position, width));
                    }
                    (Some(_), Width::Unbounded) => {
                        return corrupt(format!("layer {} position {} links onward with no width", layer, position));
                    }
                    (Some(next), Width::Bounded(width)) => {
                        let next_node = &self.nodes[next];
                        if next_node.data <= node.data {
                            return corrupt(format!("layer {} is out of order after position {}", layer, position));
                        }
                        let next_position = bottom.binary_search(&&next_node.data).unwrap_or(usize::MAX);
                        if next_position.checked_sub(position) != Some(width) {
                            return corrupt(format!(
                                "layer {} edge {}->{} records width {}",
                                layer, position, next_position, width
                            ));
                        }
                    }
                }
            }
        }

        if nodes_seen != self.nodes.live() {
            return corrupt(format!("{} nodes linked, {} allocated", nodes_seen, self.nodes.live()));
        }

        Ok(())
    }
}

impl<T: Clone, C> SkipList<T, C> {
    /// Every value in ascending order.
    pub fn values(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Values of each layer, top layer first.
    pub fn layers(&self) -> Vec<Vec<T>> {
        self.head_column()
            .into_iter()
            .map(|start| self.layer_ids(start).into_iter().map(|id| self.nodes[id].data.clone()).collect())
            .collect()
    }
}

impl<T: Ord + Clone, C: Coin> Extend<T> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for SkipList<T, RandomCoin> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, C> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Display, C> fmt::Display for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.head.is_none() {
            return write!(f, "SkipList {{}}");
        }

        writeln!(f, "SkipList {{")?;
        for start in self.head_column() {
            write!(f, "  {{")?;
            for (i, id) in self.layer_ids(start).into_iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", self.nodes[id].data)?;
            }
            writeln!(f, "}}")?;
        }
        write!(f, "}}")
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipList")
            .field("len", &self.len)
            .field("height", &self.height)
            .field("max_promotions", &self.max_promotions)
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::{AlwaysPromote, NeverPromote};

    fn sample() -> SkipList<i32, RandomCoin> {
        let mut list = SkipList::with_config(&Config::default().with_seed(11)).unwrap();
        list.extend([8, 3, 5, 1, 9, 2]);
        list
    }

    #[test]
    fn test_empty_list() {
        let list: SkipList<i32> = SkipList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.height(), 0);
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert!(!list.contains(&1));
        assert!(list.values().is_empty());
        assert_eq!(list.at(0), Err(Error::IndexOutOfBounds { index: 0, len: 0 }));
        list.check_integrity().unwrap();
    }

    #[test]
    fn test_contains() {
        let list = sample();
        for v in [1, 2, 3, 5, 8, 9] {
            assert!(list.contains(&v), "missing {}", v);
        }
        for v in [0, 4, 6, 7, 10] {
            assert!(!list.contains(&v), "unexpected {}", v);
        }
    }

    #[test]
    fn test_at_matches_values() {
        let list = sample();
        let values = list.values();
        assert_eq!(values, vec![1, 2, 3, 5, 8, 9]);
        for (i, v) in values.iter().enumerate() {
            assert_eq!(list.at(i), Ok(v));
        }
        assert_eq!(list.at(6), Err(Error::IndexOutOfBounds { index: 6, len: 6 }));
        assert!(list.at(usize::MAX).is_err());
    }

    #[test]
    fn test_first_last() {
        let list = sample();
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&9));
    }

    #[test]
    fn test_at_reports_corruption() {
        let mut list = SkipList::with_coin(NeverPromote);
        list.extend([1, 2, 3]);
        let bottom = list.bottom_head().unwrap();
        list.nodes[bottom].width = Width::Bounded(5);

        let err = list.at(1).unwrap_err();
        assert!(err.is_corruption(), "{:?}", err);
        assert!(list.check_integrity().unwrap_err().is_corruption());
    }

    #[test]
    fn test_check_integrity_catches_order() {
        let mut list = SkipList::with_coin(AlwaysPromote).with_max_promotions(1);
        list.extend([1, 2, 3]);
        list.check_integrity().unwrap();

        let bottom = list.bottom_head().unwrap();
        let second = list.nodes[bottom].next.unwrap();
        list.nodes[second].data = 7;
        assert!(list.check_integrity().is_err());
    }

    #[test]
    fn test_with_config() {
        let list: SkipList<u32> = SkipList::with_config(&Config::default().with_max_promotions(4)).unwrap();
        assert_eq!(list.max_promotions(), Some(4));

        let err = SkipList::<u32>::with_config(&Config::new(1.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_collection_sorted_and_unsorted() {
        let sorted = SkipList::from_collection(NeverPromote, &vec![1, 2, 2, 4], None);
        assert_eq!(sorted.values(), vec![1, 2, 4]);

        let unsorted = SkipList::from_collection(NeverPromote, &[9, -3, 4, 4, 0][..], Some(2));
        assert_eq!(unsorted.values(), vec![-3, 0, 4, 9]);
        assert_eq!(unsorted.max_promotions(), Some(2));
        unsorted.check_integrity().unwrap();

        let empty = SkipList::from_collection(NeverPromote, &Vec::<i32>::new(), None);
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
    }

    #[test]
    fn test_clear() {
        let mut list = sample();
        list.clear();
        assert!(list.is_empty());
        list.check_integrity().unwrap();
        list.insert(4);
        assert_eq!(list.values(), vec![4]);
    }

    #[test]
    fn test_display() {
        let mut list: SkipList<i32, _> = SkipList::with_coin(NeverPromote);
        assert_eq!(list.to_string(), "SkipList {}");

        list.extend([3, 1, 2]);
        assert_eq!(list.to_string(), "SkipList {\n  {1 -> 2 -> 3}\n}");

        let mut list = SkipList::with_coin(AlwaysPromote).with_max_promotions(1);
        list.extend([1, 2]);
        assert_eq!(list.to_string(), "SkipList {\n  {1 -> 2}\n  {1 -> 2}\n}");
    }

    #[test]
    fn test_debug() {
        let mut list = SkipList::with_coin(NeverPromote);
        list.extend([2, 1]);
        let out = format!("{:?}", list);
        assert!(out.contains("len: 2"), "{}", out);
        assert!(out.contains("values: [1, 2]"), "{}", out);
    }

    #[test]
    fn test_from_iterator() {
        let list: SkipList<i32> = vec![4, 2, 4, 1].into_iter().collect();
        assert_eq!(list.values(), vec![1, 2, 4]);
        assert_eq!((&list).into_iter().count(), 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(i16),
            Remove(i16),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (-200i16..200).prop_map(Op::Insert),
                (-200i16..200).prop_map(Op::Remove),
            ]
        }

        fn seeded(seed: u64) -> SkipList<i16> {
            SkipList::with_config(&Config::default().with_seed(seed)).unwrap()
        }

        proptest! {
            #[test]
            fn prop_matches_btreeset(ops in prop::collection::vec(op(), 0..400), seed in any::<u64>()) {
                let mut list = seeded(seed);
                let mut model = BTreeSet::new();

                for op in ops {
                    match op {
                        Op::Insert(v) => { prop_assert_eq!(list.insert(v), model.insert(v)); }
                        Op::Remove(v) => { prop_assert_eq!(list.remove(&v), model.remove(&v)); }
                    }
                }

                prop_assert!(list.check_integrity().is_ok(), "{:?}", list.check_integrity());
                let expected: Vec<i16> = model.iter().copied().collect();
                prop_assert_eq!(list.values(), expected.clone());
                prop_assert_eq!(list.len(), expected.len());
                prop_assert_eq!(list.first(), expected.first());
                prop_assert_eq!(list.last(), expected.last());

                for (i, v) in expected.iter().enumerate() {
                    prop_assert_eq!(list.at(i), Ok(v));
                }
                prop_assert_eq!(
                    list.at(expected.len()),
                    Err(Error::IndexOutOfBounds { index: expected.len(), len: expected.len() })
                );

                for v in -201i16..201 {
                    prop_assert_eq!(list.contains(&v), model.contains(&v));
                }
            }

            #[test]
            fn prop_integrity_after_every_op(ops in prop::collection::vec(op(), 0..150), seed in any::<u64>()) {
                let mut list = seeded(seed);
                for op in ops {
                    match op {
                        Op::Insert(v) => { list.insert(v); }
                        Op::Remove(v) => { list.remove(&v); }
                    }
                    prop_assert!(list.check_integrity().is_ok(), "{:?}", list.check_integrity());
                }
            }

            #[test]
            fn prop_capped_coin_matches_btreeset(
                ops in prop::collection::vec(op(), 0..200),
                flips in prop::collection::vec(any::<bool>(), 1..64),
                cap in prop_oneof![Just(None), Just(Some(0usize)), Just(Some(1)), Just(Some(3))],
            ) {
                let mut flips = flips.into_iter().cycle();
                let coin = move || flips.next().unwrap_or(false);
                let mut list = SkipList::from_collection(coin, &Vec::<i16>::new(), cap);
                let mut model = BTreeSet::new();

                for op in ops {
                    match op {
                        Op::Insert(v) => { prop_assert_eq!(list.insert(v), model.insert(v)); }
                        Op::Remove(v) => { prop_assert_eq!(list.remove(&v), model.remove(&v)); }
                    }
                    prop_assert!(list.check_integrity().is_ok(), "{:?}", list.check_integrity());
                    if let Some(max) = cap {
                        prop_assert!(list.height() <= max + 1);
                    }
                    for (i, v) in model.iter().enumerate() {
                        prop_assert_eq!(list.at(i), Ok(v));
                    }
                }
            }

            #[test]
            fn prop_insert_idempotent(values in prop::collection::vec(-100i32..100, 1..200)) {
                let mut list = SkipList::with_coin(AlwaysPromote).with_max_promotions(3);
                list.extend(values.iter().copied());
                let before = list.values();

                let again = values[0];
                prop_assert!(!list.insert(again));
                prop_assert_eq!(list.values(), before.clone());
                prop_assert_eq!(list.len(), before.len());
            }

            #[test]
            fn prop_remove_everything(values in prop::collection::vec(any::<i32>(), 0..200), seed in any::<u64>()) {
                let mut list = SkipList::with_config(&Config::default().with_seed(seed)).unwrap();
                list.extend(values.iter().copied());

                let mut distinct: Vec<i32> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
                distinct.reverse();
                let third = distinct.len() / 3;
                distinct.rotate_left(third);
                for v in &distinct {
                    prop_assert!(list.remove(v));
                }

                prop_assert!(list.is_empty());
                prop_assert_eq!(list.first(), None);
                prop_assert_eq!(list.height(), 0);
                prop_assert!(list.check_integrity().is_ok());
            }

            #[test]
            fn prop_range_query(values in prop::collection::vec(0i32..1000, 0..300), start in 0i32..1000, span in 0i32..500) {
                let list: SkipList<i32> = values.iter().copied().collect();
                let model: BTreeSet<i32> = values.into_iter().collect();
                let end = start + span;

                let got: Vec<i32> = list.range(&start, &end).copied().collect();
                let expected: Vec<i32> = model.range(start..end).copied().collect();
                prop_assert_eq!(got, expected);
            }
        }
    }
}
