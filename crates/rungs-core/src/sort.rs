use crate::collection::OrderedCollection;

/// Returns true when every element is `>=` its predecessor.
pub fn is_sorted<C>(collection: &C) -> bool
where
    C: OrderedCollection + ?Sized,
    C::Item: Ord,
{
    let mut previous = match collection.at(0) {
        Some(item) => item,
        None => return true,
    };
    for i in 1..collection.len() {
        match collection.at(i) {
            Some(item) if item < previous => return false,
            Some(item) => previous = item,
            None => break,
        }
    }
    true
}

/// Top-down merge sort into a new ascending vector.
pub fn merge_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort(&items[..mid]);
    let right = merge_sort(&items[mid..]);
    merge(left, right)
}

fn merge<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }

    out
}
