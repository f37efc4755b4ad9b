use std::cmp::Ordering;

use tracing::{debug, trace};

use super::node::{Node, NodeId, Width};
use super::SkipList;
use crate::coin::Coin;

impl<T: Ord + Clone, C: Coin> SkipList<T, C> {
    /// Add `value` to the list. Returns false if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        let head = match self.head {
            Some(head) => head,
            None => {
                self.head = Some(self.nodes.alloc(Node::new(value, None)));
                self.len = 1;
                self.height = 1;
                return true;
            }
        };

        match value.cmp(&self.nodes[head].data) {
            Ordering::Equal => false,
            Ordering::Less => {
                self.insert_as_head(value);
                true
            }
            Ordering::Greater => self.insert_after_head(value),
        }
    }

    /// Rename the whole head column to `value`, then insert the displaced
    /// minimum behind it. The head node keeps its id.
    fn insert_as_head(&mut self, value: T) {
        let column = self.head_column();
        let mut former = None;
        for id in column {
            let previous = std::mem::replace(&mut self.nodes[id].data, value.clone());
            if former.is_none() {
                former = Some(previous);
            }
        }

        debug!(height = self.height, "renamed head column for new minimum");
        if let Some(former) = former {
            self.insert_after_head(former);
        }
    }

    /// Insert a value known to be greater than the head.
    fn insert_after_head(&mut self, value: T) -> bool {
        let mut current = match self.head {
            Some(head) => head,
            None => return false,
        };

        // Node each upper layer was left from, with its bottom position. Top first.
        let mut path: Vec<(NodeId, usize)> = Vec::with_capacity(self.height);
        let mut position = 0;
        loop {
            while let Some(next) = self.nodes[current].next {
                match self.nodes[next].data.cmp(&value) {
                    Ordering::Less => {
                        position += self.nodes[current].width.span();
                        current = next;
                    }
                    Ordering::Equal => return false,
                    Ordering::Greater => break,
                }
            }

            match self.nodes[current].down {
                Some(down) => {
                    path.push((current, position));
                    current = down;
                }
                None => break,
            }
        }

        let position = position + 1;
        let inserted = self.link_after(current, 1, value.clone(), None);
        self.len += 1;
        self.promote(inserted, value, position, path);
        true
    }

    /// Link a new node after `pred`, `offset` bottom positions to its right.
    ///
    /// The bottom-layer element the new node stands for must already be
    /// counted: the old edge out of `pred` grows by one before it is split.
    fn link_after(&mut self, pred: NodeId, offset: usize, data: T, down: Option<NodeId>) -> NodeId {
        let (next, width) = {
            let node = &self.nodes[pred];
            (node.next, node.width)
        };

        let id = self.nodes.alloc(Node {
            data,
            next,
            down,
            width: match width {
                Width::Bounded(w) => Width::Bounded(w + 1 - offset),
                Width::Unbounded => Width::Unbounded,
            },
        });

        let node = &mut self.nodes[pred];
        node.next = Some(id);
        node.width = Width::Bounded(offset);
        id
    }

    /// Cap first, then coin, so no flip is spent once the cap is reached.
    fn may_promote(&mut self, promotions: usize) -> bool {
        if self.max_promotions.map_or(false, |max| promotions >= max) {
            return false;
        }
        self.coin.flip()
    }

    /// Climb the freshly inserted bottom node at `position` through the layers
    /// recorded in `path`, then through brand-new layers while the coin allows.
    /// Layers it does not reach still span one more element.
    fn promote(&mut self, inserted: NodeId, value: T, position: usize, path: Vec<(NodeId, usize)>) {
        let mut below = inserted;
        let mut promotions = 0;
        let mut climbing = true;

        for (pred, pred_position) in path.into_iter().rev() {
            if climbing && self.may_promote(promotions) {
                below = self.link_after(pred, position - pred_position, value.clone(), Some(below));
                promotions += 1;
                trace!(promotions, position, "promoted into existing layer");
            } else {
                climbing = false;
                let node = &mut self.nodes[pred];
                node.width = node.width.grow();
            }
        }

        if !climbing {
            return;
        }

        while self.may_promote(promotions) {
            let former_head = match self.head {
                Some(head) => head,
                None => return,
            };

            let top = self.nodes.alloc(Node::new(value.clone(), Some(below)));
            let head_data = self.nodes[former_head].data.clone();
            let head = self.nodes.alloc(Node {
                data: head_data,
                next: Some(top),
                down: Some(former_head),
                width: Width::Bounded(position),
            });

            self.head = Some(head);
            self.height += 1;
            below = top;
            promotions += 1;
            debug!(height = self.height, position, "added layer");
        }
    }
}
