use std::cmp::Ordering;

use tracing::{debug, trace};

use super::node::NodeId;
use super::SkipList;

impl<T: Ord + Clone, C> SkipList<T, C> {
    /// Remove `value` from the list. Returns false if it was not present.
    pub fn remove(&mut self, value: &T) -> bool {
        let head = match self.head {
            Some(head) => head,
            None => return false,
        };

        match value.cmp(&self.nodes[head].data) {
            Ordering::Less => false,
            Ordering::Equal => {
                self.remove_head();
                true
            }
            Ordering::Greater => {
                // Absent values must not touch any width.
                if !self.contains(value) {
                    return false;
                }
                self.remove_after_head(value);
                true
            }
        }
    }

    /// Rename the head column to the second smallest value and unlink that
    /// value's own column, which always sits right after the head.
    fn remove_head(&mut self) {
        let successor = match self.bottom_head().and_then(|id| self.nodes[id].next) {
            Some(id) => self.nodes[id].data.clone(),
            None => {
                self.clear();
                debug!("removed last value");
                return;
            }
        };

        for id in self.head_column() {
            let node = &mut self.nodes[id];
            node.data = successor.clone();
            node.width = node.width.shrink();
            let next = node.next;

            if let Some(next) = next {
                if self.nodes[next].data == successor {
                    self.unlink_after(id);
                }
            }
        }

        self.len -= 1;
        debug!(len = self.len, "renamed head column after removing minimum");
        self.drop_empty_layers();
    }

    /// Remove a value known to be present and greater than the head.
    fn remove_after_head(&mut self, value: &T) {
        let mut current = match self.head {
            Some(head) => head,
            None => return,
        };

        loop {
            while let Some(next) = self.nodes[current].next {
                if self.nodes[next].data < *value {
                    current = next;
                } else {
                    break;
                }
            }

            // Whether or not this layer holds the value, the edge over it loses one element.
            let node = &mut self.nodes[current];
            node.width = node.width.shrink();
            let next = node.next;

            if let Some(next) = next {
                if self.nodes[next].data == *value {
                    self.unlink_after(current);
                }
            }

            match self.nodes[current].down {
                Some(down) => current = down,
                None => break,
            }
        }

        self.len -= 1;
        self.drop_empty_layers();
    }

    /// Unlink the node after `pred`, folding its width into `pred`'s edge.
    fn unlink_after(&mut self, pred: NodeId) {
        let target = match self.nodes[pred].next {
            Some(target) => target,
            None => return,
        };

        if let Some(removed) = self.nodes.release(target) {
            let node = &mut self.nodes[pred];
            node.next = removed.next;
            node.width = node.width.merge(removed.width);
            trace!("unlinked node");
        }
    }

    /// Drop top layers that no longer hold anything besides the head.
    fn drop_empty_layers(&mut self) {
        while let Some(head) = self.head {
            let node = &self.nodes[head];
            match (node.next, node.down) {
                (None, Some(down)) => {
                    self.nodes.release(head);
                    self.head = Some(down);
                    self.height -= 1;
                    debug!(height = self.height, "dropped empty layer");
                }
                _ => break,
            }
        }
    }
}
