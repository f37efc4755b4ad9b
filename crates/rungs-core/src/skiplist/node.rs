use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

/// Number of bottom-layer positions crossed by a node's `next` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Width {
    Bounded(usize),
    /// The node ends its layer.
    Unbounded,
}

impl Width {
    /// Span of the edge; a layer end contributes nothing.
    pub(crate) fn span(self) -> usize {
        match self {
            Width::Bounded(w) => w,
            Width::Unbounded => 0,
        }
    }

    pub(crate) fn grow(self) -> Self {
        match self {
            Width::Bounded(w) => Width::Bounded(w + 1),
            Width::Unbounded => Width::Unbounded,
        }
    }

    pub(crate) fn shrink(self) -> Self {
        match self {
            Width::Bounded(w) => match w.checked_sub(1) {
                Some(w) => Width::Bounded(w),
                None => panic!("skip list width underflow: shrinking an empty edge"),
            },
            Width::Unbounded => Width::Unbounded,
        }
    }

    /// Width of the edge left behind when the following edge is folded into this one.
    pub(crate) fn merge(self, following: Width) -> Self {
        match (self, following) {
            (Width::Bounded(a), Width::Bounded(b)) => Width::Bounded(a + b),
            _ => Width::Unbounded,
        }
    }
}

pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) next: Option<NodeId>,
    pub(crate) down: Option<NodeId>,
    pub(crate) width: Width,
}

impl<T> Node<T> {
    pub(crate) fn new(data: T, down: Option<NodeId>) -> Self {
        Node {
            data,
            next: None,
            down,
            width: Width::Unbounded,
        }
    }
}

/// Slot storage for every node of every layer.
///
/// Released slots are recycled, so a `NodeId` is only meaningful while the
/// node it names is still linked.
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0 as usize] = Some(node);
                id
            }
            None => {
                let id = match u32::try_from(self.slots.len()) {
                    Ok(slot) => NodeId(slot),
                    Err(_) => panic!("skip list node arena exceeded {} slots", u32::MAX),
                };
                self.slots.push(Some(node));
                id
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.slots.get_mut(id.0 as usize)?.take()?;
        self.free.push(id);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    /// Number of live nodes across all layers.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling skip list node {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.0 as usize).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("dangling skip list node {:?}", id),
        }
    }
}
