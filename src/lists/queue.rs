use crate::lists::arena::Arena;
use crate::lists::Frontier;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Two-way linked list. Values enter at the end and leave from the start.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    nodes: Arena<Node<T>>,
    first: Option<usize>,
    last: Option<usize>,
}

pub type IndexQueue = Queue<usize>;

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            first: None,
            last: None,
        }
    }

    pub fn push_back(&mut self, value: T) {
        let index = self.nodes.alloc(Node {
            value,
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(last) => self.nodes.get_mut(last).next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let index = self.first?;
        let node = self.nodes.release(index);
        self.first = node.next;
        match node.next {
            Some(next) => self.nodes.get_mut(next).prev = None,
            None => self.last = None,
        }
        Some(node.value)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.last?;
        let node = self.nodes.release(index);
        self.last = node.prev;
        match node.prev {
            Some(prev) => self.nodes.get_mut(prev).next = None,
            None => self.first = None,
        }
        Some(node.value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.live()
    }

    /// Number of nodes found by walking the links.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Start to end.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.first;
        std::iter::from_fn(move || {
            let node = self.nodes.get(cursor?);
            cursor = node.next;
            Some(&node.value)
        })
    }

    /// Drains the list start to end into a contiguous buffer.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(value) = self.pop_front() {
            out.push(value);
        }
        out
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.first = None;
        self.last = None;
    }
}

impl Frontier for Queue<usize> {
    #[inline(always)]
    fn push(&mut self, index: usize) {
        self.push_back(index)
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }
}
