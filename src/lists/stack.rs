use crate::lists::arena::Arena;
use crate::lists::Frontier;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// Unordered singly linked list. Push and pop both work on the front.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    nodes: Arena<Node<T>>,
    head: Option<usize>,
}

/// Pixel or entity indices, the traversal frontier.
pub type IndexStack = Stack<usize>;
pub type FloatStack = Stack<f32>;
/// Pairs of doubles, e.g. coordinates.
pub type PairStack = Stack<(f64, f64)>;
pub type StringStack = Stack<String>;

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            head: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            head: None,
        }
    }

    /// Builds the stack so that the front holds `values[0]`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut stack = Self::with_capacity(values.len());
        values.iter().rev().for_each(|v| stack.push(v.clone()));
        stack
    }

    pub fn push(&mut self, value: T) {
        let index = self.nodes.alloc(Node {
            value,
            next: self.head,
        });
        self.head = Some(index);
    }

    pub fn pop(&mut self) -> Option<T> {
        let index = self.head?;
        let node = self.nodes.release(index);
        self.head = node.next;
        Some(node.value)
    }

    pub fn peek(&self) -> Option<&T> {
        self.head.map(|index| &self.nodes.get(index).value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes, tracked on push/pop.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.live()
    }

    /// Number of nodes found by walking the links.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Drains the list front to back into a contiguous buffer.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            out.push(value);
        }
        out
    }

    /// Drains the list into a contiguous buffer in back to front order.
    pub fn into_vec_rev(self) -> Vec<T> {
        let mut out = self.into_vec();
        out.reverse();
        out
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|v| self.push(v));
    }
}

impl Frontier for Stack<usize> {
    #[inline(always)]
    fn push(&mut self, index: usize) {
        Stack::push(self, index)
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<usize> {
        Stack::pop(self)
    }
}

pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?);
        self.cursor = node.next;
        Some(&node.value)
    }
}
