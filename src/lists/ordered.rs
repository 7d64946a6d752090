use crate::lists::arena::Arena;
use crate::lists::stack::Stack;

#[derive(Debug, Clone)]
struct Node<T, K> {
    value: T,
    key: K,
    next: Option<usize>,
}

/// Singly linked list kept sorted by a key (`f32` unless stated), smallest key at the front.
///
/// Insertion is O(n): the list is walked from the front and the new node goes in front of the
/// first node with a strictly larger key, so equal keys keep their insertion order.
#[derive(Debug, Clone)]
pub struct OrderedList<T, K = f32> {
    nodes: Arena<Node<T, K>>,
    head: Option<usize>,
}

impl<T, K: PartialOrd + Copy> Default for OrderedList<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: PartialOrd + Copy> OrderedList<T, K> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            head: None,
        }
    }

    pub fn push(&mut self, value: T, key: K) {
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.nodes.get(index);
            if key < node.key {
                break;
            }
            prev = Some(index);
            cursor = node.next;
        }
        let index = self.nodes.alloc(Node {
            value,
            key,
            next: cursor,
        });
        match prev {
            Some(prev) => self.nodes.get_mut(prev).next = Some(index),
            None => self.head = Some(index),
        }
    }

    /// Removes the node with the smallest key.
    pub fn pop(&mut self) -> Option<(T, K)> {
        let index = self.head?;
        let node = self.nodes.release(index);
        self.head = node.next;
        Some((node.value, node.key))
    }

    pub fn peek(&self) -> Option<(&T, K)> {
        self.head.map(|index| {
            let node = self.nodes.get(index);
            (&node.value, node.key)
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.live()
    }

    /// Number of nodes found by walking the links.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Smallest key first.
    pub fn iter(&self) -> impl Iterator<Item = (&T, K)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.nodes.get(cursor?);
            cursor = node.next;
            Some((&node.value, node.key))
        })
    }

    /// Drains into an unordered stack, dropping the keys. The largest key ends on the front.
    pub fn into_stack(mut self) -> Stack<T> {
        let mut out = Stack::with_capacity(self.len());
        while let Some((value, _)) = self.pop() {
            out.push(value);
        }
        out
    }

    /// Drains the list smallest key first into a contiguous buffer, dropping the keys.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some((value, _)) = self.pop() {
            out.push(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedList;

    #[test]
    fn pops_in_ascending_key_order() {
        let mut list = OrderedList::new();
        list.push(10usize, 3.0);
        list.push(11, 1.0);
        list.push(12, 2.0);
        list.push(13, 0.5);
        assert_eq!(list.len(), 4);
        assert_eq!(list.peek(), Some((&13, 0.5)));
        assert_eq!(list.pop(), Some((13, 0.5)));
        assert_eq!(list.pop(), Some((11, 1.0)));
        assert_eq!(list.pop(), Some((12, 2.0)));
        assert_eq!(list.pop(), Some((10, 3.0)));
        assert_eq!(list.pop(), None);
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut list = OrderedList::new();
        list.push('a', 1.0);
        list.push('b', 1.0);
        list.push('c', 0.0);
        list.push('d', 1.0);
        let order: Vec<char> = list.iter().map(|(v, _)| *v).collect();
        assert_eq!(order, ['c', 'a', 'b', 'd']);
    }

    #[test]
    fn into_stack_reverses() {
        let mut list = OrderedList::new();
        list.push(1u32, 0.1);
        list.push(3, 0.3);
        list.push(2, 0.2);
        assert_eq!(list.into_stack().into_vec(), [3, 2, 1]);
    }

    #[test]
    fn count_and_into_vec() {
        let mut list: OrderedList<u32, i32> = OrderedList::new();
        assert_eq!(list.count(), 0);
        list.push(7, 3);
        list.push(5, -1);
        list.push(6, 0);
        assert_eq!(list.count(), 3);
        assert_eq!(list.pop(), Some((5, -1)));
        assert_eq!(list.count(), 2);
        assert_eq!(list.into_vec(), [6, 7]);
    }
}
