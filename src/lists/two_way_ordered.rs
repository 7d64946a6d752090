use crate::lists::arena::Arena;
use crate::lists::stack::Stack;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Node<T, K> {
    value: T,
    key: K,
    /// Neighbor with smaller or equal key.
    smaller: Option<usize>,
    /// Neighbor with larger or equal key.
    larger: Option<usize>,
}

/// Two-way linked list kept sorted by key with handles on both ends.
///
/// Pushing walks from the largest end, so it's cheap when new keys tend to be large. Popping from
/// either end and peeking the smallest are O(1). Among equal keys the oldest is closest to the
/// smallest end.
#[derive(Debug, Clone)]
pub struct TwoWayOrderedList<T, K = f32> {
    nodes: Arena<Node<T, K>>,
    largest: Option<usize>,
    smallest: Option<usize>,
}

impl<T, K: PartialOrd + Copy> Default for TwoWayOrderedList<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: PartialOrd + Copy> TwoWayOrderedList<T, K> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            largest: None,
            smallest: None,
        }
    }

    pub fn push(&mut self, value: T, key: K) {
        // Find the first node (from the largest end) whose key is not larger than `key`.
        // Unordered keys (NaN) stop the walk at once and land on the largest end.
        let mut larger: Option<usize> = None;
        let mut cursor = self.largest;
        while let Some(index) = cursor {
            let node = self.nodes.get(index);
            if key.partial_cmp(&node.key) != Some(Ordering::Less) {
                break;
            }
            larger = Some(index);
            cursor = node.smaller;
        }
        let index = self.nodes.alloc(Node {
            value,
            key,
            smaller: cursor,
            larger,
        });
        match larger {
            Some(larger) => self.nodes.get_mut(larger).smaller = Some(index),
            None => self.largest = Some(index),
        }
        match cursor {
            Some(smaller) => self.nodes.get_mut(smaller).larger = Some(index),
            None => self.smallest = Some(index),
        }
    }

    pub fn pop_smallest(&mut self) -> Option<(T, K)> {
        let index = self.smallest?;
        let node = self.nodes.release(index);
        self.smallest = node.larger;
        match node.larger {
            Some(larger) => self.nodes.get_mut(larger).smaller = None,
            None => self.largest = None,
        }
        Some((node.value, node.key))
    }

    pub fn pop_largest(&mut self) -> Option<(T, K)> {
        let index = self.largest?;
        let node = self.nodes.release(index);
        self.largest = node.smaller;
        match node.smaller {
            Some(smaller) => self.nodes.get_mut(smaller).larger = None,
            None => self.smallest = None,
        }
        Some((node.value, node.key))
    }

    /// Smallest element without removing it.
    pub fn smallest(&self) -> Option<(&T, K)> {
        self.smallest.map(|index| {
            let node = self.nodes.get(index);
            (&node.value, node.key)
        })
    }

    pub fn largest(&self) -> Option<(&T, K)> {
        self.largest.map(|index| {
            let node = self.nodes.get(index);
            (&node.value, node.key)
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.largest.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.live()
    }

    /// Number of nodes found by walking the links.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Largest key first.
    pub fn iter(&self) -> impl Iterator<Item = (&T, K)> + '_ {
        let mut cursor = self.largest;
        std::iter::from_fn(move || {
            let node = self.nodes.get(cursor?);
            cursor = node.smaller;
            Some((&node.value, node.key))
        })
    }

    /// Drains into an unordered stack, dropping the keys. The smallest key ends on the front.
    pub fn into_stack(mut self) -> Stack<T> {
        let mut out = Stack::with_capacity(self.len());
        while let Some((value, _)) = self.pop_largest() {
            out.push(value);
        }
        out
    }

    /// Drains the list largest key first into a contiguous buffer, dropping the keys.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some((value, _)) = self.pop_largest() {
            out.push(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::TwoWayOrderedList;

    #[test]
    fn both_ends() {
        let mut list: TwoWayOrderedList<usize> = TwoWayOrderedList::new();
        assert_eq!(list.pop_smallest(), None);
        list.push(1, 5.0);
        list.push(2, 1.0);
        list.push(3, 9.0);
        list.push(4, 3.0);
        assert_eq!(list.len(), 4);
        assert_eq!(list.smallest(), Some((&2, 1.0)));
        assert_eq!(list.largest(), Some((&3, 9.0)));
        assert_eq!(list.pop_smallest(), Some((2, 1.0)));
        assert_eq!(list.pop_largest(), Some((3, 9.0)));
        assert_eq!(list.smallest(), Some((&4, 3.0)));
        assert_eq!(list.pop_largest(), Some((1, 5.0)));
        assert_eq!(list.pop_largest(), Some((4, 3.0)));
        assert!(list.is_empty());
        assert_eq!(list.smallest(), None);
        assert_eq!(list.pop_largest(), None);
    }

    #[test]
    fn iteration_and_ties() {
        let mut list: TwoWayOrderedList<char, u32> = TwoWayOrderedList::new();
        list.push('a', 2);
        list.push('b', 2);
        list.push('c', 1);
        list.push('d', 3);
        let order: Vec<char> = list.iter().map(|(v, _)| *v).collect();
        assert_eq!(order, ['d', 'b', 'a', 'c']);
        assert_eq!(list.pop_smallest(), Some(('c', 1)));
        assert_eq!(list.pop_smallest(), Some(('a', 2)));
    }

    #[test]
    fn into_stack_smallest_on_front() {
        let mut list: TwoWayOrderedList<u8> = TwoWayOrderedList::new();
        list.push(30, 3.0);
        list.push(10, 1.0);
        list.push(20, 2.0);
        assert_eq!(list.into_stack().into_vec(), [10, 20, 30]);
    }

    #[test]
    fn count_and_into_vec() {
        let mut list: TwoWayOrderedList<u8> = TwoWayOrderedList::new();
        assert_eq!(list.count(), 0);
        list.push(20, 2.0);
        list.push(30, 3.0);
        list.push(10, 1.0);
        assert_eq!(list.pop_smallest(), Some((10, 1.0)));
        list.push(40, 4.0);
        assert_eq!(list.count(), 3);
        assert_eq!(list.count(), list.len());
        assert_eq!(list.into_vec(), [40, 30, 20]);
    }

    #[test]
    fn nan_key_goes_to_largest_end() {
        let mut list: TwoWayOrderedList<char> = TwoWayOrderedList::new();
        list.push('a', 1.0);
        list.push('c', 0.5);
        list.push('b', 2.0);
        list.push('n', f32::NAN);
        assert_eq!(list.largest().map(|(v, _)| *v), Some('n'));
        assert_eq!(list.smallest(), Some((&'c', 0.5)));
        assert_eq!(list.count(), 4);
        assert_eq!(list.into_vec(), ['n', 'b', 'a', 'c']);
    }
}
