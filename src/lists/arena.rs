#[derive(Debug, Clone)]
enum Slot<N> {
    Occupied(N),
    Vacant(Option<usize>),
}

/// Slot storage shared by all lists. Links between nodes are slot indices, released slots are
/// chained into a free list and reused by the next allocation.
#[derive(Debug, Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<usize>,
    live: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }
}

impl<N> Arena<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, node: N) -> usize {
        self.live += 1;
        match self.free_head {
            Some(index) => {
                let slot = std::mem::replace(&mut self.slots[index], Slot::Occupied(node));
                match slot {
                    Slot::Vacant(next_free) => self.free_head = next_free,
                    Slot::Occupied(_) => unreachable!("free list points to occupied slot {index}"),
                }
                index
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, index: usize) -> N {
        let slot = std::mem::replace(&mut self.slots[index], Slot::Vacant(self.free_head));
        match slot {
            Slot::Occupied(node) => {
                self.free_head = Some(index);
                self.live -= 1;
                node
            }
            Slot::Vacant(_) => panic!("double release of slot {index}"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &N {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to released slot {index}"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> &mut N {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to released slot {index}"),
        }
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::default();
        let a = arena.alloc(10u32);
        let b = arena.alloc(20);
        assert_eq!(arena.live(), 2);
        assert_eq!(arena.release(a), 10);
        let c = arena.alloc(30);
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 20);
        *arena.get_mut(c) += 1;
        assert_eq!(*arena.get(c), 31);
        arena.clear();
        assert_eq!(arena.live(), 0);
    }

    #[test]
    #[should_panic]
    fn double_release_panics() {
        let mut arena = Arena::default();
        let a = arena.alloc(1u8);
        arena.release(a);
        arena.release(a);
    }
}
