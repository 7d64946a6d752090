mod arena;
pub mod ordered;
pub mod queue;
pub mod stack;
pub mod two_way_ordered;

pub use ordered::OrderedList;
pub use queue::{IndexQueue, Queue};
pub use stack::{FloatStack, IndexStack, PairStack, Stack, StringStack};
pub use two_way_ordered::TwoWayOrderedList;

/// Pending indices of a traversal.
///
/// Implemented by [`Stack`] (last in, first out) and [`Queue`] (first in, first out).
pub trait Frontier {
    fn push(&mut self, index: usize);
    fn pop(&mut self) -> Option<usize>;
}
