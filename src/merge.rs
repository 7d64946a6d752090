use crate::arrays::Array2D;
use crate::common::{check_dimensions, Config, Error, FrontierOrder, Label};
use crate::lists::{Frontier, IndexQueue, IndexStack};
use log::debug;
use std::time::Instant;

/// New label of every entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMap {
    /// `labels[e]` is the component of entity `e`. `labels[0]` stays `0`.
    pub labels: Vec<Label>,
    /// One more than the largest label.
    pub count: usize,
}

impl ComponentMap {
    #[inline]
    pub fn num_components(&self) -> usize {
        self.count.saturating_sub(1)
    }
}

/// Gives all entities of one connected component the same label.
///
/// Entities are numbered `1..numside`, index `0` of the matrix is a reserved slot which never
/// gets a label. The matrix is scanned densely, so a merge costs O(numside²).
///
/// Any entry different from `T::default()` is an edge. The matrix should be symmetric, this is
/// not checked.
pub fn merge_adjacent<T>(adjacency: &Array2D<T>, config: &Config) -> Result<ComponentMap, Error>
where
    T: Copy + Default + PartialEq,
{
    if adjacency.width != adjacency.height {
        return Err(Error::NotSquare {
            width: adjacency.width,
            height: adjacency.height,
        });
    }
    Ok(merge_slice(
        adjacency.as_slice(),
        adjacency.width,
        config.frontier,
    ))
}

/// Same as [`merge_adjacent`] for a caller-owned `numside * numside` row-major buffer.
pub fn merge_adjacent_raw<T>(adjacency: &[T], numside: usize) -> Result<ComponentMap, Error>
where
    T: Copy + Default + PartialEq,
{
    check_dimensions(numside, numside, adjacency.len())?;
    Ok(merge_slice(adjacency, numside, FrontierOrder::Lifo))
}

fn merge_slice<T>(adjacency: &[T], numside: usize, frontier: FrontierOrder) -> ComponentMap
where
    T: Copy + Default + PartialEq,
{
    let start = Instant::now();
    let mut labels: Vec<Label> = vec![0; numside];
    let count = match frontier {
        FrontierOrder::Lifo => traverse(adjacency, &mut labels, &mut IndexStack::new()),
        FrontierOrder::Fifo => traverse(adjacency, &mut labels, &mut IndexQueue::new()),
    };
    debug!(
        "Merged {} entities into {} components in {:?}",
        numside.saturating_sub(1),
        count - 1,
        start.elapsed()
    );
    ComponentMap { labels, count }
}

fn traverse<T, F>(adjacency: &[T], labels: &mut [Label], frontier: &mut F) -> usize
where
    T: Copy + Default + PartialEq,
    F: Frontier,
{
    let numside = labels.len();
    let no_edge = T::default();
    let mut current: Label = 1;
    for i in 1..numside {
        if labels[i] != 0 {
            continue;
        }
        labels[i] = current;
        frontier.push(i);
        while let Some(p) = frontier.pop() {
            let row = &adjacency[p * numside..(p + 1) * numside];
            for (q, edge) in row.iter().enumerate().skip(1) {
                if *edge != no_edge && labels[q] == 0 {
                    labels[q] = current;
                    frontier.push(q);
                }
            }
        }
        current += 1;
    }
    current as usize
}
