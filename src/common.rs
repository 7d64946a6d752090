use std::ops::Range;
use thiserror::Error;

/// Label value stored in a label grid. `0` is background, `1..count` are components.
pub type Label = i64;

#[derive(Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("buffer has {actual} elements, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("connectivity {0} is not recognized, use 4 or 8")]
    InvalidConnectivity(u8),
    #[error("adjacency matrix must be square, got {width}x{height}")]
    NotSquare { width: usize, height: usize },
    #[error("label {label} is outside of the label count {count}")]
    LabelOutOfRange { label: Label, count: usize },
}

/// Which neighbors of a pixel are considered connected to it.
#[derive(Clone, PartialEq, Eq, Debug, Copy)]
pub enum Connectivity {
    /// Up, down, left and right.
    Four,
    /// The orthogonal neighbors plus the four diagonals.
    Eight,
}

impl TryFrom<u8> for Connectivity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(Error::InvalidConnectivity(other)),
        }
    }
}

/// Order in which the traversal frontier hands back pending pixels.
///
/// The labels are the same for both, only the visiting order differs.
#[derive(Clone, PartialEq, Eq, Debug, Copy)]
pub enum FrontierOrder {
    /// Insert and remove at the same end (depth-first-like visiting order).
    Lifo,
    /// Insert at the end, remove from the start (breadth-first visiting order).
    Fifo,
}

/// Changes between parallelization schemas of the linear passes (area histogram and relabeling).
#[derive(Clone, PartialEq, Eq, Debug, Copy)]
pub enum ThreadingStrategy {
    /// No threading - used for correctness checks and very small grids.
    SingleThread,
    /// Split the buffer into `rayon::current_num_threads()` chunks. Every chunk keeps its own
    /// histogram which are summed at the end.
    Chunked,
}

/// Main config for the labeling and post-processing.
#[derive(Clone, Debug)]
pub struct Config {
    /// Adjacency used by the grid labeler.
    pub connectivity: Connectivity,
    /// Frontier discipline of the flood fill. Does not change the resulting labels.
    pub frontier: FrontierOrder,
    /// Regions with area less or equal to this are removed by `postprocess::filter_regions()`.
    ///
    /// The comparison is strict, region with area `min_area + 1` is the smallest which survives.
    pub min_area: usize,
    /// Keep only this many largest regions after the area filter. `None` keeps everything.
    ///
    /// Surviving regions are still numbered in increasing order of their original label.
    pub max_regions: Option<usize>,
    /// Threading of the linear passes. The traversal itself is always single threaded.
    pub threading: ThreadingStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            frontier: FrontierOrder::Lifo,
            min_area: 0,
            max_regions: None,
            threading: ThreadingStrategy::Chunked,
        }
    }
}

/// Element count of a `width * height` buffer, checked against the actual buffer length.
pub(crate) fn check_dimensions(
    width: usize,
    height: usize,
    actual: usize,
) -> Result<usize, Error> {
    match width.checked_mul(height) {
        Some(expected) if expected == actual => Ok(expected),
        Some(expected) => Err(Error::DimensionMismatch { expected, actual }),
        None => Err(Error::DimensionMismatch {
            expected: usize::MAX,
            actual,
        }),
    }
}

pub(crate) fn split_length_to_ranges(length: usize, splits: usize) -> Vec<Range<usize>> {
    let chunk_size = length / splits;
    let rem = length % splits;
    (0..splits)
        .scan((rem, 0usize), |(r, acc), _split| {
            let mut size = chunk_size;
            if *r > 0 {
                *r -= 1;
                size += 1;
            }
            let out = (*acc, *acc + size);
            *acc += size;
            Some(out.0..out.1)
        })
        .collect()
}
