use crate::arrays::Array2D;
use crate::common::{check_dimensions, Config, Connectivity, Error, FrontierOrder, Label};
use crate::lists::{Frontier, IndexQueue, IndexStack};
use crate::postprocess::compute_areas;
use assume::assume;
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

/// Labels of a grid together with the label count.
#[derive(Debug)]
pub struct LabelGrid {
    /// `0` for background, `1..count` for components. Same dimensions as the mask.
    pub labels: Array2D<Label>,
    /// One more than the largest label, usable as the length of label-indexed arrays.
    pub count: usize,
}

impl LabelGrid {
    #[inline]
    pub fn num_components(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Pixel count of every label, indexed by label. Index `0` holds the background area.
    pub fn areas(&self, config: &Config) -> Vec<usize> {
        compute_areas(self.labels.as_slice(), self.count, config.threading)
    }

    /// Binary mask with `1` wherever the label is nonzero.
    pub fn to_mask(&self) -> Array2D<u8> {
        let mut mask: Array2D<u8> = Array2D::zeroed(self.labels.width, self.labels.height);
        mask.as_mut_slice()
            .iter_mut()
            .zip(self.labels.as_slice())
            .for_each(|(m, l)| *m = (*l > 0) as u8);
        mask
    }
}

/// Finds the connected components of all nonzero pixels of `mask`.
///
/// Labels are assigned in row-major order of the first pixel of every component, starting at
/// `1`. The returned count is the number of components plus one.
///
/// # Examples
///
/// ```
/// use fast_ccl_rust::arrays::Array2D;
/// use fast_ccl_rust::common::{Config, Connectivity};
/// use fast_ccl_rust::label::connected_components;
///
/// let mask = Array2D::from_slice(&[1u8, 0, 0, 1], 2, 2).unwrap();
/// let mut config = Config::default();
/// config.connectivity = Connectivity::Four;
/// assert_eq!(connected_components(&mask, &config).num_components(), 2);
/// config.connectivity = Connectivity::Eight;
/// assert_eq!(connected_components(&mask, &config).num_components(), 1);
/// ```
pub fn connected_components(mask: &Array2D<u8>, config: &Config) -> LabelGrid {
    label_slice(
        mask.as_slice(),
        mask.height,
        mask.width,
        config.connectivity,
        config.frontier,
    )
}

/// Same as [`connected_components`] for a caller-owned row-major buffer and a raw connectivity
/// value (`4` or `8`).
pub fn connected_components_raw(
    mask: &[u8],
    rows: usize,
    cols: usize,
    connectivity: u8,
) -> Result<LabelGrid, Error> {
    let connectivity = Connectivity::try_from(connectivity)?;
    check_dimensions(cols, rows, mask.len())?;
    Ok(label_slice(
        mask,
        rows,
        cols,
        connectivity,
        FrontierOrder::Lifo,
    ))
}

/// Labels every mask independently, spreading the masks over the rayon thread pool.
pub fn label_tiles(masks: &[Array2D<u8>], config: &Config) -> Vec<LabelGrid> {
    masks
        .par_iter()
        .map(|mask| connected_components(mask, config))
        .collect()
}

fn label_slice(
    mask: &[u8],
    rows: usize,
    cols: usize,
    connectivity: Connectivity,
    frontier: FrontierOrder,
) -> LabelGrid {
    debug_assert_eq!(mask.len(), rows * cols);
    let start = Instant::now();
    let mut labels: Array2D<Label> = Array2D::zeroed(cols, rows);
    let count = match frontier {
        FrontierOrder::Lifo => flood_fill(
            mask,
            labels.as_mut_slice(),
            cols,
            connectivity,
            &mut IndexStack::new(),
        ),
        FrontierOrder::Fifo => flood_fill(
            mask,
            labels.as_mut_slice(),
            cols,
            connectivity,
            &mut IndexQueue::new(),
        ),
    };
    debug!(
        "Labeled {} components in {cols}x{rows} mask ({:?}, {:?}) in {:?}",
        count - 1,
        connectivity,
        frontier,
        start.elapsed()
    );
    LabelGrid { labels, count }
}

#[inline(always)]
fn claim<F: Frontier>(
    mask: &[u8],
    labels: &mut [Label],
    frontier: &mut F,
    index: usize,
    label: Label,
) {
    assume!(unsafe: index < mask.len(), "index: {index} > {}", mask.len());
    assume!(unsafe: index < labels.len(), "index: {index} > {}", labels.len());
    if mask[index] != 0 && labels[index] == 0 {
        labels[index] = label;
        frontier.push(index);
    }
}

/// Fills `labels` (which must be all zero) and returns the label count.
///
/// A pixel is labeled when it enters the frontier, so every pixel is pushed and popped at most
/// once.
fn flood_fill<F: Frontier>(
    mask: &[u8],
    labels: &mut [Label],
    cols: usize,
    connectivity: Connectivity,
    frontier: &mut F,
) -> usize {
    assert_eq!(mask.len(), labels.len());
    let rows = if cols == 0 { 0 } else { mask.len() / cols };
    let mut current: Label = 1;
    for i in 0..mask.len() {
        if mask[i] == 0 || labels[i] != 0 {
            continue;
        }
        labels[i] = current;
        frontier.push(i);
        while let Some(p) = frontier.pop() {
            let (row, col) = (p / cols, p % cols);
            let north = row > 0;
            let south = row + 1 < rows;
            let west = col > 0;
            let east = col + 1 < cols;

            if north {
                claim(mask, labels, frontier, p - cols, current);
            }
            if south {
                claim(mask, labels, frontier, p + cols, current);
            }
            if west {
                claim(mask, labels, frontier, p - 1, current);
            }
            if east {
                claim(mask, labels, frontier, p + 1, current);
            }

            if connectivity == Connectivity::Eight {
                // A corner is only inside the grid when both of its sides are.
                if north && west {
                    claim(mask, labels, frontier, p - cols - 1, current);
                }
                if north && east {
                    claim(mask, labels, frontier, p - cols + 1, current);
                }
                if south && west {
                    claim(mask, labels, frontier, p + cols - 1, current);
                }
                if south && east {
                    claim(mask, labels, frontier, p + cols + 1, current);
                }
            }
        }
        current += 1;
    }
    current as usize
}
