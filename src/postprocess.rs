use crate::arrays::Array2D;
use crate::common::{split_length_to_ranges, Config, Error, Label, ThreadingStrategy};
use crate::label::LabelGrid;
use crate::lists::TwoWayOrderedList;
use log::debug;
use multiversion::multiversion;
use rayon::current_num_threads;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Checks that every label is in `0..count`.
pub fn validate_labels(labels: &[Label], count: usize) -> Result<(), Error> {
    match labels
        .iter()
        .find(|l| **l < 0 || **l as usize >= count)
    {
        Some(label) => Err(Error::LabelOutOfRange {
            label: *label,
            count,
        }),
        None => Ok(()),
    }
}

#[multiversion(targets = "simd")]
fn histogram_part(labels: &[Label], areas: &mut [usize]) {
    for label in labels {
        debug_assert!(
            *label >= 0 && (*label as usize) < areas.len(),
            "label {label} outside of 0..{}",
            areas.len()
        );
        areas[*label as usize] += 1;
    }
}

fn histogram_part_shared(labels: &[Label], areas: &[AtomicUsize]) {
    for label in labels {
        areas[*label as usize].fetch_add(1, Ordering::Relaxed);
    }
}

/// Pixel count of every label in `0..count`.
///
/// `count` must be larger than every label, see [`validate_labels`].
pub fn compute_areas(labels: &[Label], count: usize, threading: ThreadingStrategy) -> Vec<usize> {
    let num_threads = current_num_threads();
    if threading == ThreadingStrategy::SingleThread || num_threads == 1 {
        let mut areas = vec![0; count];
        histogram_part(labels, &mut areas);
        return areas;
    }
    let areas: Vec<AtomicUsize> = Vec::from_iter((0..count).map(|_| AtomicUsize::new(0)));
    let ranges = split_length_to_ranges(labels.len(), num_threads);
    // Local histograms would take more memory than the labels themselves.
    if count.saturating_mul(num_threads) > labels.len() {
        ranges
            .into_par_iter()
            .for_each(|r| histogram_part_shared(&labels[r], &areas));
        return areas.into_iter().map(AtomicUsize::into_inner).collect();
    }
    ranges
        .into_par_iter()
        .for_each(|r| {
            let mut local_areas = vec![0; count];
            histogram_part(&labels[r], &mut local_areas);
            local_areas
                .into_iter()
                .zip(&areas)
                .filter(|(x, _)| *x > 0)
                .for_each(|(x, d)| {
                    d.fetch_add(x, Ordering::Relaxed);
                });
        });
    areas.into_iter().map(AtomicUsize::into_inner).collect()
}

/// Builds the old label -> new label table. Returns the table and the new label count.
///
/// Labels with area above `min_area` survive. When `max_regions` is set only that many of the
/// largest survivors are kept, on equal areas the smaller label wins. Survivors are numbered
/// from `1` in increasing order of their old label, everything else maps to `0`.
fn compact_labels(
    areas: &mut [usize],
    min_area: usize,
    max_regions: Option<usize>,
) -> (Vec<Label>, usize) {
    if let Some(background) = areas.first_mut() {
        *background = 0;
    }
    let mut survivors: Vec<usize> = (1..areas.len())
        .filter(|label| areas[*label] > min_area)
        .collect();

    if let Some(max_regions) = max_regions {
        if survivors.len() > max_regions {
            let mut by_area: TwoWayOrderedList<usize, usize> = TwoWayOrderedList::new();
            // Newer entries pop first among equal keys, so push the largest label first.
            survivors
                .iter()
                .rev()
                .for_each(|label| by_area.push(*label, areas[*label]));
            survivors = (0..max_regions)
                .filter_map(|_| by_area.pop_largest().map(|(label, _)| label))
                .collect();
            survivors.sort_unstable();
        }
    }

    let mut substitute: Vec<Label> = vec![0; areas.len()];
    (1..)
        .zip(&survivors)
        .for_each(|(new_label, old_label)| substitute[*old_label] = new_label);
    (substitute, survivors.len() + 1)
}

#[multiversion(targets = "simd")]
fn relabel_part(labels: &mut [Label], substitute: &[Label]) {
    for label in labels.iter_mut() {
        *label = substitute[*label as usize];
    }
}

#[multiversion(targets = "simd")]
fn relabel_part_with_mask(labels: &mut [Label], mask: &mut [u8], substitute: &[Label]) {
    for (label, m) in labels.iter_mut().zip(mask.iter_mut()) {
        *label = substitute[*label as usize];
        *m = (*label > 0) as u8;
    }
}

fn apply_substitute(
    labels: &mut [Label],
    mask: Option<&mut [u8]>,
    substitute: &[Label],
    threading: ThreadingStrategy,
) {
    if let Some(mask) = &mask {
        assert_eq!(labels.len(), mask.len(), "mask and labels differ in size");
    }
    if threading == ThreadingStrategy::SingleThread {
        match mask {
            Some(mask) => relabel_part_with_mask(labels, mask, substitute),
            None => relabel_part(labels, substitute),
        }
        return;
    }
    let chunk_size = labels.len().div_ceil(current_num_threads()).max(1);
    match mask {
        Some(mask) => labels
            .par_chunks_mut(chunk_size)
            .zip(mask.par_chunks_mut(chunk_size))
            .for_each(|(l, m)| relabel_part_with_mask(l, m, substitute)),
        None => labels
            .par_chunks_mut(chunk_size)
            .for_each(|l| relabel_part(l, substitute)),
    }
}

/// Removes every region with area not larger than `min_area` and renumbers the rest to
/// `1..count` without gaps, keeping their relative order.
///
/// When `mask` is given it's rewritten to `1` where the new label is nonzero and `0` elsewhere.
/// `count` is updated to the number of surviving regions plus one.
pub fn remove_small_and_relabel_raw(
    labels: &mut [Label],
    mask: Option<&mut [u8]>,
    count: &mut usize,
    min_area: usize,
    threading: ThreadingStrategy,
) {
    relabel_filtered(labels, mask, count, min_area, None, threading)
}

/// [`remove_small_and_relabel_raw`] on a label grid.
pub fn remove_small_and_relabel(
    grid: &mut LabelGrid,
    mask: Option<&mut Array2D<u8>>,
    min_area: usize,
    threading: ThreadingStrategy,
) {
    relabel_filtered(
        grid.labels.as_mut_slice(),
        mask.map(|m| m.as_mut_slice()),
        &mut grid.count,
        min_area,
        None,
        threading,
    )
}

/// Area filter followed by the optional cap on the number of regions, both taken from `config`.
pub fn filter_regions(grid: &mut LabelGrid, mask: Option<&mut Array2D<u8>>, config: &Config) {
    relabel_filtered(
        grid.labels.as_mut_slice(),
        mask.map(|m| m.as_mut_slice()),
        &mut grid.count,
        config.min_area,
        config.max_regions,
        config.threading,
    )
}

fn relabel_filtered(
    labels: &mut [Label],
    mask: Option<&mut [u8]>,
    count: &mut usize,
    min_area: usize,
    max_regions: Option<usize>,
    threading: ThreadingStrategy,
) {
    let start = Instant::now();
    let mut areas = compute_areas(labels, *count, threading);
    let (substitute, new_count) = compact_labels(&mut areas, min_area, max_regions);
    apply_substitute(labels, mask, &substitute, threading);
    debug!(
        "Kept {} of {} regions (min_area {min_area}, max_regions {:?}) in {:?}",
        new_count - 1,
        count.saturating_sub(1),
        max_regions,
        start.elapsed()
    );
    *count = new_count;
}
