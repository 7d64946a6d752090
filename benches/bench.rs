use criterion::*;
use fast_ccl_rust::arrays::Array2D;
use fast_ccl_rust::common::{Config, Connectivity, FrontierOrder, ThreadingStrategy};
use fast_ccl_rust::label::{connected_components, label_tiles};
use fast_ccl_rust::merge::merge_adjacent;
use fast_ccl_rust::postprocess::{compute_areas, filter_regions};
use image::imageops::{resize, FilterType};
use image::{GrayImage, Luma};
use std::time::Duration;

/// Blobby binary mask: coarse noise upscaled with bilinear filter and thresholded.
fn blob_mask(width: u32, height: u32) -> Array2D<u8> {
    let coarse = GrayImage::from_fn(width / 16, height / 16, |x, y| {
        let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)).wrapping_mul(83_492_791);
        Luma([(h >> 24) as u8])
    });
    let fine = resize(&coarse, width, height, FilterType::Triangle);
    let data: Vec<u8> = fine.as_raw().iter().map(|v| (*v > 140) as u8).collect();
    Array2D::from_slice(&data, width as usize, height as usize).unwrap()
}

fn bench_connected_components(c: &mut Criterion) {
    sas::init();
    let mask = blob_mask(1920, 1080);
    let mut group = c.benchmark_group("connected_components");
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        for frontier in [FrontierOrder::Lifo, FrontierOrder::Fifo] {
            let config = Config {
                connectivity,
                frontier,
                ..Config::default()
            };
            group.bench_with_input(
                BenchmarkId::new("label", format!("{:?}::{:?}", connectivity, frontier)),
                &config,
                |b, config| {
                    b.iter(|| {
                        let _ = black_box(connected_components(&mask, config));
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_label_tiles(c: &mut Criterion) {
    sas::init();
    let masks: Vec<Array2D<u8>> = (0..16).map(|_| blob_mask(480, 270)).collect();
    let config = Config::default();
    c.bench_function("label_tiles", |b| {
        b.iter(|| {
            let _ = black_box(label_tiles(&masks, &config));
        });
    });
}

fn bench_postprocess(c: &mut Criterion) {
    sas::init();
    let mask = blob_mask(1920, 1080);
    let grid = connected_components(&mask, &Config::default());
    let mut group = c.benchmark_group("postprocess");
    for threading in [ThreadingStrategy::SingleThread, ThreadingStrategy::Chunked] {
        group.bench_with_input(
            BenchmarkId::new("compute_areas", format!("{:?}", threading)),
            &threading,
            |b, &threading| {
                b.iter(|| {
                    let _ = black_box(compute_areas(grid.labels.as_slice(), grid.count, threading));
                });
            },
        );
        let config = Config {
            min_area: 64,
            threading,
            ..Config::default()
        };
        group.bench_with_input(
            BenchmarkId::new("filter_regions", format!("{:?}", threading)),
            &config,
            |b, config| {
                b.iter_batched(
                    || connected_components(&mask, config),
                    |mut grid| {
                        filter_regions(&mut grid, None, config);
                        grid
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_merge_adjacent(c: &mut Criterion) {
    let numside = 1000;
    let mut adj: Array2D<u8> = Array2D::zeroed(numside, numside);
    for p in 1..numside - 1 {
        if p % 10 != 0 {
            adj[(p, p + 1)] = 1;
            adj[(p + 1, p)] = 1;
        }
    }
    let config = Config::default();
    c.bench_function("merge_adjacent", |b| {
        b.iter(|| {
            let _ = black_box(merge_adjacent(&adj, &config));
        });
    });
}

criterion_group!(name = benches;
config = Criterion::default().measurement_time(Duration::from_secs(10)).warm_up_time(Duration::from_secs(3));
targets = bench_connected_components, bench_label_tiles);
criterion_group!(name = benches1;
config = Criterion::default().measurement_time(Duration::from_secs(10)).warm_up_time(Duration::from_secs(3));
targets = bench_postprocess, bench_merge_adjacent);
criterion_main!(benches, benches1);
