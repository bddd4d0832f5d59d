use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use palette::Srgb;
use pixelize::{quantize, FloydSteinberg, PaletteTable, PixelizePipeline, RasterBuffer};

fn synthetic_image(width: u32, height: u32) -> RasterBuffer {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Srgb::new(
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    ((x + y) * 255 / (width + height)) as u8,
                )
            })
        })
        .collect();
    RasterBuffer::new(width, height, pixels).unwrap()
}

fn synthetic_palette(k: u32) -> PaletteTable {
    let colors = (0..k)
        .map(|i| {
            let v = (i * 255 / (k - 1).max(1)) as u8;
            Srgb::new(v, 255 - v, v / 2)
        })
        .collect();
    PaletteTable::new(colors).unwrap()
}

fn bench_group<'a>(c: &'a mut Criterion, name: &str) -> criterion::BenchmarkGroup<'a, criterion::measurement::WallTime> {
    let mut group = c.benchmark_group(name);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_secs(2));
    group
}

fn remap(c: &mut Criterion) {
    let image = synthetic_image(640, 360);
    let mut group = bench_group(c, "remap");

    for k in [16, 64, 256] {
        let palette = synthetic_palette(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &palette, |b, palette| {
            b.iter(|| quantize::indexed(black_box(&image), palette));
        });
    }

    group.finish();
}

fn dither(c: &mut Criterion) {
    let image = synthetic_image(640, 360);
    let mut group = bench_group(c, "dither");

    for k in [16, 64, 256] {
        let palette = synthetic_palette(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &palette, |b, palette| {
            b.iter(|| FloydSteinberg::new().indexed(black_box(&image), palette));
        });
    }

    group.finish();
}

fn pipeline(c: &mut Criterion) {
    let image = synthetic_image(640, 360);
    let palette = synthetic_palette(64);
    let mut group = bench_group(c, "pipeline");

    for block_size in [2, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &block_size| {
                b.iter(|| {
                    PixelizePipeline::new(black_box(&image), &palette)
                        .block_size(block_size)
                        .run()
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, remap, dither, pipeline);
criterion_main!(benches);
