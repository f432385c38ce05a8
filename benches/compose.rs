//! Source-set computation and render-path benchmarks
//!
//! Measures the per-render cost of the responsive pipeline: descriptor-string
//! generation across a breakpoint list, full element-tree composition, and
//! HTML serialization of the composed tree.
//!
//! Running:
//! ```bash
//! cargo bench --bench compose -- --noplot
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use respimg::{
  source_set, AssetDimensions, AssetMetadata, CdnImageUrlBuilder, ImageAsset, ImageOptions,
  LazyImage,
};

fn bench_asset() -> ImageAsset {
  ImageAsset {
    reference: Some("image-9f2c41d8b7a6-4000x2250-jpg".to_string()),
    id: None,
    url: "https://cdn.example.com/raw/9f2c41d8b7a6.jpg".to_string(),
    extension: "jpg".to_string(),
    mime_type: "image/jpeg".to_string(),
    metadata: AssetMetadata {
      lqip: "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD".to_string(),
      dimensions: AssetDimensions {
        width: 4000,
        height: 2250,
        aspect_ratio: 4000.0 / 2250.0,
      },
    },
  }
}

fn cdn() -> CdnImageUrlBuilder {
  CdnImageUrlBuilder::parse("https://cdn.example.com/images").expect("parse endpoint")
}

fn compose_benchmarks(c: &mut Criterion) {
  let builder = cdn();
  let asset = bench_asset();
  // Denser than the default list to keep URL construction the dominant cost.
  let breakpoints: Vec<u32> = (1u32..=16).rev().map(|step| step * 120).collect();

  let mut group = c.benchmark_group("compose");

  group.bench_function("source_set_16_breakpoints", |b| {
    b.iter(|| {
      black_box(source_set(
        &builder,
        black_box(&asset),
        "webp",
        1780,
        black_box(&breakpoints),
      ))
    })
  });

  let mut fluid = LazyImage::new(
    ImageOptions::new(bench_asset())
      .fluid()
      .with_break_points(breakpoints.clone())
      .with_sizes("(min-width: 1024px) 50vw, 100vw"),
    cdn(),
  );
  fluid.signal_visible();
  fluid.signal_loaded();

  group.bench_function("render_fluid_revealed", |b| {
    b.iter(|| black_box(fluid.render().expect("render")))
  });

  let tree = fluid
    .render()
    .expect("render")
    .expect("raster output");

  group.bench_function("serialize_html", |b| {
    b.iter(|| black_box(black_box(&tree).to_html()))
  });

  group.finish();
}

criterion_group!(benches, compose_benchmarks);
criterion_main!(benches);
