#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use respimg::{
  AssetDimensions, AssetMetadata, ImageAsset, ImageOptions, ImageUrlBuilder, LazyImage,
};

const MAX_BREAKPOINTS: usize = 64;

#[derive(Arbitrary, Debug)]
struct PipelineInput {
  asset_json: String,
  reference: Option<String>,
  id: Option<String>,
  extension: String,
  ratio: f32,
  override_ratio: Option<f32>,
  breakpoints: Vec<u32>,
  width: Option<u32>,
  height: Option<u32>,
  max_width: u32,
  fluid: bool,
  visible: bool,
  loaded: bool,
}

struct EchoBuilder;

impl ImageUrlBuilder for EchoBuilder {
  fn build_url(&self, asset: &ImageAsset, width: u32, format: &str) -> String {
    format!(
      "echo://{}/{}.{}",
      asset.identity().unwrap_or("anon"),
      width,
      format
    )
  }
}

fn exercise(asset: ImageAsset, input: &PipelineInput) {
  let mut breakpoints = input.breakpoints.clone();
  breakpoints.truncate(MAX_BREAKPOINTS);

  let mut options = ImageOptions::new(asset)
    .with_break_points(breakpoints)
    .with_max_width(input.max_width);
  if input.fluid {
    options = options.fluid();
  }
  if let Some(width) = input.width {
    options = options.with_width(width);
  }
  if let Some(height) = input.height {
    options = options.with_height(height);
  }
  if let Some(ratio) = input.override_ratio {
    options = options.with_aspect_ratio(ratio);
  }

  let mut image = LazyImage::new(options, EchoBuilder);
  if input.visible {
    image.signal_visible();
  }
  if input.loaded {
    image.signal_loaded();
  }

  // Misconfiguration must surface as Err or a suppressed render, never a
  // panic; whatever renders must serialize.
  if let Ok(Some(tree)) = image.render() {
    let _ = tree.to_html();
  }
}

fuzz_target!(|input: PipelineInput| {
  if let Ok(parsed) = ImageAsset::from_json(&input.asset_json) {
    exercise(parsed, &input);
  }

  let constructed = ImageAsset {
    reference: input.reference.clone(),
    id: input.id.clone(),
    url: String::new(),
    extension: input.extension.clone(),
    mime_type: String::new(),
    metadata: AssetMetadata {
      lqip: String::new(),
      dimensions: AssetDimensions {
        width: 0,
        height: 0,
        aspect_ratio: input.ratio,
      },
    },
  };
  exercise(constructed, &input);
});
