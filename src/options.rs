//! Render configuration
//!
//! Every tunable lives in [`ImageOptions`] with a documented default, so
//! defaults are decided in one place instead of at call sites. Options are
//! read once per render; changing them between renders is allowed and takes
//! effect on the next render.

use crate::asset::ImageAsset;
use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Width ceiling (and fluid-mode variant cap) applied when no explicit
/// maximum is configured.
pub const DEFAULT_MAX_WIDTH: u32 = 1780;

/// Candidate variant widths offered when the caller supplies none.
pub const DEFAULT_BREAKPOINTS: [u32; 5] = [1200, 1000, 800, 600, 400];

/// Visual fit applied to the placeholder and the final image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
  #[default]
  Cover,
  Contain,
}

impl ObjectFit {
  pub fn as_css(&self) -> &'static str {
    match self {
      ObjectFit::Cover => "cover",
      ObjectFit::Contain => "contain",
    }
  }
}

/// The full configuration surface for one image instance.
///
/// | Field | Effect | Default |
/// |---|---|---|
/// | `image` | asset descriptor to render | required |
/// | `is_fluid` | fluid (fill parent) vs fixed sizing | `false` |
/// | `object_fit` | cover/contain for placeholder and final image | `Cover` |
/// | `max_width` | width ceiling and fluid variant cap | `1780` |
/// | `width`, `height` | explicit fixed-mode dimensions | unset |
/// | `aspect_ratio` | overrides the asset's intrinsic ratio | unset |
/// | `alt` | accessibility text | empty |
/// | `class_name` | styling hook on the container | unset |
/// | `break_points` | candidate variant widths | `[1200, 1000, 800, 600, 400]` |
/// | `loader` | custom placeholder content replacing the lqip image | unset |
/// | `sizes` | `sizes` hint forwarded verbatim to every source | unset |
///
/// # Examples
///
/// ```
/// use respimg::{ImageAsset, ImageOptions, ObjectFit};
///
/// let options = ImageOptions::new(ImageAsset::default())
///   .fluid()
///   .with_object_fit(ObjectFit::Contain)
///   .with_alt("A mountain at dusk");
///
/// assert!(options.is_fluid);
/// assert_eq!(options.max_width, 1780);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
  pub image: ImageAsset,
  pub is_fluid: bool,
  pub object_fit: ObjectFit,
  pub max_width: u32,
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub aspect_ratio: Option<f32>,
  pub alt: String,
  pub class_name: Option<String>,
  pub break_points: Vec<u32>,
  pub loader: Option<Element>,
  pub sizes: Option<String>,
}

impl ImageOptions {
  pub fn new(image: ImageAsset) -> Self {
    Self {
      image,
      is_fluid: false,
      object_fit: ObjectFit::default(),
      max_width: DEFAULT_MAX_WIDTH,
      width: None,
      height: None,
      aspect_ratio: None,
      alt: String::new(),
      class_name: None,
      break_points: DEFAULT_BREAKPOINTS.to_vec(),
      loader: None,
      sizes: None,
    }
  }

  /// Selects fluid sizing: the box fills its parent's width.
  pub fn fluid(mut self) -> Self {
    self.is_fluid = true;
    self
  }

  pub fn with_object_fit(mut self, object_fit: ObjectFit) -> Self {
    self.object_fit = object_fit;
    self
  }

  pub fn with_max_width(mut self, max_width: u32) -> Self {
    self.max_width = max_width;
    self
  }

  pub fn with_width(mut self, width: u32) -> Self {
    self.width = Some(width);
    self
  }

  pub fn with_height(mut self, height: u32) -> Self {
    self.height = Some(height);
    self
  }

  /// Overrides the asset's intrinsic aspect ratio (width divided by
  /// height) for both height derivation and fluid space reservation.
  pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
    self.aspect_ratio = Some(aspect_ratio);
    self
  }

  pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
    self.alt = alt.into();
    self
  }

  pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
    self.class_name = Some(class_name.into());
    self
  }

  pub fn with_break_points(mut self, break_points: impl Into<Vec<u32>>) -> Self {
    self.break_points = break_points.into();
    self
  }

  /// Replaces the default lqip placeholder with caller-supplied content.
  pub fn with_loader(mut self, loader: Element) -> Self {
    self.loader = Some(loader);
    self
  }

  /// Forwards a `sizes` hint verbatim to every source and the final image.
  pub fn with_sizes(mut self, sizes: impl Into<String>) -> Self {
    self.sizes = Some(sizes.into());
    self
  }
}
