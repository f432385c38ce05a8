//! The lazily-revealed image component
//!
//! [`LazyImage`] owns one image instance: its configuration, its URL
//! builder and the two pieces of state that persist across re-renders (the
//! visibility gate and the reveal latch). [`LazyImage::render`] is a pure
//! function of that state; callers re-render after a signal reports a
//! state change.
//!
//! Rendering dispatches on the asset kind resolved at entry:
//!
//! - invalid assets log an error and produce no output,
//! - vector assets produce a single plain `<img>` pointing at the stored
//!   original,
//! - raster assets produce the full responsive structure: a sized
//!   container, an aspect-ratio spacer in fluid mode, a placeholder layer,
//!   and (once visible) a `<picture>` carrying the format-negotiated
//!   source sets and the final image.
//!
//! The two external signals are delivered either directly through
//! [`LazyImage::signal_visible`] / [`LazyImage::signal_loaded`], or through
//! the [`VisibilitySignal`] / [`LoadSignal`] handles, which hold weak
//! references so a signal arriving after the instance was dropped is a
//! no-op instead of an error.

use crate::asset::AssetKind;
use crate::element::Element;
use crate::error::{AssetError, Result};
use crate::options::ImageOptions;
use crate::sizing::{self, ResolvedSizing, SizingInputs};
use crate::srcset::{default_url, source_set, MODERN_FORMAT};
use crate::state::{RevealLatch, VisibilityGate};
use crate::url_builder::ImageUrlBuilder;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared handle to a mounted image instance, as held by the embedding
/// environment and by signal handles.
pub type SharedLazyImage = Rc<RefCell<LazyImage>>;

/// A responsive, lazily-revealed image instance.
///
/// # Examples
///
/// ```
/// use respimg::{CdnImageUrlBuilder, ImageAsset, ImageOptions, LazyImage};
///
/// let asset = ImageAsset::from_json(
///   r#"{
///     "_id": "image-abc123-1200x600-jpg",
///     "extension": "jpg",
///     "mimeType": "image/jpeg",
///     "metadata": { "dimensions": { "aspectRatio": 2.0 } }
///   }"#,
/// )
/// .unwrap();
/// let builder = CdnImageUrlBuilder::parse("https://cdn.example.com/images").unwrap();
/// let mut image = LazyImage::new(ImageOptions::new(asset).with_width(700), builder);
///
/// // Off-screen: the placeholder renders but no fetchable sources do.
/// let tree = image.render().unwrap().expect("raster output");
/// assert!(tree.find("picture").is_none());
///
/// // First intersection attaches sources capped at the 700px ceiling.
/// assert!(image.signal_visible());
/// let tree = image.render().unwrap().expect("raster output");
/// let img = tree.find("picture").unwrap().find("img").unwrap();
/// assert_eq!(
///   img.attr("srcset"),
///   Some(
///     "https://cdn.example.com/images/image-abc123-1200x600-jpg?w=600&fm=jpg 600w, \
///      https://cdn.example.com/images/image-abc123-1200x600-jpg?w=400&fm=jpg 400w"
///   )
/// );
/// ```
pub struct LazyImage {
  options: ImageOptions,
  url_builder: Box<dyn ImageUrlBuilder>,
  visibility: VisibilityGate,
  reveal: RevealLatch,
}

impl fmt::Debug for LazyImage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LazyImage")
      .field("options", &self.options)
      .field("visibility", &self.visibility)
      .field("reveal", &self.reveal)
      .finish_non_exhaustive()
  }
}

impl LazyImage {
  pub fn new(options: ImageOptions, url_builder: impl ImageUrlBuilder + 'static) -> Self {
    Self {
      options,
      url_builder: Box::new(url_builder),
      visibility: VisibilityGate::new(),
      reveal: RevealLatch::new(),
    }
  }

  pub fn options(&self) -> &ImageOptions {
    &self.options
  }

  pub fn visibility(&self) -> VisibilityGate {
    self.visibility
  }

  pub fn reveal(&self) -> RevealLatch {
    self.reveal
  }

  /// Wraps the instance for shared ownership so signal handles can be
  /// bound to it.
  pub fn into_shared(self) -> SharedLazyImage {
    Rc::new(RefCell::new(self))
  }

  /// Delivers the viewport intersection signal. Returns whether the state
  /// changed (a re-render is warranted only when it did).
  pub fn signal_visible(&mut self) -> bool {
    let changed = self.visibility.mark_visible();
    if changed {
      log::debug!(
        "image entered viewport, attaching sources (identity={:?})",
        self.options.image.identity()
      );
    }
    changed
  }

  /// Delivers the final image's load-completion signal. Returns whether
  /// the state changed.
  pub fn signal_loaded(&mut self) -> bool {
    let changed = self.reveal.mark_loaded();
    if changed {
      log::debug!(
        "final image loaded, revealing (identity={:?})",
        self.options.image.identity()
      );
    }
    changed
  }

  /// Renders the element tree for the current state.
  ///
  /// Returns `Ok(None)` for invalid assets (logged, not fatal) and an
  /// error for sizing misconfiguration on raster assets. Identical state
  /// always renders an identical tree.
  pub fn render(&self) -> Result<Option<Element>> {
    match self.options.image.kind() {
      AssetKind::Invalid => {
        log::error!(
          "suppressing image render: {} (url={:?})",
          AssetError::MissingIdentity,
          self.options.image.url
        );
        Ok(None)
      }
      AssetKind::Vector => Ok(Some(self.render_vector())),
      AssetKind::Raster => Ok(Some(self.render_raster()?)),
    }
  }

  /// Vector assets bypass the responsive pipeline entirely: one plain
  /// `<img>` pointing at the stored original.
  fn render_vector(&self) -> Element {
    let mut img = Element::new("img")
      .with_attr("src", &self.options.image.url)
      .with_attr("alt", &self.options.alt);
    if let Some(class_name) = &self.options.class_name {
      img.set_attr("class", class_name);
    }
    img
  }

  fn render_raster(&self) -> Result<Element> {
    let options = &self.options;
    let resolved = sizing::resolve(SizingInputs {
      is_fluid: options.is_fluid,
      width: options.width,
      height: options.height,
      aspect_ratio: options.aspect_ratio,
      intrinsic_ratio: options.image.metadata.dimensions.aspect_ratio,
      max_width: options.max_width,
    })?;

    let mut container = Element::new("div");
    if let Some(class_name) = &options.class_name {
      container.set_attr("class", class_name);
    }
    container.set_style("position", "relative");
    container.set_style("overflow", "hidden");
    container.set_style("width", resolved.width.to_css());
    container.set_style("height", resolved.height.to_css());

    if let Some(percent) = resolved.reservation_percent {
      container.push_child(Element::new("div").with_style("padding-top", format!("{percent}%")));
    }

    container.push_child(self.render_placeholder());

    if self.visibility.is_visible() {
      container.push_child(self.render_picture(&resolved));
    }

    Ok(container)
  }

  /// The placeholder layer: caller-supplied loader content, or the tiny
  /// inline lqip image. Hidden (not removed) once the final image shows.
  fn render_placeholder(&self) -> Element {
    let mut layer = match &self.options.loader {
      Some(loader) => cover_layer(Element::new("div")).with_child(loader.clone()),
      None => cover_layer(Element::new("img"))
        .with_attr("src", &self.options.image.metadata.lqip)
        .with_attr("alt", "")
        .with_style("object-fit", self.options.object_fit.as_css()),
    };
    if self.reveal.is_shown() {
      layer.set_style("display", "none");
    }
    layer
  }

  /// The format-negotiated sources and final image, attached only once the
  /// element has been visible.
  fn render_picture(&self, resolved: &ResolvedSizing) -> Element {
    let options = &self.options;
    let asset = &options.image;
    let builder = self.url_builder.as_ref();

    let modern_set = source_set(
      builder,
      asset,
      MODERN_FORMAT,
      resolved.width_ceiling,
      &options.break_points,
    );
    let native_set = source_set(
      builder,
      asset,
      &asset.extension,
      resolved.width_ceiling,
      &options.break_points,
    );

    let mut modern_source = Element::new("source")
      .with_attr("srcset", modern_set.to_string())
      .with_attr("type", image::ImageFormat::WebP.to_mime_type());
    let mut native_source = Element::new("source")
      .with_attr("srcset", native_set.to_string())
      .with_attr("type", asset.format_mime());

    let mut img = cover_layer(Element::new("img"))
      .with_attr("src", default_url(builder, asset, resolved.width_ceiling))
      .with_attr("srcset", native_set.to_string())
      .with_attr("alt", &options.alt)
      .with_style("object-fit", options.object_fit.as_css())
      .with_style("opacity", if self.reveal.is_shown() { "1" } else { "0" });

    if let Some(sizes) = &options.sizes {
      modern_source.set_attr("sizes", sizes);
      native_source.set_attr("sizes", sizes);
      img.set_attr("sizes", sizes);
    }

    Element::new("picture")
      .with_child(modern_source)
      .with_child(native_source)
      .with_child(img)
  }
}

/// Positions an element as a layer covering its container.
fn cover_layer(element: Element) -> Element {
  element
    .with_style("position", "absolute")
    .with_style("top", "0")
    .with_style("left", "0")
    .with_style("width", "100%")
    .with_style("height", "100%")
}

/// Handle through which the viewport detector reports first intersection.
///
/// Holds only a weak reference; firing after the instance was dropped is a
/// safe no-op.
///
/// # Examples
///
/// ```
/// use respimg::{ImageAsset, ImageOptions, LazyImage, VisibilitySignal};
/// use respimg::CdnImageUrlBuilder;
///
/// let builder = CdnImageUrlBuilder::parse("https://cdn.example.com/images").unwrap();
/// let image = LazyImage::new(ImageOptions::new(ImageAsset::default()), builder).into_shared();
/// let signal = VisibilitySignal::bind(&image);
///
/// assert!(signal.fire());
/// assert!(!signal.fire()); // duplicate, no-op
///
/// drop(image);
/// assert!(!signal.fire()); // instance gone, still safe
/// ```
#[derive(Debug, Clone)]
pub struct VisibilitySignal {
  target: Weak<RefCell<LazyImage>>,
}

impl VisibilitySignal {
  pub fn bind(target: &SharedLazyImage) -> Self {
    Self {
      target: Rc::downgrade(target),
    }
  }

  /// Fires the signal. Returns `true` only when it transitioned the
  /// instance; duplicates and post-drop deliveries return `false`.
  pub fn fire(&self) -> bool {
    let Some(target) = self.target.upgrade() else {
      return false;
    };
    let changed = target.borrow_mut().signal_visible();
    changed
  }
}

/// Handle through which the load observer reports final-image completion.
#[derive(Debug, Clone)]
pub struct LoadSignal {
  target: Weak<RefCell<LazyImage>>,
}

impl LoadSignal {
  pub fn bind(target: &SharedLazyImage) -> Self {
    Self {
      target: Rc::downgrade(target),
    }
  }

  /// Fires the signal. Same contract as [`VisibilitySignal::fire`].
  pub fn fire(&self) -> bool {
    let Some(target) = self.target.upgrade() else {
      return false;
    };
    let changed = target.borrow_mut().signal_loaded();
    changed
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asset::{AssetDimensions, AssetMetadata, ImageAsset};
  use crate::url_builder::CdnImageUrlBuilder;

  fn builder() -> CdnImageUrlBuilder {
    CdnImageUrlBuilder::parse("https://cdn.example.com/images").unwrap()
  }

  fn raster_asset() -> ImageAsset {
    ImageAsset {
      reference: Some("image-abc-1600x800-jpg".to_string()),
      id: None,
      url: "https://cdn.example.com/raw/abc.jpg".to_string(),
      extension: "jpg".to_string(),
      mime_type: "image/jpeg".to_string(),
      metadata: AssetMetadata {
        lqip: "data:image/jpeg;base64,SHORT".to_string(),
        dimensions: AssetDimensions {
          width: 1600,
          height: 800,
          aspect_ratio: 2.0,
        },
      },
    }
  }

  #[test]
  fn invalid_asset_renders_nothing() {
    let image = LazyImage::new(ImageOptions::new(ImageAsset::default()), builder());
    assert_eq!(image.render().unwrap(), None);
  }

  #[test]
  fn vector_asset_renders_single_plain_img() {
    let asset = ImageAsset {
      id: Some("image-logo-svg".to_string()),
      url: "https://cdn.example.com/raw/logo.svg".to_string(),
      extension: "svg".to_string(),
      ..Default::default()
    };
    let options = ImageOptions::new(asset)
      .with_alt("Company logo")
      .with_class_name("logo");
    let image = LazyImage::new(options, builder());

    let element = image.render().unwrap().expect("vector output");
    assert_eq!(element.tag(), "img");
    assert_eq!(element.attr("src"), Some("https://cdn.example.com/raw/logo.svg"));
    assert_eq!(element.attr("alt"), Some("Company logo"));
    assert_eq!(element.attr("class"), Some("logo"));
    assert!(element.children().is_empty());
  }

  #[test]
  fn missing_sizing_surfaces_config_error() {
    let image = LazyImage::new(ImageOptions::new(raster_asset()), builder());
    assert!(image.render().is_err());
  }

  #[test]
  fn picture_appears_only_after_visibility() {
    let options = ImageOptions::new(raster_asset()).with_width(700);
    let mut image = LazyImage::new(options, builder());

    let before = image.render().unwrap().expect("raster output");
    assert!(before.find("picture").is_none());
    assert!(before.find("img").is_some()); // placeholder only

    assert!(image.signal_visible());
    let after = image.render().unwrap().expect("raster output");
    assert!(after.find("picture").is_some());
  }

  #[test]
  fn reveal_flips_placeholder_and_final_image_styles() {
    let options = ImageOptions::new(raster_asset()).with_width(700);
    let mut image = LazyImage::new(options, builder());
    image.signal_visible();

    let hidden = image.render().unwrap().expect("raster output");
    let final_img = hidden.find("picture").unwrap().find("img").unwrap();
    assert_eq!(final_img.style_value("opacity"), Some("0"));

    image.signal_loaded();
    let shown = image.render().unwrap().expect("raster output");
    let placeholder = shown.child_elements().next().unwrap();
    assert_eq!(placeholder.style_value("display"), Some("none"));
    let final_img = shown.find("picture").unwrap().find("img").unwrap();
    assert_eq!(final_img.style_value("opacity"), Some("1"));
  }

  #[test]
  fn custom_loader_replaces_lqip_placeholder() {
    let loader = Element::new("span").with_text("loading…");
    let options = ImageOptions::new(raster_asset())
      .with_width(700)
      .with_loader(loader);
    let image = LazyImage::new(options, builder());

    let tree = image.render().unwrap().expect("raster output");
    let layer = tree.child_elements().next().unwrap();
    assert_eq!(layer.tag(), "div");
    assert_eq!(layer.style_value("position"), Some("absolute"));
    assert!(layer.find("span").is_some());
  }

  #[test]
  fn signals_are_safe_after_drop() {
    let options = ImageOptions::new(raster_asset()).with_width(700);
    let shared = LazyImage::new(options, builder()).into_shared();
    let visible = VisibilitySignal::bind(&shared);
    let loaded = LoadSignal::bind(&shared);

    assert!(visible.fire());
    assert!(!visible.fire());
    assert!(loaded.fire());
    assert!(!loaded.fire());

    drop(shared);
    assert!(!visible.fire());
    assert!(!loaded.fire());
  }

  #[test]
  fn debug_output_skips_url_builder() {
    let image = LazyImage::new(ImageOptions::new(raster_asset()), builder());
    let debug = format!("{image:?}");
    assert!(debug.contains("LazyImage"));
    assert!(debug.contains("visibility"));
    assert!(!debug.contains("url_builder"));
  }
}
