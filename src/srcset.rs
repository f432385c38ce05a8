//! Source-set computation
//!
//! A source set is the list of scaled-variant URLs offered to the browser
//! for one image format, serialized as a `srcset` attribute value with
//! width descriptors (`<url> <width>w`). Breakpoints wider than the
//! resolved width ceiling are skipped so the browser is never offered a
//! variant larger than the image can ever render.

use crate::asset::ImageAsset;
use crate::url_builder::ImageUrlBuilder;
use std::fmt;

/// Format token for the modern-format `<source>` offered ahead of the
/// asset's native format.
pub const MODERN_FORMAT: &str = "webp";

/// One srcset candidate: a URL and the intrinsic width it promises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSetEntry {
  pub url: String,
  pub width: u32,
}

impl fmt::Display for SourceSetEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}w", self.url, self.width)
  }
}

/// An ordered list of srcset candidates for a single format.
///
/// # Examples
///
/// ```
/// use respimg::{source_set, CdnImageUrlBuilder, ImageAsset};
///
/// let builder = CdnImageUrlBuilder::parse("https://cdn.example.com/images").unwrap();
/// let asset = ImageAsset {
///   id: Some("image-a-1600x900-jpg".to_string()),
///   ..Default::default()
/// };
///
/// let set = source_set(&builder, &asset, "webp", 700, &[1200, 800, 600, 400]);
/// assert_eq!(
///   set.to_string(),
///   "https://cdn.example.com/images/image-a-1600x900-jpg?w=600&fm=webp 600w, \
///    https://cdn.example.com/images/image-a-1600x900-jpg?w=400&fm=webp 400w"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
  entries: Vec<SourceSetEntry>,
}

impl SourceSet {
  pub fn entries(&self) -> &[SourceSetEntry] {
    &self.entries
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }
}

impl fmt::Display for SourceSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, entry) in self.entries.iter().enumerate() {
      if index > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{entry}")?;
    }
    Ok(())
  }
}

/// Computes the source set for `asset` in `format`.
///
/// Breakpoints are taken in the order given (conventionally descending) and
/// every breakpoint at or below `width_ceiling` yields one entry. The list
/// is not sorted or deduplicated; callers own that ordering.
pub fn source_set(
  builder: &dyn ImageUrlBuilder,
  asset: &ImageAsset,
  format: &str,
  width_ceiling: u32,
  breakpoints: &[u32],
) -> SourceSet {
  let entries = breakpoints
    .iter()
    .copied()
    .filter(|breakpoint| *breakpoint <= width_ceiling)
    .map(|width| SourceSetEntry {
      url: builder.build_url(asset, width, format),
      width,
    })
    .collect();
  SourceSet { entries }
}

/// The non-responsive fallback URL: the asset in its native format, scaled
/// to the width ceiling. Used for the `src` attribute of the final `<img>`.
pub fn default_url(builder: &dyn ImageUrlBuilder, asset: &ImageAsset, width_ceiling: u32) -> String {
  builder.build_url(asset, width_ceiling, &asset.extension)
}
