//! Image URL construction
//!
//! Source-set generation asks an [`ImageUrlBuilder`] for one URL per
//! (asset, width, format) triple. The trait is the seam between the
//! responsive pipeline and whatever serves the derived images; the bundled
//! [`CdnImageUrlBuilder`] targets CDNs that accept `w` and `fm` query
//! parameters, and callers with a different delivery scheme implement the
//! trait themselves.

use crate::asset::ImageAsset;
use url::Url;

/// Builds the delivery URL for an asset scaled to `width` pixels and
/// transcoded to `format`.
///
/// `format` is a lowercase format token ("webp", "jpg", ...), not a MIME
/// type. Implementations must return a stable URL for the same inputs since
/// the output is embedded verbatim in markup.
pub trait ImageUrlBuilder {
  fn build_url(&self, asset: &ImageAsset, width: u32, format: &str) -> String;
}

/// URL builder for query-parameter image CDNs.
///
/// Appends the asset identity as a path segment under a fixed endpoint and
/// requests the variant via `w=<width>&fm=<format>`, plus an optional
/// `q=<quality>`.
///
/// # Examples
///
/// ```
/// use respimg::{CdnImageUrlBuilder, ImageAsset, ImageUrlBuilder};
///
/// let builder = CdnImageUrlBuilder::parse("https://cdn.example.com/images").unwrap();
/// let asset = ImageAsset {
///   id: Some("image-abc123-800x600-jpg".to_string()),
///   ..Default::default()
/// };
///
/// assert_eq!(
///   builder.build_url(&asset, 600, "webp"),
///   "https://cdn.example.com/images/image-abc123-800x600-jpg?w=600&fm=webp"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CdnImageUrlBuilder {
  endpoint: Url,
  quality: Option<u8>,
}

impl CdnImageUrlBuilder {
  pub fn new(endpoint: Url) -> Self {
    Self {
      endpoint,
      quality: None,
    }
  }

  /// Parses `endpoint` and builds from it.
  pub fn parse(endpoint: &str) -> Result<Self, url::ParseError> {
    Ok(Self::new(Url::parse(endpoint)?))
  }

  /// Requests a fixed quality (`q=<quality>`) on every built URL.
  pub fn with_quality(mut self, quality: u8) -> Self {
    self.quality = Some(quality);
    self
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}

impl ImageUrlBuilder for CdnImageUrlBuilder {
  fn build_url(&self, asset: &ImageAsset, width: u32, format: &str) -> String {
    let mut url = self.endpoint.clone();
    let identity = asset.identity().unwrap_or_default();
    // Cannot-be-a-base endpoints (e.g. data:) have no segments; the identity
    // is dropped rather than panicking.
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().push(identity);
    }
    {
      let mut query = url.query_pairs_mut();
      query.append_pair("w", &width.to_string());
      query.append_pair("fm", format);
      if let Some(quality) = self.quality {
        query.append_pair("q", &quality.to_string());
      }
    }
    url.to_string()
  }
}
