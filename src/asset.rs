//! Image-asset descriptors and asset-kind classification
//!
//! Descriptors arrive as JSON from a CMS/asset API. The wire shape keeps the
//! API's field names (`_ref`, `_id`, `mimeType`, `aspectRatio`); unknown
//! fields are ignored and absent optional fields take their documented
//! defaults, so partially-projected documents still deserialize.
//!
//! Classification happens exactly once at render entry: downstream code only
//! ever sees one of the well-defined [`AssetKind`] shapes and never branches
//! on format strings again.

use crate::error::AssetError;
use serde::{Deserialize, Serialize};

/// Pixel dimensions reported by the asset pipeline.
///
/// `aspect_ratio` is width divided by height; it is the ratio source for
/// height derivation and fluid-mode space reservation. A missing ratio
/// deserializes as `0.0`, which sizing resolution rejects if it is ever
/// needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDimensions {
  pub width: u32,
  pub height: u32,
  #[serde(rename = "aspectRatio")]
  pub aspect_ratio: f32,
}

/// Asset metadata subtree (`metadata` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMetadata {
  /// Tiny inline placeholder image (usually a base64 data URL); may be empty.
  pub lqip: String,
  pub dimensions: AssetDimensions,
}

/// Remote image-asset descriptor as delivered by the asset API.
///
/// An asset is addressable either through a reference to its canonical
/// document (`_ref`) or through an inline document id (`_id`); at least one
/// must be non-empty for the asset to be renderable.
///
/// # Examples
///
/// ```
/// use respimg::{AssetKind, ImageAsset};
///
/// let asset = ImageAsset::from_json(
///   r#"{
///     "_id": "image-abc123-1200x600-jpg",
///     "url": "https://cdn.example.com/raw/abc123.jpg",
///     "extension": "jpg",
///     "mimeType": "image/jpeg",
///     "metadata": { "dimensions": { "aspectRatio": 2.0 } }
///   }"#,
/// )
/// .unwrap();
///
/// assert_eq!(asset.kind(), AssetKind::Raster);
/// assert_eq!(asset.identity(), Some("image-abc123-1200x600-jpg"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAsset {
  /// Reference to the canonical asset document.
  #[serde(rename = "_ref", skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,

  /// Inline asset document id.
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,

  /// Direct URL of the stored original. Vector assets render this verbatim.
  pub url: String,

  /// Lowercase format token, e.g. "jpg", "png", "svg".
  pub extension: String,

  /// Declared MIME type; may be empty, in which case it is derived from
  /// `extension`.
  #[serde(rename = "mimeType")]
  pub mime_type: String,

  pub metadata: AssetMetadata,
}

/// Classification of an asset, resolved once at render entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// No resolvable identity; the render is logged and suppressed.
  Invalid,
  /// Vector source (`svg`); rendered as a single plain element that skips
  /// the responsive pipeline entirely.
  Vector,
  /// Everything else; the full responsive pipeline applies.
  Raster,
}

impl ImageAsset {
  /// Parses a raw JSON payload into an asset descriptor.
  pub fn from_json(payload: &str) -> serde_json::Result<Self> {
    serde_json::from_str(payload)
  }

  /// The identity handed to URL builders: `_ref` when present, else `_id`.
  ///
  /// Empty strings count as missing, matching the upstream API where an
  /// empty identity is as unresolvable as an absent one.
  pub fn identity(&self) -> Option<&str> {
    self
      .reference
      .as_deref()
      .filter(|value| !value.is_empty())
      .or_else(|| self.id.as_deref().filter(|value| !value.is_empty()))
  }

  /// Checks that the asset carries a resolvable identity.
  pub fn validate(&self) -> Result<(), AssetError> {
    if self.identity().is_none() {
      Err(AssetError::MissingIdentity)
    } else {
      Ok(())
    }
  }

  /// Classifies this asset for dispatch.
  pub fn kind(&self) -> AssetKind {
    if self.identity().is_none() {
      AssetKind::Invalid
    } else if self.extension == "svg" {
      AssetKind::Vector
    } else {
      AssetKind::Raster
    }
  }

  /// MIME type used for the native-format `<source type>` attribute.
  ///
  /// The declared `mimeType` wins (normalized, parameters stripped); an
  /// empty declaration falls back to a lookup from `extension`, and an
  /// unknown extension degrades to a generic `image/<extension>` guess.
  pub fn format_mime(&self) -> String {
    let declared = self.mime_type.split(';').next().unwrap_or("").trim();
    if !declared.is_empty() {
      return declared.to_ascii_lowercase();
    }

    if self.extension == "svg" {
      return "image/svg+xml".to_string();
    }

    match image::ImageFormat::from_extension(&self.extension) {
      Some(format) => format.to_mime_type().to_string(),
      None => format!("image/{}", self.extension),
    }
  }
}
