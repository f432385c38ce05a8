//! Sizing resolution for raster renders
//!
//! Maps the caller's sizing options and the asset's intrinsic aspect ratio
//! onto one of two strategies:
//!
//! - **Fluid**: the box fills its parent's width; vertical space is
//!   reserved ahead of load as a percentage of the width (the aspect-ratio
//!   reservation), so the final image causes no layout shift.
//! - **Fixed**: explicit pixel dimensions; a missing height is derived from
//!   the width and the effective aspect ratio.
//!
//! The resolved sizing also fixes the width ceiling used when computing
//! source sets: a fixed box never needs variants wider than itself, while a
//! fluid box may grow up to the configured maximum width.

use crate::error::ConfigError;

/// The two sizing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
  Fluid,
  Fixed,
}

/// A resolved CSS dimension for the container box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
  /// Fill the parent (`100%`).
  Fill,
  /// Explicit pixel length.
  Px(f32),
}

impl Dimension {
  /// CSS value for a `width`/`height` style property.
  pub fn to_css(&self) -> String {
    match self {
      Dimension::Fill => "100%".to_string(),
      Dimension::Px(value) => format!("{value}px"),
    }
  }
}

/// Raw sizing inputs gathered from the render options and asset metadata.
///
/// `aspect_ratio` (explicit override) and `intrinsic_ratio` (from the
/// asset's `metadata.dimensions.aspectRatio`) are both width divided by
/// height; the override wins when present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizingInputs {
  pub is_fluid: bool,
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub aspect_ratio: Option<f32>,
  pub intrinsic_ratio: f32,
  pub max_width: u32,
}

impl SizingInputs {
  /// The ratio used for derivations, validated at the point of use.
  ///
  /// `derived` names what the caller is about to compute with the ratio;
  /// it is carried into the error so misconfiguration reports say which
  /// derivation failed.
  fn effective_ratio(&self, derived: &'static str) -> Result<f32, ConfigError> {
    let ratio = self.aspect_ratio.unwrap_or(self.intrinsic_ratio);
    if ratio.is_finite() && ratio > 0.0 {
      Ok(ratio)
    } else {
      Err(ConfigError::InvalidAspectRatio { derived, value: ratio })
    }
  }
}

/// The output of sizing resolution, consumed by the composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSizing {
  pub mode: SizingMode,
  pub width: Dimension,
  pub height: Dimension,
  /// Vertical space to reserve, as a percentage of the box width. Present
  /// only in fluid mode.
  pub reservation_percent: Option<f32>,
  /// Largest variant width worth offering in a source set.
  pub width_ceiling: u32,
}

/// Resolves the sizing strategy, dimensions and width ceiling.
///
/// Fails with [`ConfigError::MissingSizing`] when neither fluid sizing nor
/// any explicit dimension was supplied, and with
/// [`ConfigError::InvalidAspectRatio`] when a needed ratio is zero,
/// negative or non-finite. Ratio validity is only enforced where a
/// derivation actually divides by it.
///
/// # Examples
///
/// ```
/// use respimg::sizing::{resolve, Dimension, SizingInputs};
///
/// let resolved = resolve(SizingInputs {
///   width: Some(400),
///   intrinsic_ratio: 2.0,
///   max_width: 1780,
///   ..Default::default()
/// })
/// .unwrap();
///
/// assert_eq!(resolved.height, Dimension::Px(200.0));
/// assert_eq!(resolved.width_ceiling, 400);
/// ```
pub fn resolve(inputs: SizingInputs) -> Result<ResolvedSizing, ConfigError> {
  if inputs.is_fluid {
    let ratio = inputs.effective_ratio("aspect-ratio reservation")?;
    let height = match inputs.height {
      Some(height) => Dimension::Px(height as f32),
      None => Dimension::Fill,
    };
    return Ok(ResolvedSizing {
      mode: SizingMode::Fluid,
      width: Dimension::Fill,
      height,
      reservation_percent: Some(100.0 / ratio),
      width_ceiling: inputs.max_width,
    });
  }

  if inputs.width.is_none() && inputs.height.is_none() {
    return Err(ConfigError::MissingSizing);
  }

  let rendered_width = inputs.width.unwrap_or(inputs.max_width);
  let height = match inputs.height {
    Some(height) => height as f32,
    None => rendered_width as f32 / inputs.effective_ratio("height")?,
  };
  Ok(ResolvedSizing {
    mode: SizingMode::Fixed,
    width: Dimension::Px(rendered_width as f32),
    height: Dimension::Px(height),
    reservation_percent: None,
    width_ceiling: rendered_width,
  })
}
