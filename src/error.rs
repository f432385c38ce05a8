//! Error types for respimg
//!
//! Two failure families exist and they are handled differently:
//! - Asset problems (unresolvable identity) suppress the render: callers get
//!   `Ok(None)` and the problem is reported through the `log` facade.
//! - Configuration problems (no sizing mode, unusable aspect ratio) are
//!   precondition violations that produce undefined layout, so they surface
//!   immediately as `Err`.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for respimg operations
///
/// # Examples
///
/// ```
/// use respimg::Result;
///
/// fn compose() -> Result<()> {
///   Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for respimg
///
/// Each variant wraps the more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Asset descriptor error
  #[error("Asset error: {0}")]
  Asset(#[from] AssetError),

  /// Render configuration error
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),
}

/// Errors raised by asset-descriptor validation
///
/// These never abort a render on their own; the dispatcher logs them and
/// suppresses the output instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
  /// The descriptor carries neither `_ref` nor `_id`, so no URL can ever be
  /// derived for it.
  #[error("asset has no resolvable identity (neither `_ref` nor `_id` is set)")]
  MissingIdentity,
}

/// Errors raised by the render configuration
///
/// These are caller bugs: the configured options cannot produce a defined
/// layout, so rendering the instance stops immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
  /// Raster assets need fluid sizing or at least one explicit dimension.
  #[error("no sizing configured: enable fluid sizing or supply an explicit width/height")]
  MissingSizing,

  /// A height or reservation had to be derived by division, but the
  /// effective aspect ratio is not a positive finite number.
  #[error("cannot derive {derived}: aspect ratio {value} is not a positive finite number")]
  InvalidAspectRatio {
    /// What was being derived ("height" or "aspect-ratio reservation").
    derived: &'static str,
    /// The offending ratio value (may be 0, negative, NaN or infinite).
    value: f32,
  },
}
