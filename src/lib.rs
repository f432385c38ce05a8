pub mod asset;
pub mod component;
pub mod element;
pub mod error;
pub mod options;
pub mod sizing;
pub mod srcset;
pub mod state;
pub mod url_builder;

pub use asset::{AssetDimensions, AssetKind, AssetMetadata, ImageAsset};
pub use component::{LazyImage, LoadSignal, SharedLazyImage, VisibilitySignal};
pub use element::{Element, Node};
pub use error::{AssetError, ConfigError, Error, Result};
pub use options::{ImageOptions, ObjectFit, DEFAULT_BREAKPOINTS, DEFAULT_MAX_WIDTH};
pub use sizing::{Dimension, ResolvedSizing, SizingInputs, SizingMode};
pub use srcset::{default_url, source_set, SourceSet, SourceSetEntry, MODERN_FORMAT};
pub use state::{RevealLatch, RevealState, VisibilityGate, VisibilityState};
pub use url_builder::{CdnImageUrlBuilder, ImageUrlBuilder};
