//! One-shot lifecycle state for a mounted image instance
//!
//! Two external signals drive an image through its lifetime: the viewport
//! intersection signal and the final image's load-completion signal. Both
//! are edge-triggered and may be delivered more than once (duplicate
//! events, re-entering the viewport), so each is modeled as a guarded
//! one-way transition: the first delivery flips the state, every later
//! delivery is a no-op. Neither state ever transitions back within an
//! instance's lifetime.
//!
//! The transition methods return whether the state changed, which is what
//! callers use to decide if a re-render is warranted.

/// Whether the element has ever intersected the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityState {
  #[default]
  NotVisible,
  Visible,
}

/// Whether the final image has confirmed load completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealState {
  /// Placeholder shown; final image not yet confirmed loaded.
  #[default]
  Hidden,
  /// Final image loaded; placeholder hidden.
  Shown,
}

/// One-shot gate for the viewport intersection signal.
///
/// Until the gate opens, no network-fetchable sources may be attached to
/// the render output; opening it is what permits the fetch.
///
/// # Examples
///
/// ```
/// use respimg::VisibilityGate;
///
/// let mut gate = VisibilityGate::new();
/// assert!(!gate.is_visible());
/// assert!(gate.mark_visible());
/// assert!(!gate.mark_visible()); // duplicate signal, no-op
/// assert!(gate.is_visible());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityGate {
  state: VisibilityState,
}

impl VisibilityGate {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> VisibilityState {
    self.state
  }

  pub fn is_visible(&self) -> bool {
    self.state == VisibilityState::Visible
  }

  /// Records the intersection signal. Returns whether the state changed.
  pub fn mark_visible(&mut self) -> bool {
    if self.state == VisibilityState::Visible {
      return false;
    }
    self.state = VisibilityState::Visible;
    true
  }
}

/// One-shot latch for the final image's load-completion signal.
///
/// A load that never completes simply leaves the latch at
/// [`RevealState::Hidden`]; the placeholder persists and nothing errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealLatch {
  state: RevealState,
}

impl RevealLatch {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> RevealState {
    self.state
  }

  pub fn is_shown(&self) -> bool {
    self.state == RevealState::Shown
  }

  /// Records load completion. Returns whether the state changed.
  pub fn mark_loaded(&mut self) -> bool {
    if self.state == RevealState::Shown {
      return false;
    }
    self.state = RevealState::Shown;
    true
  }
}
