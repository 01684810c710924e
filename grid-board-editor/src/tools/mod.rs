//! Editor interaction: the pending-mutation state machine and everything that
//! feeds gestures into it.

/// Native side panels and confirmation dialog.
pub mod board_panel;

/// Pointer picking and drag forwarding for the 3D view.
pub mod gestures;

/// `BoardEditor`, the single owner of board state and pending mutations.
pub mod interaction;

/// Ray intersection helpers for agent/obstacle boxes and the tile plane.
pub mod ray;

/// Rectangular drag tracking and add/remove range classification.
pub mod selection;

/// Keyboard shortcuts (native only).
pub mod shortcuts;
