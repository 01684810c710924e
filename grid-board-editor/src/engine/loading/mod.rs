//! Startup loading for the board settings asset.

/// Loads `board.settings.json` and seeds the editor with its configuration.
pub mod settings_loader;
