/// Span of one tile along X and Z, in world units.
pub const TILE_SPAN: f32 = 1.5;

/// Tile thickness. Tiles are centred on y = 0.
pub const TILE_HEIGHT: f32 = 0.5;

/// Edge length of an obstacle cube.
pub const OBSTACLE_SIZE: f32 = TILE_SPAN;

/// Edge length of an agent cube.
pub const AGENT_SIZE: f32 = 0.8;

/// Resting height of an agent centre: half tile plus half agent.
pub const AGENT_REST_HEIGHT: f32 = TILE_HEIGHT * 0.5 + 0.4;

/// Inclusive board size bounds, in cells per side.
pub const MIN_BOARD_SIZE: u32 = 4;
pub const MAX_BOARD_SIZE: u32 = 20;
pub const DEFAULT_BOARD_SIZE: u32 = 8;

/// Relative path (under `assets/`) of the startup settings file.
pub const SETTINGS_ASSET_PATH: &str = "board.settings.json";
