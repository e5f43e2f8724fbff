/// -------- tiles & chunks --------
pub const TILE_SIZE: f32 = 32.0;
pub const CHUNK_DIMS: i32 = 16;

/// -------- camera --------
/// pan speed, tiles per second
pub const CAMERA_SPEED: f32 = 8.0;

/// -------- z layers --------
pub const TILE_Z: f32 = 0.0;
pub const BUILDING_Z: f32 = 1.0;

/// -------- tile texture & fallback --------
pub const TILE_TEXTURE_PATH: &str = "textures/tile.png";
pub const PLACEHOLDER_SIZE: u32 = 32;
pub const PLACEHOLDER_BORDER: u32 = 5;

/// -------- colour‑variation --------
pub const COLOR_NOISE_SCALE: f64 = 0.05;
pub const COLOR_VARIATION_LEVELS: i32 = 4;
pub const COLOR_VARIATION_STRENGTH: f32 = 0.2;
