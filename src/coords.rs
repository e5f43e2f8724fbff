//! pure coordinate transforms between screen, world, chunk & tile space
//!
//! World space is y‑down (screen‑derived, fractional tile units); Bevy render
//! space is y‑up.  `tile_translation` / `camera_translation` perform the flip,
//! everything else stays in world space.

use bevy::prelude::*;

use crate::constants::TILE_SIZE;

/// chunk containing a world position
///
/// Component‑wise mathematical floor division: rounds toward −∞ so negative
/// world coordinates land in the correct (negative) chunk.
pub fn chunk_pos_of(world: Vec2, chunk_dims: i32) -> IVec2 {
    IVec2::new(
        (world.x / chunk_dims as f32).floor() as i32,
        (world.y / chunk_dims as f32).floor() as i32,
    )
}

/// integer tile containing a world position
pub fn tile_pos_of(world: Vec2) -> IVec2 {
    IVec2::new(world.x.floor() as i32, world.y.floor() as i32)
}

/// world → screen: `(world - camera) * tile_size + screen_center`
pub fn world_to_screen(world: Vec2, camera: Vec2, tile_size: f32, screen_center: Vec2) -> Vec2 {
    (world - camera) * tile_size + screen_center
}

/// screen → world: exact inverse of [`world_to_screen`]
pub fn screen_to_world(screen: Vec2, camera: Vec2, tile_size: f32, screen_center: Vec2) -> Vec2 {
    (screen - screen_center) / tile_size + camera
}

/// tile hovered by a cursor at `screen` (cursor coords are top‑left origin,
/// matching world space's y‑down convention)
pub fn tile_under(screen: Vec2, camera: Vec2, screen_center: Vec2) -> IVec2 {
    tile_pos_of(screen_to_world(screen, camera, TILE_SIZE, screen_center))
}

/// centre of a tile's sprite in Bevy render space (y flipped)
pub fn tile_translation(tile: IVec2, z: f32) -> Vec3 {
    Vec3::new(
        (tile.x as f32 + 0.5) * TILE_SIZE,
        -(tile.y as f32 + 0.5) * TILE_SIZE,
        z,
    )
}

/// camera world position in Bevy render space (y flipped)
pub fn camera_translation(camera: Vec2) -> Vec2 {
    Vec2::new(camera.x * TILE_SIZE, -camera.y * TILE_SIZE)
}
