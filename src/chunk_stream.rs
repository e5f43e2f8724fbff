//! run‑time chunk streaming & tile‑sprite pooling
//!
//! Resolves the single chunk under the camera each frame (realizing it
//! lazily) and keeps exactly that chunk's tile sprites alive.  Sprites from
//! the previous chunk are hidden and pooled for reuse instead of despawned.
//!
//! Only the camera's chunk is ever drawn; tiles of neighbouring chunks pop in
//! at chunk boundaries.  Known limitation, kept on purpose.

use bevy::asset::LoadState;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

use crate::components::{BuildingSprite, TileSprite};
use crate::constants::*;
use crate::coords::{chunk_pos_of, tile_translation};
use crate::world::{Tile, TileWorld};

/* ===========================================================
   shared tile texture + procedural fallback
   =========================================================== */
#[derive(Resource)]
pub struct TileAssets {
    /// one handle shared by every tile sprite; tinting is per sprite
    pub texture: Handle<Image>,
    placeholder: Handle<Image>,
    resolved: bool,
}

/// white square with a green border, used when `tile.png` fails to load
pub fn placeholder_image() -> Image {
    let size = PLACEHOLDER_SIZE;
    let border = PLACEHOLDER_BORDER;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on_border =
                x < border || y < border || x >= size - border || y >= size - border;
            if on_border {
                data.extend_from_slice(&[0, 255, 0, 255]);
            } else {
                data.extend_from_slice(&[255, 255, 255, 255]);
            }
        }
    }
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

pub fn setup_tile_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
) {
    commands.insert_resource(TileAssets {
        texture: asset_server.load(TILE_TEXTURE_PATH),
        placeholder: images.add(placeholder_image()),
        resolved: false,
    });
}

/// polls the tile texture once per frame until it either loads or fails;
/// on failure every live sprite is retargeted at the placeholder
pub fn tile_texture_fallback_system(
    asset_server: Res<AssetServer>,
    mut assets: ResMut<TileAssets>,
    mut sprite_q: Query<&mut Sprite, With<TileSprite>>,
) {
    if assets.resolved {
        return;
    }
    match asset_server.get_load_state(assets.texture.id()) {
        Some(LoadState::Loaded) => assets.resolved = true,
        Some(LoadState::Failed(err)) => {
            warn!("tile texture {TILE_TEXTURE_PATH} failed ({err}), using placeholder");
            assets.texture = assets.placeholder.clone();
            for mut sprite in &mut sprite_q {
                sprite.image = assets.texture.clone();
            }
            assets.resolved = true;
        }
        _ => {}
    }
}

/* ===========================================================
   streaming state
   =========================================================== */
#[derive(Resource, Default)]
pub struct ChunkStream {
    current: Option<IVec2>,
    /// tile sprites of the current chunk, row‑major
    active: Vec<Entity>,
    /// building overlay sprites of the current chunk, by world tile
    building_sprites: HashMap<IVec2, Entity>,
    /// hidden sprites waiting for reuse
    free: Vec<Entity>,
}

fn tint_color(base_rgb: Vec3) -> Color {
    Color::srgb(
        base_rgb.x.clamp(0.0, 1.0),
        base_rgb.y.clamp(0.0, 1.0),
        base_rgb.z.clamp(0.0, 1.0),
    )
}

fn spawn_building_sprite(commands: &mut Commands, tile: &Tile) -> Option<Entity> {
    let building = tile.building.as_ref()?;
    let image = building.image.clone()?;
    let entity = commands
        .spawn((
            Sprite {
                image,
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(tile_translation(tile.pos, BUILDING_Z)),
            BuildingSprite { tile: tile.pos },
        ))
        .id();
    Some(entity)
}

/* ===========================================================
   stream_chunk_system – swap sprites when the camera's chunk changes
   =========================================================== */
pub fn stream_chunk_system(
    mut commands: Commands,
    mut world: ResMut<TileWorld>,
    mut stream: ResMut<ChunkStream>,
    assets: Res<TileAssets>,
) {
    let target = chunk_pos_of(world.camera, CHUNK_DIMS);
    if stream.current == Some(target) {
        return;
    }

    /* re‑pool the previous chunk ------------------------------------------ */
    let stream = &mut *stream;
    for entity in stream.active.drain(..) {
        commands.entity(entity).insert(Visibility::Hidden);
        stream.free.push(entity);
    }
    for (_, entity) in stream.building_sprites.drain() {
        commands.entity(entity).despawn();
    }

    /* realize & draw the chunk under the camera --------------------------- */
    let chunk = world.create_chunk(target);
    for tile in chunk.tiles() {
        let sprite = Sprite {
            image: assets.texture.clone(),
            color: tint_color(tile.base_rgb),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        };
        let transform = Transform::from_translation(tile_translation(tile.pos, TILE_Z));
        let tile_sprite = TileSprite { tile: tile.pos };

        let entity = if let Some(entity) = stream.free.pop() {
            commands
                .entity(entity)
                .insert((Visibility::Visible, sprite, transform, tile_sprite));
            entity
        } else {
            commands.spawn((sprite, transform, tile_sprite)).id()
        };
        stream.active.push(entity);

        if let Some(entity) = spawn_building_sprite(&mut commands, tile) {
            stream.building_sprites.insert(tile.pos, entity);
        }
    }

    stream.current = Some(target);
}

/* ===========================================================
   redraw_changed_tiles_system – building overlays for mutated tiles
   =========================================================== */
pub fn redraw_changed_tiles_system(
    mut commands: Commands,
    mut world: ResMut<TileWorld>,
    mut stream: ResMut<ChunkStream>,
) {
    if world.changed_tiles.is_empty() {
        return;
    }
    // drain the whole queue once per frame
    let changed: Vec<IVec2> = world.changed_tiles.drain(..).collect();
    let Some(current) = stream.current else {
        return;
    };

    for tile_pos in changed {
        if chunk_pos_of(tile_pos.as_vec2(), CHUNK_DIMS) != current {
            continue; // redrawn from scratch when its chunk scrolls in
        }
        if let Some(entity) = stream.building_sprites.remove(&tile_pos) {
            commands.entity(entity).despawn();
        }
        match world.tile_at(tile_pos) {
            Some(tile) => {
                if let Some(entity) = spawn_building_sprite(&mut commands, tile) {
                    stream.building_sprites.insert(tile_pos, entity);
                }
            }
            None => error!("changed tile {tile_pos:?} has no realized chunk"),
        }
    }
}

/* ===========================================================
   window title fps readout
   =========================================================== */
pub fn window_title_fps_system(
    diagnostics: Res<DiagnosticsStore>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
    else {
        return;
    };
    let Ok(mut window) = window_q.get_single_mut() else { return };
    window.title = format!("tile world | fps: {fps:.0}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_white_with_green_border() {
        let image = placeholder_image();
        assert_eq!(image.data.len(), (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4) as usize);

        let pixel = |x: u32, y: u32| {
            let idx = ((y * PLACEHOLDER_SIZE + x) * 4) as usize;
            &image.data[idx..idx + 4]
        };
        assert_eq!(pixel(0, 0), &[0, 255, 0, 255]);
        assert_eq!(pixel(PLACEHOLDER_SIZE - 1, PLACEHOLDER_SIZE - 1), &[0, 255, 0, 255]);
        let mid = PLACEHOLDER_SIZE / 2;
        assert_eq!(pixel(mid, mid), &[255, 255, 255, 255]);
    }

    #[test]
    fn tint_color_clamps() {
        let c = tint_color(Vec3::new(1.5, 0.5, -0.2)).to_srgba();
        assert_eq!(c.red, 1.0);
        assert_eq!(c.green, 0.5);
        assert_eq!(c.blue, 0.0);
    }
}
