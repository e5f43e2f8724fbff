//! click‑drag tile selection & gizmo highlight
//!
//! Holding left mouse sweeps hovered tiles into a selection list; right click
//! clears it.  Selection is a visual highlight only, no further semantics.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::Window;

use crate::constants::TILE_SIZE;
use crate::coords::{tile_translation, tile_under};
use crate::world::TileWorld;

const HIGHLIGHT_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

#[derive(Resource, Default)]
pub struct Selection {
    dragging: bool,
    tiles: Vec<IVec2>,
}

impl Selection {
    /// insertion order kept, duplicates dropped (the list stays tiny)
    pub fn push(&mut self, tile: IVec2) {
        if !self.tiles.contains(&tile) {
            self.tiles.push(tile);
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn tiles(&self) -> &[IVec2] {
        &self.tiles
    }
}

pub fn selection_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window>,
    world: Res<TileWorld>,
    mut selection: ResMut<Selection>,
) {
    if mouse.just_pressed(MouseButton::Right) {
        selection.dragging = false;
        selection.clear();
        return;
    }
    if mouse.just_pressed(MouseButton::Left) {
        selection.dragging = true;
    }
    if mouse.just_released(MouseButton::Left) {
        selection.dragging = false;
    }
    if !selection.dragging {
        return;
    }

    let window = window_q.single();
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let center = Vec2::new(window.width(), window.height()) * 0.5;
    selection.push(tile_under(cursor, world.camera, center));
}

pub fn draw_selection_system(selection: Res<Selection>, mut gizmos: Gizmos) {
    for &tile in selection.tiles() {
        let center = tile_translation(tile, 0.0).truncate();
        gizmos.rect_2d(center, Vec2::splat(TILE_SIZE), HIGHLIGHT_COLOR);
    }
}
