//! minimal chunked tile‑world prototype
//!
//! Infinite grid of tiles streamed one chunk at a time, WASD camera panning,
//! click‑drag tile selection and B‑key building placement.
//! Works with **Bevy 0.15**.

mod buildings;
mod camera;
mod chunk_stream;
mod components;
mod constants;
mod coords;
mod selection;
mod world;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowMode;

use buildings::{load_building_registry, place_building_system};
use camera::{camera_pan_system, camera_sync_system};
use chunk_stream::{
    redraw_changed_tiles_system, setup_tile_assets, stream_chunk_system,
    tile_texture_fallback_system, window_title_fps_system, ChunkStream,
};
use selection::{draw_selection_system, selection_input_system, Selection};
use world::TileWorld;

/* ------------------------------------------------------------------------ */
/* camera                                                                   */
/* ------------------------------------------------------------------------ */
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins(FrameTimeDiagnosticsPlugin::default())

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::WHITE))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "tile world".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))

        /* world state ------------------------------------------------------ */
        .init_resource::<TileWorld>()
        .init_resource::<ChunkStream>()
        .init_resource::<Selection>()

        /* startup systems ------------------------------------------------- */
        .add_systems(Startup, (setup_camera, setup_tile_assets, load_building_registry))

        /* frame‑update systems --------------------------------------------- */
        .add_systems(
            Update,
            (
                /* input --------------------------------------------------- */
                camera_pan_system,        // WASD panning
                selection_input_system,   // click‑drag highlight
                place_building_system,    // B at the hovered tile

                /* world --------------------------------------------------- */
                stream_chunk_system,         // chunk swap + sprite pool
                redraw_changed_tiles_system, // building overlays
                tile_texture_fallback_system,

                /* misc ---------------------------------------------------- */
                draw_selection_system,
                window_title_fps_system,
            ),
        )

        /* post‑update (camera) ---------------------------------------------- */
        .add_systems(PostUpdate, camera_sync_system)
        .run();
}
