//! buildings: static decorative sprites attached to tiles
//!
//! Images come from an explicitly constructed registry resource rather than
//! ambient global state; a `Building` resolves its image once at construction
//! and is immutable afterward.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::Window;
use std::collections::HashMap;
use std::path::Path;

use crate::coords::tile_under;
use crate::world::TileWorld;

/// directory scanned at startup for building images (asset path is the same
/// without the `assets/` prefix)
const BUILDING_IMAGE_DIR: &str = "assets/textures/buildings";

#[derive(Clone, Debug)]
pub struct Building {
    pub name: String,
    /// resolved once from the registry; `None` when the name is unknown,
    /// in which case the building simply never draws
    pub image: Option<Handle<Image>>,
}

impl Building {
    pub fn new(name: &str, registry: &BuildingRegistry) -> Self {
        Self {
            name: name.to_owned(),
            image: registry.get(name),
        }
    }
}

/// name → image table, populated once at startup and passed by reference to
/// every `Building` constructor
#[derive(Resource, Default)]
pub struct BuildingRegistry {
    images: HashMap<String, Handle<Image>>,
}

impl BuildingRegistry {
    pub fn insert(&mut self, name: &str, image: Handle<Image>) {
        self.images.insert(name.to_owned(), image);
    }

    pub fn get(&self, name: &str) -> Option<Handle<Image>> {
        self.images.get(name).cloned()
    }

    /// deterministic pick for the placement hot‑key
    pub fn first_name(&self) -> Option<&str> {
        self.images.keys().map(String::as_str).min()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/* ===========================================================
   startup: enumerate the building image directory
   =========================================================== */
pub fn load_building_registry(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut registry = BuildingRegistry::default();

    match std::fs::read_dir(BUILDING_IMAGE_DIR) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map_or(true, |ext| ext != "png") {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let asset_path = Path::new("textures/buildings").join(format!("{name}.png"));
                registry.insert(name, asset_server.load(asset_path));
                info!("registered building image {name:?}");
            }
        }
        Err(err) => {
            warn!("no building images ({BUILDING_IMAGE_DIR}): {err}");
        }
    }

    commands.insert_resource(registry);
}

/* ===========================================================
   B key: place a building on the hovered tile
   =========================================================== */
pub fn place_building_system(
    keys: Res<ButtonInput<KeyCode>>,
    window_q: Query<&Window>,
    registry: Res<BuildingRegistry>,
    mut world: ResMut<TileWorld>,
) {
    if !keys.just_pressed(KeyCode::KeyB) {
        return;
    }
    let window = window_q.single();
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let center = Vec2::new(window.width(), window.height()) * 0.5;
    let tile = tile_under(cursor, world.camera, center);

    let name = registry.first_name().unwrap_or("house").to_owned();
    let building = Building::new(&name, &registry);

    match world.place_building(tile, building) {
        Ok(true) => info!("placed {name:?} at {tile:?}"),
        Ok(false) => info!("tile {tile:?} already has a building"),
        Err(err) => error!("placing {name:?} at {tile:?}: {err}"),
    }
}
