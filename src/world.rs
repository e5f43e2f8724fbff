//! tiles, chunks & the sparse infinite world map
//!
//! Chunks are keyed by their `IVec2` chunk position directly (structured key,
//! no string round‑trip), created lazily on first access and never evicted.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use crate::buildings::Building;
use crate::constants::*;
use crate::coords::chunk_pos_of;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("local tile index {local} outside chunk bounds 0..{dims}")]
    TileOutOfBounds { local: IVec2, dims: i32 },
}

/* ===========================================================
   tile
   =========================================================== */
#[derive(Debug)]
pub struct Tile {
    /// integer world position, fixed at chunk construction
    pub pos: IVec2,
    /// quantised colour‑band tint multiplied onto the shared tile texture
    pub base_rgb: Vec3,
    pub building: Option<Building>,
}

/// bucket‑based colour banding (for a pixel‑arty look)
fn banded_tint(noise: &Perlin, pos: IVec2) -> Vec3 {
    let raw = noise.get([
        pos.x as f64 * COLOR_NOISE_SCALE,
        pos.y as f64 * COLOR_NOISE_SCALE,
    ]) as f32;

    let step = (((raw + 1.0) * 0.5) * COLOR_VARIATION_LEVELS as f32)
        .floor()
        .clamp(0.0, (COLOR_VARIATION_LEVELS - 1) as f32);
    let norm = step / (COLOR_VARIATION_LEVELS as f32 - 1.0) * 2.0 - 1.0;
    let factor = 1.0 + norm * COLOR_VARIATION_STRENGTH;

    (Vec3::ONE * factor).clamp(Vec3::ZERO, Vec3::ONE)
}

/* ===========================================================
   chunk
   =========================================================== */
pub struct Chunk {
    pub chunk_pos: IVec2,
    dims: i32,
    /// row‑major `dims × dims` grid, fully populated at construction
    tiles: Vec<Tile>,
}

impl Chunk {
    pub fn new(chunk_pos: IVec2, dims: i32, tint_noise: &Perlin) -> Self {
        let top_left = chunk_pos * dims;
        let mut tiles = Vec::with_capacity((dims * dims) as usize);
        for y in 0..dims {
            for x in 0..dims {
                let pos = top_left + IVec2::new(x, y);
                tiles.push(Tile {
                    pos,
                    base_rgb: banded_tint(tint_noise, pos),
                    building: None,
                });
            }
        }
        Self { chunk_pos, dims, tiles }
    }

    pub fn dims(&self) -> i32 {
        self.dims
    }

    /// world position of the chunk's (0, 0) tile
    pub fn top_left(&self) -> IVec2 {
        self.chunk_pos * self.dims
    }

    fn index_of(&self, local: IVec2) -> Result<usize, WorldError> {
        if local.x < 0 || local.y < 0 || local.x >= self.dims || local.y >= self.dims {
            return Err(WorldError::TileOutOfBounds {
                local,
                dims: self.dims,
            });
        }
        Ok((local.y * self.dims + local.x) as usize)
    }

    pub fn tile(&self, local: IVec2) -> Result<&Tile, WorldError> {
        Ok(&self.tiles[self.index_of(local)?])
    }

    pub fn tile_mut(&mut self, local: IVec2) -> Result<&mut Tile, WorldError> {
        let idx = self.index_of(local)?;
        Ok(&mut self.tiles[idx])
    }

    /// row‑major iteration; tiles never overlap so draw order is irrelevant
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

/* ===========================================================
   world resource
   =========================================================== */
#[derive(Resource)]
pub struct TileWorld {
    chunks: HashMap<IVec2, Chunk>,
    /// world‑space point currently centred on screen, in fractional tiles
    pub camera: Vec2,
    /// tiles whose contents changed since the last redraw pass
    pub changed_tiles: VecDeque<IVec2>,
    tint_noise: Perlin,
}

impl Default for TileWorld {
    fn default() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }
}

impl TileWorld {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            chunks: HashMap::new(),
            camera: Vec2::ZERO,
            changed_tiles: VecDeque::new(),
            tint_noise: Perlin::new(seed),
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// chunk containing `world_pos`, without creating it; never mutates the map
    pub fn chunk_at(&self, world_pos: Vec2) -> Option<&Chunk> {
        self.chunks.get(&chunk_pos_of(world_pos, CHUNK_DIMS))
    }

    /// chunk containing `world_pos`, created lazily on first access
    pub fn chunk_at_or_create(&mut self, world_pos: Vec2) -> &mut Chunk {
        self.create_chunk(chunk_pos_of(world_pos, CHUNK_DIMS))
    }

    /// idempotent: returns the existing chunk if one is already present
    /// (the naive overwrite would silently discard placed buildings)
    pub fn create_chunk(&mut self, chunk_pos: IVec2) -> &mut Chunk {
        let tint_noise = &self.tint_noise;
        self.chunks
            .entry(chunk_pos)
            .or_insert_with(|| {
                debug!("creating chunk {chunk_pos:?}");
                Chunk::new(chunk_pos, CHUNK_DIMS, tint_noise)
            })
    }

    /// tile at an integer world position, if its chunk has been realized
    pub fn tile_at(&self, tile: IVec2) -> Option<&Tile> {
        let chunk = self.chunks.get(&chunk_pos_of(tile.as_vec2(), CHUNK_DIMS))?;
        let local = tile - chunk.top_left();
        chunk.tile(local).ok()
    }

    /// attach a building to a tile, realizing its chunk if needed
    ///
    /// Returns `Ok(false)` without touching anything when the tile is already
    /// occupied; buildings are not reassignable.
    pub fn place_building(&mut self, tile: IVec2, building: Building) -> Result<bool, WorldError> {
        let chunk = self.chunk_at_or_create(tile.as_vec2());
        let local = tile - chunk.top_left();
        let slot = chunk.tile_mut(local)?;
        if slot.building.is_some() {
            return Ok(false);
        }
        slot.building = Some(building);
        self.changed_tiles.push_back(tile);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::{Building, BuildingRegistry};

    fn test_world() -> TileWorld {
        TileWorld::with_seed(1)
    }

    fn test_building(name: &str) -> Building {
        Building::new(name, &BuildingRegistry::default())
    }

    #[test]
    fn chunk_tiles_get_absolute_world_positions() {
        let chunk = Chunk::new(IVec2::new(2, 3), 4, &Perlin::new(1));
        assert_eq!(chunk.dims(), 4);
        assert_eq!(chunk.top_left(), IVec2::new(8, 12));
        assert_eq!(chunk.tile(IVec2::ZERO).unwrap().pos, IVec2::new(8, 12));
        assert_eq!(chunk.tile(IVec2::new(3, 3)).unwrap().pos, IVec2::new(11, 15));
        assert_eq!(chunk.tiles().count(), 16);
    }

    #[test]
    fn negative_chunk_tiles_get_negative_positions() {
        let chunk = Chunk::new(IVec2::new(-1, -1), 4, &Perlin::new(1));
        assert_eq!(chunk.tile(IVec2::ZERO).unwrap().pos, IVec2::new(-4, -4));
        assert_eq!(chunk.tile(IVec2::new(3, 3)).unwrap().pos, IVec2::new(-1, -1));
    }

    #[test]
    fn out_of_bounds_local_access_is_an_error() {
        let chunk = Chunk::new(IVec2::ZERO, 4, &Perlin::new(1));
        for local in [
            IVec2::new(4, 0),
            IVec2::new(0, 4),
            IVec2::new(-1, 0),
            IVec2::new(0, -1),
        ] {
            assert_eq!(
                chunk.tile(local).unwrap_err(),
                WorldError::TileOutOfBounds { local, dims: 4 }
            );
        }
    }

    #[test]
    fn chunk_at_never_creates() {
        let world = test_world();
        assert!(world.chunk_at(Vec2::new(5.0, 5.0)).is_none());
        assert!(world.chunk_at(Vec2::new(5.0, 5.0)).is_none());
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn chunk_at_or_create_realizes_exactly_once() {
        let mut world = test_world();
        let pos = Vec2::new(-0.5, -0.5);
        let chunk_pos = world.chunk_at_or_create(pos).chunk_pos;
        assert_eq!(chunk_pos, IVec2::new(-1, -1));
        // a second resolve for any position inside the same chunk reuses it
        world.chunk_at_or_create(Vec2::new(-15.9, -15.9));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn create_chunk_is_idempotent() {
        let mut world = test_world();
        world.create_chunk(IVec2::new(3, -2));
        world
            .place_building(IVec2::new(3 * CHUNK_DIMS, -2 * CHUNK_DIMS), test_building("house"))
            .unwrap();

        // re‑creating must keep the populated chunk, not replace it
        world.create_chunk(IVec2::new(3, -2));
        assert_eq!(world.chunk_count(), 1);
        let tile = world.tile_at(IVec2::new(3 * CHUNK_DIMS, -2 * CHUNK_DIMS)).unwrap();
        assert!(tile.building.is_some());
    }

    #[test]
    fn place_building_realizes_chunk_and_queues_redraw() {
        let mut world = test_world();
        let tile = IVec2::new(-7, 42);
        assert!(world.place_building(tile, test_building("well")).unwrap());
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.changed_tiles.pop_front(), Some(tile));
        assert_eq!(
            world.tile_at(tile).unwrap().building.as_ref().unwrap().name,
            "well"
        );
    }

    #[test]
    fn occupied_tile_keeps_its_first_building() {
        let mut world = test_world();
        let tile = IVec2::new(0, 0);
        assert!(world.place_building(tile, test_building("house")).unwrap());
        assert!(!world.place_building(tile, test_building("well")).unwrap());
        assert_eq!(
            world.tile_at(tile).unwrap().building.as_ref().unwrap().name,
            "house"
        );
        // only the successful placement queues a redraw
        assert_eq!(world.changed_tiles.len(), 1);
    }

    #[test]
    fn tile_at_unrealized_chunk_is_none() {
        let world = test_world();
        assert!(world.tile_at(IVec2::new(100, 100)).is_none());
    }
}
