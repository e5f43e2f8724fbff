use bevy::prelude::*;

/* ===========================================================
   streaming helper components
   =========================================================== */
#[derive(Component)]
pub struct TileSprite {
    pub tile: IVec2,
}

#[derive(Component)]
pub struct BuildingSprite {
    pub tile: IVec2,
}
