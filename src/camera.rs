//! WASD camera panning & camera‑transform sync

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::constants::CAMERA_SPEED;
use crate::coords::camera_translation;
use crate::world::TileWorld;

/// unit‑less pan direction from the held keys (world space is y‑down,
/// so W moves toward negative y)
pub fn pan_direction(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        dir.x += 1.0;
    }
    dir
}

/// exact per‑frame displacement: `direction * CAMERA_SPEED * dt`
pub fn pan_delta(direction: Vec2, dt: f32) -> Vec2 {
    direction * CAMERA_SPEED * dt
}

pub fn camera_pan_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut world: ResMut<TileWorld>,
) {
    let delta = pan_delta(pan_direction(&keys), time.delta_secs());
    if delta != Vec2::ZERO {
        world.camera += delta;
    }
}

/// writes the world camera onto the Bevy camera entity
///
/// NOTE: runs in **PostUpdate**, after every system that pans the camera.
pub fn camera_sync_system(
    world: Res<TileWorld>,
    mut cam_q: Query<&mut Transform, With<Camera>>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };
    let translation = camera_translation(world.camera);
    cam_tf.translation.x = translation.x;
    cam_tf.translation.y = translation.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_delta_is_exactly_velocity_times_dt() {
        let dir = Vec2::new(1.0, -1.0);
        let delta = pan_delta(dir, 0.25);
        assert_eq!(delta, dir * CAMERA_SPEED * 0.25);
        assert_eq!(pan_delta(Vec2::ZERO, 0.25), Vec2::ZERO);
        assert_eq!(pan_delta(dir, 0.0), Vec2::ZERO);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::KeyD);
        keys.press(KeyCode::KeyW);
        assert_eq!(pan_direction(&keys), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn w_pans_up_in_world_space() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        // y‑down world: up on screen is negative y
        assert_eq!(pan_direction(&keys), Vec2::new(0.0, -1.0));
    }
}
