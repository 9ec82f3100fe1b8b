use crate::runtime::state::RuntimeState;

/// One fixed step for every sprite: gravity feeds vertical velocity first,
/// then velocity moves the sprite. Velocities are in pixels per second.
pub fn integrate(state: &mut RuntimeState, ticks_per_second: u32) {
    let rate = f64::from(ticks_per_second.max(1));
    let gravity = state.physics.gravity;
    for sprite in &mut state.sprites {
        sprite.velocity.y += gravity / rate;
        sprite.position.x += sprite.velocity.x / rate;
        sprite.position.y += sprite.velocity.y / rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::state::{Sprite, Vec2};

    fn falling(velocity: Vec2) -> RuntimeState {
        let mut state = RuntimeState::new();
        state.upsert_sprite(Sprite {
            name: "box".into(),
            asset_path: String::new(),
            frames: Vec::new(),
            position: Vec2::ZERO,
            velocity,
        });
        state
    }

    #[test]
    fn gravity_applies_before_motion() {
        let mut state = falling(Vec2::ZERO);
        state.physics.gravity = 60.0;
        integrate(&mut state, 60);
        let s = &state.sprites[0];
        assert_eq!(s.velocity, Vec2::new(0.0, 1.0));
        assert_eq!(s.position, Vec2::new(0.0, 1.0 / 60.0));
    }

    #[test]
    fn no_gravity_is_linear() {
        let mut state = falling(Vec2::new(30.0, -60.0));
        for _ in 0..60 {
            integrate(&mut state, 60);
        }
        let p = state.sprites[0].position;
        assert!((p.x - 30.0).abs() < 1e-9);
        assert!((p.y + 60.0).abs() < 1e-9);
    }
}
