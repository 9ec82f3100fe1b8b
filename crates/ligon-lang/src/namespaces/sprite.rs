use crate::error::RuntimeError;
use crate::runtime::state::{Sprite, Vec2};
use crate::Value;
use super::{NamespaceProvider, RuntimeState, as_float, check_min_args};

pub struct SpriteNamespace;

impl NamespaceProvider for SpriteNamespace {
    fn name(&self) -> &'static str { "ligon.sprite" }

    fn exports(&self) -> &'static [&'static str] {
        &["ligon.sprite.create", "ligon.sprite.set_velocity", "ligon.sprite.animate"]
    }

    /// Operations on a sprite that does not exist yet are ignored.
    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        match target {
            // ligon.sprite.create(name, path, x, y)
            "ligon.sprite.create" => {
                check_min_args(target, args, 4, line)?;
                let position = Vec2::new(as_float(target, &args[2], line)?, as_float(target, &args[3], line)?);
                state.upsert_sprite(Sprite {
                    name: args[0].to_string(),
                    asset_path: args[1].to_string(),
                    frames: Vec::new(),
                    position,
                    velocity: Vec2::ZERO,
                });
            }
            // ligon.sprite.set_velocity(name, vx, vy)
            "ligon.sprite.set_velocity" => {
                check_min_args(target, args, 3, line)?;
                let velocity = Vec2::new(as_float(target, &args[1], line)?, as_float(target, &args[2], line)?);
                if let Some(sprite) = state.sprite_mut(&args[0].to_string()) {
                    sprite.velocity = velocity;
                }
            }
            // ligon.sprite.animate(name, frame, frame, ...)
            "ligon.sprite.animate" => {
                check_min_args(target, args, 2, line)?;
                let frames = args[1..].iter().map(Value::to_string).collect();
                if let Some(sprite) = state.sprite_mut(&args[0].to_string()) {
                    sprite.frames = frames;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value { Value::Str(v.into()) }

    #[test]
    fn create_then_velocity_then_frames() {
        let mut state = RuntimeState::new();
        let ns = SpriteNamespace;
        ns.call("ligon.sprite.create", &[s("hero"), s("hero.png"), Value::Int(3), Value::Float(4.5)], &mut state, 1).unwrap();
        ns.call("ligon.sprite.set_velocity", &[s("hero"), Value::Int(10), Value::Int(-2)], &mut state, 2).unwrap();
        ns.call("ligon.sprite.animate", &[s("hero"), s("a.png"), s("b.png")], &mut state, 3).unwrap();

        let hero = state.sprite("hero").unwrap();
        assert_eq!(hero.asset_path, "hero.png");
        assert_eq!(hero.position, Vec2::new(3.0, 4.5));
        assert_eq!(hero.velocity, Vec2::new(10.0, -2.0));
        assert_eq!(hero.frames, vec!["a.png", "b.png"]);
    }

    #[test]
    fn missing_sprite_is_ignored() {
        let mut state = RuntimeState::new();
        SpriteNamespace.call("ligon.sprite.set_velocity", &[s("ghost"), Value::Int(1), Value::Int(1)], &mut state, 1).unwrap();
        assert!(state.sprites.is_empty());
    }

    #[test]
    fn bad_coordinate_leaves_state_alone() {
        let mut state = RuntimeState::new();
        let err = SpriteNamespace
            .call("ligon.sprite.create", &[s("a"), s("a.png"), s("left"), Value::Int(0)], &mut state, 7)
            .unwrap_err();
        assert_eq!(err.line, 7);
        assert!(state.sprites.is_empty());
    }
}
