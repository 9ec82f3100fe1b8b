//! `ligon.draw` blocks and the primitives created inside them.
//!
//! `ligon.draw(...)` and `ligon.draw.create` are grouping calls: they change
//! nothing themselves, the interpreter runs their block.

use crate::error::RuntimeError;
use crate::runtime::state::{Bounds, RectCommand};
use crate::Value;
use super::{NamespaceProvider, RuntimeState, as_int, as_rgb, check_min_args};

pub struct DrawNamespace;

impl NamespaceProvider for DrawNamespace {
    fn name(&self) -> &'static str { "ligon.draw" }

    fn exports(&self) -> &'static [&'static str] {
        &[
            "ligon.draw",
            "ligon.draw.create",
            "ligon.draw.create.rect",
            "ligon.draw.color",
            "ligon.draw.color.set",
        ]
    }

    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        match target {
            // ligon.draw.create.rect(x, y, w, h)
            "ligon.draw.create.rect" => {
                check_min_args(target, args, 4, line)?;
                let n = |i: usize| as_int(target, &args[i], line);
                let bounds = Bounds { x: n(0)?, y: n(1)?, width: n(2)?, height: n(3)? };
                state.rectangles.push(RectCommand { bounds, color: state.draw_color });
            }
            "ligon.draw.color" | "ligon.draw.color.set" => {
                state.draw_color = as_rgb(target, args, line)?;
            }
            _ => {}
        }
        Ok(())
    }
}
