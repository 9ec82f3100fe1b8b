use crate::error::RuntimeError;
use crate::runtime::state::Window;
use crate::Value;
use super::{NamespaceProvider, RuntimeState, as_int, as_rgb, check_min_args};

pub struct WindowNamespace;

impl NamespaceProvider for WindowNamespace {
    fn name(&self) -> &'static str { "window" }

    fn exports(&self) -> &'static [&'static str] {
        &["window.create", "window.color", "window.color.set"]
    }

    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        match target {
            // window.create(name, width, height)
            "window.create" => {
                check_min_args(target, args, 3, line)?;
                let name = args[0].to_string();
                let size = |v: &Value| as_int(target, v, line)
                    .map(|n| n.clamp(0, u32::MAX as i64) as u32);
                let window = Window { width: size(&args[1])?, height: size(&args[2])? };
                state.add_window(name, window);
            }
            "window.color" | "window.color.set" => {
                state.background_color = as_rgb(target, args, line)?;
            }
            _ => {}
        }
        Ok(())
    }
}
