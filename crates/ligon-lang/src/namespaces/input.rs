use crate::error::RuntimeError;
use crate::runtime::state::KeyBinding;
use crate::Value;
use super::{NamespaceProvider, RuntimeState, check_min_args};

pub struct InputNamespace;

impl NamespaceProvider for InputNamespace {
    fn name(&self) -> &'static str { "input" }

    fn exports(&self) -> &'static [&'static str] {
        &["input.map_key", "input.on_key"]
    }

    /// `input.map_key("SPACE", "jump")`: while SPACE is held, `jump` is true.
    /// Key names are not validated here; the frame loop skips unknown ones.
    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        check_min_args(target, args, 2, line)?;
        let key = args[0].to_string().to_uppercase();
        let variable = args[1].to_string();
        state.key_bindings.insert(key, KeyBinding { variable, last_pressed: false });
        Ok(())
    }
}
