use crate::error::RuntimeError;
use crate::Value;
use super::{NamespaceProvider, RuntimeState, as_float, check_min_args};

pub struct PhysicsNamespace;

impl NamespaceProvider for PhysicsNamespace {
    fn name(&self) -> &'static str { "physics" }

    fn exports(&self) -> &'static [&'static str] {
        &["physics.gravity", "physics.set_gravity"]
    }

    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        check_min_args(target, args, 1, line)?;
        state.physics.gravity = as_float(target, &args[0], line)?;
        Ok(())
    }
}
