use crate::error::RuntimeError;
use crate::Value;
use super::{NamespaceProvider, RuntimeState, check_min_args};

/// 3D model rendering is a stub: the request is recorded and logged only.
pub struct RenderNamespace;

impl NamespaceProvider for RenderNamespace {
    fn name(&self) -> &'static str { "render" }

    fn exports(&self) -> &'static [&'static str] {
        &["render.model"]
    }

    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        check_min_args(target, args, 1, line)?;
        let path = args[0].to_string();
        log::info!("render model: {path}");
        state.models.push(path);
        Ok(())
    }
}
