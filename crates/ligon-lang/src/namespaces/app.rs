//! Application-level declarations: mode selection and service registration.

use crate::error::RuntimeError;
use crate::Value;
use super::{NamespaceProvider, RuntimeState, check_min_args};

pub struct AppNamespace;

impl NamespaceProvider for AppNamespace {
    fn name(&self) -> &'static str { "ligon" }

    fn exports(&self) -> &'static [&'static str] {
        &["ligon.initialize", "ligon.getservice"]
    }

    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError> {
        check_min_args(target, args, 1, line)?;
        match target {
            "ligon.initialize" => {
                state.mode = args[0].to_string();
                log::debug!("mode set to `{}`", state.mode);
            }
            "ligon.getservice" => {
                let service = args[0].to_string();
                log::info!("register service: {service}");
                state.services.push(service);
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_stores_text_form() {
        let mut state = RuntimeState::new();
        AppNamespace.call("ligon.initialize", &[Value::Str("2d".into())], &mut state, 1).unwrap();
        assert_eq!(state.mode, "2d");
        AppNamespace.call("ligon.initialize", &[Value::Int(3)], &mut state, 1).unwrap();
        assert_eq!(state.mode, "3");
    }

    #[test]
    fn initialize_without_args_is_rejected() {
        let mut state = RuntimeState::new();
        assert!(AppNamespace.call("ligon.initialize", &[], &mut state, 1).is_err());
        assert_eq!(state.mode, "unknown");
    }
}
