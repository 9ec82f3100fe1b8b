use std::collections::BTreeMap;

use crate::error::RuntimeError;
use crate::runtime::state::{Rgb, RuntimeState};
use crate::Value;

pub mod app;
pub mod draw;
pub mod input;
pub mod physics;
pub mod render;
pub mod sprite;
pub mod window;

// ─── Provider interface ──────────────────────────────────────────────────────

/// A family of call targets sharing a namespace, e.g. everything under
/// `ligon.sprite`. `call` receives the fully-qualified target it was
/// registered under, not the source spelling.
pub trait NamespaceProvider {
    fn name(&self) -> &'static str;

    /// Fully-qualified targets this provider answers.
    fn exports(&self) -> &'static [&'static str];

    /// Apply the operation to `state`. On `Err` the state must be untouched.
    fn call(
        &self,
        target: &'static str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<(), RuntimeError>;
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Outcome of resolving and running a call target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Handled by the operation registered under this target.
    Handled(&'static str),
    Unrecognized,
}

/// Call dispatch table keyed by namespaced identifier.
///
/// Resolution: an exact match wins; otherwise trailing `.segment`s are removed
/// one at a time and the first registered target found, i.e. the longest
/// matching prefix on a segment boundary, wins. Registration order never
/// matters; registering a target twice keeps the later provider.
pub struct CallRegistry {
    providers: Vec<Box<dyn NamespaceProvider>>,
    targets: BTreeMap<&'static str, usize>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self { providers: Vec::new(), targets: BTreeMap::new() }
    }

    pub fn register(&mut self, provider: Box<dyn NamespaceProvider>) {
        let idx = self.providers.len();
        for &target in provider.exports() {
            self.targets.insert(target, idx);
        }
        self.providers.push(provider);
    }

    /// The registered target `target` resolves to, if any.
    pub fn resolve(&self, target: &str) -> Option<&'static str> {
        let mut candidate = target;
        loop {
            if let Some((&key, _)) = self.targets.get_key_value(candidate) {
                return Some(key);
            }
            candidate = &candidate[..candidate.rfind('.')?];
        }
    }

    pub fn call(
        &self,
        target: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Dispatch, RuntimeError> {
        let Some(resolved) = self.resolve(target) else {
            return Ok(Dispatch::Unrecognized);
        };
        let provider = &self.providers[self.targets[resolved]];
        log::trace!("`{target}` -> {}::{resolved}", provider.name());
        provider.call(resolved, args, state, line)?;
        Ok(Dispatch::Handled(resolved))
    }

    /// Every registered target, sorted.
    pub fn targets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.targets.keys().copied()
    }

    pub fn standard() -> Self {
        let mut r = Self::new();
        r.register(Box::new(app::AppNamespace));
        r.register(Box::new(window::WindowNamespace));
        r.register(Box::new(draw::DrawNamespace));
        r.register(Box::new(render::RenderNamespace));
        r.register(Box::new(sprite::SpriteNamespace));
        r.register(Box::new(physics::PhysicsNamespace));
        r.register(Box::new(input::InputNamespace));
        r
    }
}

impl Default for CallRegistry {
    fn default() -> Self { Self::standard() }
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

pub(crate) fn check_min_args(target: &str, args: &[Value], n: usize, line: usize) -> Result<(), RuntimeError> {
    if args.len() < n {
        Err(RuntimeError::new(line, format!("`{target}` expects at least {n} args, got {}", args.len())))
    } else {
        Ok(())
    }
}

pub(crate) fn as_int(target: &str, v: &Value, line: usize) -> Result<i64, RuntimeError> {
    v.as_int().ok_or_else(|| RuntimeError::new(line, format!(
        "`{target}`: expected integer, got {} `{v}`", v.type_name()
    )))
}

pub(crate) fn as_float(target: &str, v: &Value, line: usize) -> Result<f64, RuntimeError> {
    v.as_float().ok_or_else(|| RuntimeError::new(line, format!(
        "`{target}`: expected number, got {} `{v}`", v.type_name()
    )))
}

/// Three leading args as an RGB triple, each clamped to 0..=255.
pub(crate) fn as_rgb(target: &str, args: &[Value], line: usize) -> Result<Rgb, RuntimeError> {
    check_min_args(target, args, 3, line)?;
    let channel = |v: &Value| as_int(target, v, line).map(|c| c.clamp(0, 255) as u8);
    Ok(Rgb(channel(&args[0])?, channel(&args[1])?, channel(&args[2])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(&'static [&'static str]);

    impl NamespaceProvider for Probe {
        fn name(&self) -> &'static str { "probe" }
        fn exports(&self) -> &'static [&'static str] { self.0 }
        fn call(&self, target: &'static str, _: &[Value], state: &mut RuntimeState, _: usize)
            -> Result<(), RuntimeError>
        {
            state.services.push(target.to_string());
            Ok(())
        }
    }

    #[test]
    fn exact_then_longest_prefix() {
        let r = CallRegistry::standard();
        assert_eq!(r.resolve("ligon.draw"), Some("ligon.draw"));
        assert_eq!(r.resolve("ligon.draw.create.rect"), Some("ligon.draw.create.rect"));
        assert_eq!(r.resolve("ligon.draw.create.circle"), Some("ligon.draw.create"));
        assert_eq!(r.resolve("ligon.draw.color.set"), Some("ligon.draw.color.set"));
        assert_eq!(r.resolve("ligon.draw.layer"), Some("ligon.draw"));
        assert_eq!(r.resolve("window.color.set.now"), Some("window.color.set"));
    }

    #[test]
    fn standard_table() {
        let targets: Vec<_> = CallRegistry::standard().targets().collect();
        assert_eq!(targets.len(), 18);
        assert!(targets.contains(&"ligon.getservice"));
        assert!(targets.contains(&"input.on_key"));
    }

    #[test]
    fn prefix_must_end_on_segment_boundary() {
        let r = CallRegistry::standard();
        assert_eq!(r.resolve("window.createx"), None);
        assert_eq!(r.resolve("foo.bar"), None);
        assert_eq!(r.resolve("ligon"), None);
        assert_eq!(r.resolve(""), None);
    }

    #[test]
    fn registration_order_does_not_decide() {
        let mut a = CallRegistry::new();
        a.register(Box::new(Probe(&["x"])));
        a.register(Box::new(Probe(&["x.y"])));
        let mut b = CallRegistry::new();
        b.register(Box::new(Probe(&["x.y"])));
        b.register(Box::new(Probe(&["x"])));
        for r in [&a, &b] {
            assert_eq!(r.resolve("x.y.z"), Some("x.y"));
            assert_eq!(r.resolve("x.q"), Some("x"));
        }
    }

    #[test]
    fn unrecognized_does_not_touch_state() {
        let r = CallRegistry::standard();
        let mut state = RuntimeState::new();
        let out = r.call("foo.bar", &[Value::Int(1)], &mut state, 1).unwrap();
        assert_eq!(out, Dispatch::Unrecognized);
        assert_eq!(state, RuntimeState::new());
    }

    #[test]
    fn rgb_clamps() {
        let args = [Value::Int(-4), Value::Int(300), Value::Float(12.9)];
        assert_eq!(as_rgb("t", &args, 1).unwrap(), Rgb(0, 255, 12));
        assert!(as_rgb("t", &args[..2], 1).is_err());
    }
}
