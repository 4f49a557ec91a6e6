//! Shader uniforms sourced from optional game add-ons.
//!
//! Two add-ons are supported: a season provider (`everbloom`) and a thermal
//! provider (`frostbound`). Neither is a compile-time dependency; their entry
//! points are resolved once at startup from the host's extension registry,
//! and every signal degrades to a documented default when a provider is
//! absent, fails to bind, or fails at call time. No failure in this crate
//! may reach the host render loop.

pub mod binder;
pub mod bridge;
pub mod cache;
pub mod descriptor;
pub mod season;
pub mod thermal;

pub use binder::{BindError, BoundProvider};
pub use bridge::{add_compat_uniforms, CompatUniforms};
pub use cache::{RefreshGroup, SeasonValues, ThermalValues};
pub use descriptor::{BindingKind, EntryPointSpec, ProviderDescriptor};
pub use thermal::TemperatureTrait;
