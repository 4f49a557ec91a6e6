//! Interfaces the Glint host exposes to its compatibility bridges.
//!
//! Everything here is a contract, not an implementation: the render pipeline
//! owns the real uniform system and client session, add-on loading owns the
//! extension registry. Bridges consume these traits and stay decoupled from
//! host internals.

pub mod client;
pub mod registry;
pub mod uniforms;

pub use client::{BlockPos, ClientView, EntityHandle, FrameClock, WorldHandle};
pub use registry::{ExtensionMap, ExtensionRegistry};
pub use uniforms::{FloatSupplier, IntSupplier, UniformHolder, UniformUpdateFrequency};
