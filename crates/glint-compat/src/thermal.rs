use crate::binder::{resolve, BindError};
use crate::cache::ThermalValues;
use crate::descriptor::{BindingKind, EntryPointSpec, ProviderDescriptor};

use glint_host_api::{BlockPos, EntityHandle, ExtensionRegistry, WorldHandle};

use std::sync::Arc;

/// Which temperature reading the per-entity query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureTrait {
    /// The entity's internal body temperature.
    Core,
    /// The world temperature as experienced by the entity.
    World,
}

/// `entity_temperature(entity, trait)`: per-entity temperature query.
pub type EntityTemperatureFn =
    Arc<dyn Fn(&EntityHandle, TemperatureTrait) -> Result<f64, String> + Send + Sync>;

/// `temperature_at(world, pos)`: precise positional world-temperature query.
/// Optional; older provider builds do not export it.
pub type WorldTemperatureAtFn =
    Arc<dyn Fn(&WorldHandle, BlockPos) -> Result<f64, String> + Send + Sync>;

const EP_ENTITY_TEMPERATURE: EntryPointSpec = EntryPointSpec {
    name: "entity_temperature",
    owner: "TemperatureApi",
    signature: "fn(&EntityHandle, TemperatureTrait) -> Result<f64, String>",
    kind: BindingKind::Static,
};

/// Secondary fallback binding: its absence disables only the precise
/// positional path, never the provider.
const EP_TEMPERATURE_AT: EntryPointSpec = EntryPointSpec {
    name: "temperature_at",
    owner: "WorldTemperature",
    signature: "fn(&WorldHandle, BlockPos) -> Result<f64, String>",
    kind: BindingKind::Static,
};

/// The thermal provider.
pub static THERMAL_PROVIDER: ProviderDescriptor = ProviderDescriptor {
    mod_id: "frostbound",
    entry_points: &[EP_ENTITY_TEMPERATURE],
};

/// Resolved thermal entry points.
pub struct ThermalHandles {
    entity_temperature: EntityTemperatureFn,
    temperature_at: Option<WorldTemperatureAtFn>,
}

impl ThermalHandles {
    pub(crate) fn bind(registry: &dyn ExtensionRegistry) -> Result<Self, BindError> {
        let entity_temperature = resolve(registry, &THERMAL_PROVIDER, &EP_ENTITY_TEMPERATURE)?;

        let temperature_at =
            match resolve::<WorldTemperatureAtFn>(registry, &THERMAL_PROVIDER, &EP_TEMPERATURE_AT)
            {
                Ok(f) => Some(f),
                Err(e) => {
                    log::debug!(
                        "compat: precise world temperature unavailable ({e}), \
                         falling back to per-entity query"
                    );
                    None
                }
            };

        Ok(Self {
            entity_temperature,
            temperature_at,
        })
    }

    #[inline]
    pub(crate) fn has_precise_world_query(&self) -> bool {
        self.temperature_at.is_some()
    }

    /// Queries the provider and produces the next group of thermal values.
    /// Ambient temperature prefers the positional query when it bound and a
    /// position is known, otherwise reads the per-entity WORLD trait.
    pub(crate) fn refresh(
        &self,
        world: &WorldHandle,
        player: &EntityHandle,
        pos: Option<BlockPos>,
        current: &ThermalValues,
    ) -> Result<ThermalValues, String> {
        let mut next = *current;

        next.body_temp = (self.entity_temperature)(player, TemperatureTrait::Core)? as f32;

        next.ambient_temp = match (self.temperature_at.as_deref(), pos) {
            (Some(at), Some(pos)) => at(world, pos)? as f32,
            _ => (self.entity_temperature)(player, TemperatureTrait::World)? as f32,
        };

        Ok(next)
    }
}
