use crate::binder::{resolve, BindError};
use crate::cache::SeasonValues;
use crate::descriptor::{BindingKind, EntryPointSpec, ProviderDescriptor};

use glint_host_api::{ExtensionRegistry, WorldHandle};

use std::any::Any;
use std::sync::Arc;

/// Opaque season-state object returned by the provider's world lookup.
/// Virtual entry points take it back; this crate never inspects it.
pub type SeasonStateHandle = Arc<dyn Any + Send + Sync>;

/// `season_state(world)`: the provider's season-state lookup for a world.
pub type SeasonStateFn =
    Arc<dyn Fn(&WorldHandle) -> Result<SeasonStateHandle, String> + Send + Sync>;

/// Ordinal accessor on the state object (season 0-3, sub-season 0-11).
pub type StateOrdinalFn =
    Arc<dyn Fn(&SeasonStateHandle) -> Result<i32, String> + Send + Sync>;

/// Cycle-position accessor on the state object, in ticks since year start.
pub type StateTicksFn = Arc<dyn Fn(&SeasonStateHandle) -> Result<i64, String> + Send + Sync>;

/// Duration accessor on the state object, in ticks.
pub type StateDurationFn =
    Arc<dyn Fn(&SeasonStateHandle) -> Result<i32, String> + Send + Sync>;

const EP_SEASON_STATE: EntryPointSpec = EntryPointSpec {
    name: "season_state",
    owner: "SeasonApi",
    signature: "fn(&WorldHandle) -> Result<SeasonStateHandle, String>",
    kind: BindingKind::Static,
};

const EP_SEASON_ORDINAL: EntryPointSpec = EntryPointSpec {
    name: "season_ordinal",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i32, String>",
    kind: BindingKind::Virtual,
};

const EP_SUB_SEASON_ORDINAL: EntryPointSpec = EntryPointSpec {
    name: "sub_season_ordinal",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i32, String>",
    kind: BindingKind::Virtual,
};

const EP_CYCLE_TICKS: EntryPointSpec = EntryPointSpec {
    name: "cycle_ticks",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i64, String>",
    kind: BindingKind::Virtual,
};

const EP_SEASON_DURATION: EntryPointSpec = EntryPointSpec {
    name: "season_duration",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i32, String>",
    kind: BindingKind::Virtual,
};

const EP_CYCLE_DURATION: EntryPointSpec = EntryPointSpec {
    name: "cycle_duration",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i32, String>",
    kind: BindingKind::Virtual,
};

const EP_DAY_DURATION: EntryPointSpec = EntryPointSpec {
    name: "day_duration",
    owner: "SeasonState",
    signature: "fn(&SeasonStateHandle) -> Result<i32, String>",
    kind: BindingKind::Virtual,
};

/// The season provider.
pub static SEASON_PROVIDER: ProviderDescriptor = ProviderDescriptor {
    mod_id: "everbloom",
    entry_points: &[
        EP_SEASON_STATE,
        EP_SEASON_ORDINAL,
        EP_SUB_SEASON_ORDINAL,
        EP_CYCLE_TICKS,
        EP_SEASON_DURATION,
        EP_CYCLE_DURATION,
        EP_DAY_DURATION,
    ],
};

/// Season progress is reported in [0, 1); exactly 1.0 would read as the
/// first frame of the next season to a shader.
const PROGRESS_MAX: f32 = 1.0 - f32::EPSILON;

/// Resolved season entry points. Exists only while `present` on the bound
/// provider; all handles resolve or none do.
pub struct SeasonHandles {
    state: SeasonStateFn,
    season_ordinal: StateOrdinalFn,
    sub_season_ordinal: StateOrdinalFn,
    cycle_ticks: StateTicksFn,
    season_duration: StateDurationFn,
    cycle_duration: StateDurationFn,
    day_duration: StateDurationFn,
}

impl core::fmt::Debug for SeasonHandles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeasonHandles").finish_non_exhaustive()
    }
}

impl SeasonHandles {
    pub(crate) fn bind(registry: &dyn ExtensionRegistry) -> Result<Self, BindError> {
        Ok(Self {
            state: resolve(registry, &SEASON_PROVIDER, &EP_SEASON_STATE)?,
            season_ordinal: resolve(registry, &SEASON_PROVIDER, &EP_SEASON_ORDINAL)?,
            sub_season_ordinal: resolve(registry, &SEASON_PROVIDER, &EP_SUB_SEASON_ORDINAL)?,
            cycle_ticks: resolve(registry, &SEASON_PROVIDER, &EP_CYCLE_TICKS)?,
            season_duration: resolve(registry, &SEASON_PROVIDER, &EP_SEASON_DURATION)?,
            cycle_duration: resolve(registry, &SEASON_PROVIDER, &EP_CYCLE_DURATION)?,
            day_duration: resolve(registry, &SEASON_PROVIDER, &EP_DAY_DURATION)?,
        })
    }

    /// Queries the provider and derives the next group of season values.
    ///
    /// Starts from `current`: a zero season/cycle/day length leaves the
    /// affected derived values at their previous cached values, silently.
    /// Any provider error aborts the whole computation; the caller keeps the
    /// previous group untouched.
    pub(crate) fn refresh(
        &self,
        world: &WorldHandle,
        current: &SeasonValues,
    ) -> Result<SeasonValues, String> {
        let state = (self.state)(world)?;

        let mut next = *current;
        next.season = (self.season_ordinal)(&state)?;
        next.sub_season = (self.sub_season_ordinal)(&state)?;

        let cycle_ticks = (self.cycle_ticks)(&state)?;
        let season_duration = (self.season_duration)(&state)?;
        let cycle_duration = (self.cycle_duration)(&state)?;
        let day_duration = (self.day_duration)(&state)?;

        if season_duration > 0 {
            let into_season = cycle_ticks.rem_euclid(season_duration as i64);
            next.season_progress =
                (into_season as f32 / season_duration as f32).clamp(0.0, PROGRESS_MAX);
        }

        if cycle_duration > 0 {
            next.year_progress = cycle_ticks as f32 / cycle_duration as f32;
        }

        if day_duration > 0 {
            next.days_per_season = season_duration / day_duration;
        }

        if day_duration > 0 && season_duration > 0 {
            let into_season = cycle_ticks.rem_euclid(season_duration as i64);
            next.season_day = (into_season / day_duration as i64) as i32;
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_host_api::ExtensionMap;

    fn state_handle() -> SeasonStateHandle {
        Arc::new(())
    }

    /// Handles wired to fixed provider values, no registry involved.
    fn fixed_handles(
        cycle_ticks: i64,
        season_duration: i32,
        cycle_duration: i32,
        day_duration: i32,
    ) -> SeasonHandles {
        SeasonHandles {
            state: Arc::new(|_| Ok(state_handle())),
            season_ordinal: Arc::new(|_| Ok(2)),
            sub_season_ordinal: Arc::new(|_| Ok(7)),
            cycle_ticks: Arc::new(move |_| Ok(cycle_ticks)),
            season_duration: Arc::new(move |_| Ok(season_duration)),
            cycle_duration: Arc::new(move |_| Ok(cycle_duration)),
            day_duration: Arc::new(move |_| Ok(day_duration)),
        }
    }

    fn world() -> WorldHandle {
        Arc::new(())
    }

    #[test]
    fn derives_progress_day_and_length_signals() {
        let handles = fixed_handles(6000, 6000, 24_000, 500);
        let next = handles.refresh(&world(), &SeasonValues::default()).unwrap();

        assert_eq!(next.season, 2);
        assert_eq!(next.sub_season, 7);
        assert_eq!(next.season_progress, 0.0);
        assert_eq!(next.year_progress, 0.25);
        assert_eq!(next.days_per_season, 12);
        assert_eq!(next.season_day, 0);
    }

    #[test]
    fn zero_season_length_keeps_previous_progress() {
        let handles = fixed_handles(6000, 0, 24_000, 500);
        let current = SeasonValues {
            season_progress: 0.125,
            ..SeasonValues::default()
        };

        let next = handles.refresh(&world(), &current).unwrap();

        // Frozen, not reset: the previous value stays in place.
        assert_eq!(next.season_progress, 0.125);
        assert_eq!(next.season_day, current.season_day);
        // Signals with live denominators still update.
        assert_eq!(next.year_progress, 0.25);
        assert_eq!(next.days_per_season, 0);
    }

    #[test]
    fn zero_day_length_keeps_previous_day_signals() {
        let handles = fixed_handles(6000, 6000, 24_000, 0);
        let current = SeasonValues::default();

        let next = handles.refresh(&world(), &current).unwrap();

        assert_eq!(next.days_per_season, current.days_per_season);
        assert_eq!(next.season_day, current.season_day);
        assert_eq!(next.season_progress, 0.0);
    }

    #[test]
    fn progress_stays_below_one() {
        // One tick before the season rolls over.
        let handles = fixed_handles(5999, 6000, 24_000, 500);
        let next = handles.refresh(&world(), &SeasonValues::default()).unwrap();

        assert!(next.season_progress < 1.0);
        assert!(next.season_progress > 0.99);
    }

    #[test]
    fn provider_error_aborts_the_refresh() {
        let mut handles = fixed_handles(6000, 6000, 24_000, 500);
        handles.cycle_ticks = Arc::new(|_| Err("no season data for dimension".to_string()));

        assert!(handles.refresh(&world(), &SeasonValues::default()).is_err());
    }

    fn register_all(map: &mut ExtensionMap) {
        let state: SeasonStateFn = Arc::new(|_| Ok(state_handle()));
        let ordinal: StateOrdinalFn = Arc::new(|_| Ok(0));
        let ticks: StateTicksFn = Arc::new(|_| Ok(0));
        let duration: StateDurationFn = Arc::new(|_| Ok(1));

        map.register("everbloom", "season_state", Box::new(state)).unwrap();
        map.register("everbloom", "season_ordinal", Box::new(ordinal.clone()))
            .unwrap();
        map.register("everbloom", "sub_season_ordinal", Box::new(ordinal))
            .unwrap();
        map.register("everbloom", "cycle_ticks", Box::new(ticks)).unwrap();
        map.register("everbloom", "season_duration", Box::new(duration.clone()))
            .unwrap();
        map.register("everbloom", "cycle_duration", Box::new(duration.clone()))
            .unwrap();
        map.register("everbloom", "day_duration", Box::new(duration)).unwrap();
    }

    #[test]
    fn bind_resolves_every_entry_point() {
        let mut map = ExtensionMap::new();
        register_all(&mut map);

        assert!(SeasonHandles::bind(&map).is_ok());
    }

    #[test]
    fn bind_fails_when_one_entry_point_has_the_wrong_shape() {
        // All entry points resolve except one, re-shaped to return f32.
        let mut map2 = ExtensionMap::new();
        let state: SeasonStateFn = Arc::new(|_| Ok(state_handle()));
        let ordinal: StateOrdinalFn = Arc::new(|_| Ok(0));
        let ticks: StateTicksFn = Arc::new(|_| Ok(0));
        let wrong: Arc<dyn Fn(&SeasonStateHandle) -> Result<f32, String> + Send + Sync> =
            Arc::new(|_| Ok(1.0));
        let duration: StateDurationFn = Arc::new(|_| Ok(1));

        map2.register("everbloom", "season_state", Box::new(state)).unwrap();
        map2.register("everbloom", "season_ordinal", Box::new(ordinal.clone()))
            .unwrap();
        map2.register("everbloom", "sub_season_ordinal", Box::new(ordinal))
            .unwrap();
        map2.register("everbloom", "cycle_ticks", Box::new(ticks)).unwrap();
        map2.register("everbloom", "season_duration", Box::new(wrong)).unwrap();
        map2.register("everbloom", "cycle_duration", Box::new(duration.clone()))
            .unwrap();
        map2.register("everbloom", "day_duration", Box::new(duration)).unwrap();

        let err = SeasonHandles::bind(&map2).unwrap_err();
        assert!(matches!(
            err,
            BindError::ShapeMismatch {
                name: "season_duration",
                ..
            }
        ));
    }
}
