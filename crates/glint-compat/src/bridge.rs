use crate::binder::{bind_provider, BoundProvider};
use crate::cache::{
    RefreshGroup, SeasonValues, ThermalValues, SEASON_REFRESH_INTERVAL, THERMAL_REFRESH_INTERVAL,
};
use crate::season::{SeasonHandles, SEASON_PROVIDER};
use crate::thermal::{ThermalHandles, THERMAL_PROVIDER};

use glint_host_api::{
    ClientView, ExtensionRegistry, FrameClock, UniformHolder, UniformUpdateFrequency,
};
use parking_lot::{Mutex, MutexGuard};

use std::sync::Arc;

/// Mutable bridge state. Everything in here is written only under the bridge
/// mutex, and refresh groups are written back as whole values, so accessors
/// on the render path never observe a partially updated group.
struct Inner {
    /// Process-wide monotonic tick counter. Advances once per host tick,
    /// never resets.
    tick: u64,
    /// Last host frame observed by `tick()`; the idempotency gate.
    last_frame: Option<u64>,

    season_group: RefreshGroup,
    thermal_group: RefreshGroup,

    season: SeasonValues,
    thermal: ThermalValues,
}

/// The mod-compat uniforms bridge.
///
/// Bound once at startup against the host's extension registry; the two
/// providers never re-bind and never transition back from bound to absent.
/// Every signal accessor runs the tick gate first, then reads its cached
/// value, so signals are always available regardless of provider state.
pub struct CompatUniforms {
    clock: Arc<dyn FrameClock>,
    client: Arc<dyn ClientView>,

    season: BoundProvider<SeasonHandles>,
    thermal: BoundProvider<ThermalHandles>,

    inner: Mutex<Inner>,
}

impl CompatUniforms {
    /// One-time binding pass. Consults the presence registry once per
    /// provider; each provider binds all-or-nothing. Never fails: binding
    /// problems degrade to the documented defaults.
    pub fn bind(
        registry: &dyn ExtensionRegistry,
        clock: Arc<dyn FrameClock>,
        client: Arc<dyn ClientView>,
    ) -> Arc<Self> {
        let season = bind_provider(registry, &SEASON_PROVIDER, SeasonHandles::bind);
        let thermal = bind_provider(registry, &THERMAL_PROVIDER, ThermalHandles::bind);

        Arc::new(Self {
            clock,
            client,
            season,
            thermal,
            inner: Mutex::new(Inner {
                tick: 0,
                last_frame: None,
                season_group: RefreshGroup::new(SEASON_REFRESH_INTERVAL),
                thermal_group: RefreshGroup::new(THERMAL_REFRESH_INTERVAL),
                season: SeasonValues::default(),
                thermal: ThermalValues::default(),
            }),
        })
    }

    #[inline]
    pub fn season_provider_active(&self) -> bool {
        self.season.present()
    }

    #[inline]
    pub fn thermal_provider_active(&self) -> bool {
        self.thermal.present()
    }

    /// Advances the tick gate and runs any due refresh. Idempotent within a
    /// host tick: every accessor calls in here, but the counter only moves
    /// when the host frame did.
    pub fn tick(&self) {
        let _ = self.tick_and_lock();
    }

    fn tick_and_lock(&self) -> MutexGuard<'_, Inner> {
        let frame = self.clock.frame_index();
        let mut inner = self.inner.lock();

        if inner.last_frame != Some(frame) {
            inner.last_frame = Some(frame);
            inner.tick += 1;
            let tick = inner.tick;

            if self.season.present() && inner.season_group.due(tick) {
                inner.season_group.mark(tick);
                self.refresh_season(&mut inner);
            }

            if self.thermal.present() && inner.thermal_group.due(tick) {
                inner.thermal_group.mark(tick);
                self.refresh_thermal(&mut inner);
            }
        }

        inner
    }

    /// Failures stay inside this boundary: on any error the previous group
    /// is kept and the provider is retried on the next refresh boundary.
    fn refresh_season(&self, inner: &mut Inner) {
        let Some(handles) = self.season.handles() else {
            return;
        };
        let Some(world) = self.client.world() else {
            log::debug!("compat: season refresh skipped, no active world");
            return;
        };

        match handles.refresh(&world, &inner.season) {
            // The whole group is published at once.
            Ok(next) => inner.season = next,
            Err(e) => log::debug!("compat: season refresh failed: {e}"),
        }
    }

    fn refresh_thermal(&self, inner: &mut Inner) {
        let Some(handles) = self.thermal.handles() else {
            return;
        };
        let (Some(world), Some(player)) = (self.client.world(), self.client.player()) else {
            log::debug!("compat: temperature refresh skipped, no active world or player");
            return;
        };
        let pos = self.client.player_block_pos();

        match handles.refresh(&world, &player, pos, &inner.thermal) {
            Ok(next) => inner.thermal = next,
            Err(e) => log::debug!("compat: temperature refresh failed: {e}"),
        }
    }

    /* ============================
       Signal accessors
       ============================ */

    /// Season ordinal, 0-3.
    pub fn current_season(&self) -> i32 {
        self.tick_and_lock().season.season
    }

    /// Sub-season ordinal, 0-11.
    pub fn current_sub_season(&self) -> i32 {
        self.tick_and_lock().season.sub_season
    }

    pub fn season_progress(&self) -> f32 {
        self.tick_and_lock().season.season_progress
    }

    pub fn year_progress(&self) -> f32 {
        self.tick_and_lock().season.year_progress
    }

    pub fn season_day(&self) -> i32 {
        self.tick_and_lock().season.season_day
    }

    pub fn days_per_season(&self) -> i32 {
        self.tick_and_lock().season.days_per_season
    }

    pub fn player_body_temp(&self) -> f32 {
        self.tick_and_lock().thermal.body_temp
    }

    pub fn world_ambient_temp(&self) -> f32 {
        self.tick_and_lock().thermal.ambient_temp
    }
}

/// Registers the eight mod-compat uniforms on the host uniform system. This
/// is the bridge's entire public surface toward shaders.
pub fn add_compat_uniforms(uniforms: &mut dyn UniformHolder, bridge: &Arc<CompatUniforms>) {
    use UniformUpdateFrequency::PerTick;

    let b = bridge.clone();
    uniforms.uniform_1i(PerTick, "currentSeason", Box::new(move || b.current_season()));
    let b = bridge.clone();
    uniforms.uniform_1i(PerTick, "currentSubSeason", Box::new(move || b.current_sub_season()));
    let b = bridge.clone();
    uniforms.uniform_1f(PerTick, "seasonProgress", Box::new(move || b.season_progress()));
    let b = bridge.clone();
    uniforms.uniform_1f(PerTick, "yearProgress", Box::new(move || b.year_progress()));
    let b = bridge.clone();
    uniforms.uniform_1i(PerTick, "seasonDay", Box::new(move || b.season_day()));
    let b = bridge.clone();
    uniforms.uniform_1i(PerTick, "daysPerSeason", Box::new(move || b.days_per_season()));

    let b = bridge.clone();
    uniforms.uniform_1f(PerTick, "playerBodyTemp", Box::new(move || b.player_body_temp()));
    let b = bridge.clone();
    uniforms.uniform_1f(PerTick, "worldAmbientTemp", Box::new(move || b.world_ambient_temp()));
}
