/// Ticks between season refreshes (~20 seconds at 60 ticks/s). Season state
/// moves slowly; the cross-module call is not worth paying every tick.
pub const SEASON_REFRESH_INTERVAL: u64 = 1200;

/// Ticks between temperature refreshes (~1.5 seconds at 60 ticks/s).
pub const THERMAL_REFRESH_INTERVAL: u64 = 90;

/// Cached season signals. One refresh group: always published as a whole so
/// readers never see a season ordinal computed against a stale day while the
/// year value is fresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonValues {
    /// Season ordinal, 0-3.
    pub season: i32,
    /// Sub-season ordinal, 0-11.
    pub sub_season: i32,
    /// Progress through the current season, [0, 1).
    pub season_progress: f32,
    /// Progress through the year cycle, [0, 1].
    pub year_progress: f32,
    /// Day within the current season, 0 to `days_per_season - 1`.
    pub season_day: i32,
    pub days_per_season: i32,
}

impl Default for SeasonValues {
    /// Static defaults: mid-summer. Served before the first successful
    /// refresh and forever when the season provider is absent.
    fn default() -> Self {
        Self {
            season: 1,
            sub_season: 4,
            season_progress: 0.5,
            year_progress: 0.375,
            season_day: 12,
            days_per_season: 24,
        }
    }
}

/// Cached temperature signals. One refresh group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalValues {
    pub body_temp: f32,
    pub ambient_temp: f32,
}

impl Default for ThermalValues {
    fn default() -> Self {
        Self {
            body_temp: 0.0,
            ambient_temp: 0.0,
        }
    }
}

/// Fixed refresh cadence for one group of cached signals.
#[derive(Debug, Clone, Copy)]
pub struct RefreshGroup {
    pub interval_ticks: u64,
    pub last_refresh_tick: u64,
}

impl RefreshGroup {
    #[inline]
    pub const fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks,
            last_refresh_tick: 0,
        }
    }

    /// True when `tick` sits on this group's refresh boundary and the group
    /// has not already refreshed at this tick.
    #[inline]
    pub fn due(&self, tick: u64) -> bool {
        tick > 0 && tick % self.interval_ticks == 0 && self.last_refresh_tick != tick
    }

    #[inline]
    pub fn mark(&mut self, tick: u64) {
        self.last_refresh_tick = tick;
    }
}
