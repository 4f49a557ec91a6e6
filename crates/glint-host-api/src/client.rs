use std::any::Any;
use std::sync::Arc;

/// Opaque handle to the active world. The host and the add-on that produced
/// an entry point both know the concrete type behind it; bridges only pass
/// it through.
pub type WorldHandle = Arc<dyn Any + Send + Sync>;

/// Opaque handle to an entity (usually the local player).
pub type EntityHandle = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Read-only view of the client session.
///
/// `None` means there is no active world/player right now (menu screen,
/// disconnect, dimension change); callers treat that as a transient state.
pub trait ClientView: Send + Sync {
    fn world(&self) -> Option<WorldHandle>;
    fn player(&self) -> Option<EntityHandle>;
    fn player_block_pos(&self) -> Option<BlockPos>;
}

/// The host's per-tick clock.
///
/// `frame_index` is monotonically non-decreasing while the process runs.
/// Consumers use it to detect tick boundaries, not to measure time.
pub trait FrameClock: Send + Sync {
    fn frame_index(&self) -> u64;
}
