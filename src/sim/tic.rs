use hecs::World;
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Most tics run in one go; after a longer stall the clock resynchronises
/// instead of fast-forwarding.
pub const MAX_CATCHUP: u32 = 8;

/// Owns the ECS world and the fixed-rate simulation clock.
pub struct TicRunner {
    world: World,
    last: Instant,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of whole tics elapsed since the last call.
    pub fn due_tics(&mut self) -> u32 {
        self.due_tics_at(Instant::now())
    }

    fn due_tics_at(&mut self, now: Instant) -> u32 {
        let mut n = 0;
        while now.saturating_duration_since(self.last) >= TIC {
            self.last += TIC;
            n += 1;
            if n == MAX_CATCHUP {
                self.last = now;
                break;
            }
        }
        n
    }
}
