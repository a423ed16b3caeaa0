use std::rc::Rc;
use std::time::Duration;

use super::{Grid, SpeedLevel};

/// Snapshot of the whole simulation as seen by subscribers.
///
/// The grid sits behind an `Rc` so publishing a snapshot to many
/// subscribers never copies the board.
#[derive(Clone, PartialEq, Debug)]
pub struct Life {
    pub grid: Rc<Grid>,
    pub is_running: bool,
    pub interval: Duration,
    /// Generations computed since the grid was last replaced
    pub generation: u64,
}

impl Life {
    pub fn new(grid: Grid, speed: SpeedLevel) -> Self {
        Self {
            grid: Rc::new(grid),
            is_running: false,
            interval: speed.interval(),
            generation: 0,
        }
    }

    pub fn speed_level(&self) -> SpeedLevel {
        SpeedLevel::from_interval(self.interval)
    }
}
