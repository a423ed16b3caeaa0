use crate::domain::{Coordinates, Grid};

/// Everything a frontend can ask of the simulation.
/// Variants are matched exhaustively by the store; adding one without
/// handling it is a compile error.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Start,
    Stop,
    /// Re-seed the board at its current size
    Randomize,
    /// Kill every cell, keeping the size
    Reset,
    /// Requested speed level; clamped by the store
    SetSpeedLevel(i32),
    ToggleCell(Coordinates),
    /// Replace the board wholesale (patterns, loaded states)
    SetLife(Grid),
}

impl Intent {
    /// Short name for log lines
    pub const fn name(&self) -> &'static str {
        match self {
            Intent::Start => "start",
            Intent::Stop => "stop",
            Intent::Randomize => "randomize",
            Intent::Reset => "reset",
            Intent::SetSpeedLevel(_) => "set_speed_level",
            Intent::ToggleCell(_) => "toggle_cell",
            Intent::SetLife(_) => "set_life",
        }
    }
}
