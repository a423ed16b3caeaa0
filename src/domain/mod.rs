mod cell;
mod coordinates;
mod grid;
mod life;
mod patterns;
pub mod rules;
mod speed;

pub use cell::Cell;
pub use coordinates::Coordinates;
pub use grid::Grid;
pub use life::Life;
pub use patterns::{Pattern, presets};
pub use speed::{SPEED_LEVEL_DEFAULT, SPEED_LEVEL_MAX, SPEED_LEVEL_MIN, SPEED_STEP, SpeedLevel};
