mod clock;
mod config;
mod game;
mod intent;
mod stream;

pub use clock::{MIN_TICK_PERIOD, SimulationClock};
pub use config::{CONFIG_ENV_VAR, LifeConfig};
pub use game::{Game, GameHandle, GameOptions};
pub use intent::Intent;
pub use stream::{DisposeBag, StateObserver, Subscription};
