// Error type shared by every layer
pub mod error;

// Domain layer - Rules, grid and snapshots
pub mod domain;

// Application layer - Clock, state store and streams
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use application::{Game, GameHandle, GameOptions, Intent, LifeConfig, StateObserver, Subscription};
pub use domain::{Cell, Coordinates, Grid, Life, Pattern, SpeedLevel, presets};
pub use error::{LifeError, LifeResult};
pub use rendering::{LifeRenderer, LifeRendererProps, RenderMode, Viewport};
