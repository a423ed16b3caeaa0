//! Interchangeable frontends.
//!
//! A renderer only ever sees a [`GameHandle`]: it subscribes to the state
//! streams to draw, and queues intents for user input. Swapping renderers
//! is `dispose()` on the old one and `mount()` on the new one; the game
//! keeps running underneath.

mod canvas;
mod table;

use std::fmt;
use std::str::FromStr;

use crate::application::GameHandle;
use crate::domain::Coordinates;
use crate::error::LifeError;

pub use canvas::CanvasRenderer;
pub use table::{TableRenderer, TextSurface, render_table};

/// Screen rectangle a renderer is mounted into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 < self.x + self.width
            && point.1 >= self.y
            && point.1 < self.y + self.height
    }

    /// Screen position of a cell's top-left corner
    pub fn cell_origin(&self, at: Coordinates, cell_size: f32) -> (f32, f32) {
        (
            self.x + at.x as f32 * cell_size,
            self.y + at.y as f32 * cell_size,
        )
    }

    /// Cell under a screen point, for a board of `columns` x `rows`
    pub fn cell_at(&self, point: (f32, f32), cell_size: f32, columns: usize, rows: usize) -> Option<Coordinates> {
        if !self.contains(point) || cell_size <= 0.0 {
            return None;
        }
        let x = ((point.0 - self.x) / cell_size) as usize;
        let y = ((point.1 - self.y) / cell_size) as usize;
        (x < columns && y < rows).then_some(Coordinates::new(x, y))
    }
}

/// Everything a renderer needs to mount
#[derive(Clone)]
pub struct LifeRendererProps {
    pub game: GameHandle,
    pub target: Viewport,
    pub cell_size: f32,
}

/// Capability every frontend implements
pub trait LifeRenderer {
    fn mode(&self) -> RenderMode;

    /// Attach to a game and start observing it
    fn mount(&mut self, props: LifeRendererProps);

    /// Draw the latest state and forward this frame's user input.
    /// Does nothing when not mounted.
    fn frame(&mut self);

    /// Release every subscription this renderer created. After this the
    /// renderer issues no further intents.
    fn dispose(&mut self);

    fn is_mounted(&self) -> bool;
}

/// Closed set of available frontends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Canvas,
    Table,
}

impl RenderMode {
    pub const fn all() -> [RenderMode; 2] {
        [RenderMode::Canvas, RenderMode::Table]
    }

    pub const fn label(self) -> &'static str {
        match self {
            RenderMode::Canvas => "Canvas",
            RenderMode::Table => "Table",
        }
    }

    /// Following mode, wrapping around
    pub const fn next(self) -> Self {
        match self {
            RenderMode::Canvas => RenderMode::Table,
            RenderMode::Table => RenderMode::Canvas,
        }
    }

    pub fn create_renderer(self) -> Box<dyn LifeRenderer> {
        match self {
            RenderMode::Canvas => Box::new(CanvasRenderer::new()),
            RenderMode::Table => Box::new(TableRenderer::new()),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RenderMode {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::all()
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LifeError::UnknownRenderMode(s.to_owned()))
    }
}
