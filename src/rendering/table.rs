use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use macroquad::prelude::*;

use super::{LifeRenderer, LifeRendererProps, RenderMode, Viewport};
use crate::application::{DisposeBag, Intent};
use crate::domain::{Cell, Life};
use crate::input;

/// Lines above the first board row: status line and top border
const HEADER_LINES: usize = 2;

/// Text the table renderer writes into. Cloning shares the same buffer,
/// so a host (or a test) can read what the renderer produced.
#[derive(Clone, Default, Debug)]
pub struct TextSurface(Rc<RefCell<Vec<String>>>);

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn write(&self, lines: Vec<String>) {
        *self.0.borrow_mut() = lines;
    }
}

/// Render a snapshot as a bordered character table with a status line
pub fn render_table(life: &Life) -> Vec<String> {
    let grid = &life.grid;
    let status = format!(
        "gen {}  {}  speed {}  alive {}",
        life.generation,
        if life.is_running { "running" } else { "paused" },
        life.speed_level().value(),
        grid.alive_count(),
    );
    let border = format!("+{}+", "-".repeat(grid.columns()));

    let mut lines = Vec::with_capacity(grid.rows() + HEADER_LINES + 1);
    lines.push(status);
    lines.push(border.clone());
    lines.extend(grid.row_slices().map(|row| {
        let glyphs: String = row.iter().copied().map(Cell::glyph).collect();
        format!("|{glyphs}|")
    }));
    lines.push(border);
    lines
}

/// Character-grid frontend. Every glyph sits on a `cell_size` square so a
/// click maps straight back to the cell under it.
pub struct TableRenderer {
    surface: TextSurface,
    latest: Rc<RefCell<Option<Life>>>,
    mounted: Option<LifeRendererProps>,
    subscriptions: DisposeBag,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self::with_surface(TextSurface::new())
    }

    pub fn with_surface(surface: TextSurface) -> Self {
        Self {
            surface,
            latest: Rc::default(),
            mounted: None,
            subscriptions: DisposeBag::new(),
        }
    }

    pub fn surface(&self) -> &TextSurface {
        &self.surface
    }

    /// Area covered by board cells, inside the border
    fn board(props: &LifeRendererProps, life: &Life) -> Viewport {
        let size = props.cell_size;
        Viewport::new(
            props.target.x + size,
            props.target.y + HEADER_LINES as f32 * size,
            life.grid.columns() as f32 * size,
            life.grid.rows() as f32 * size,
        )
    }

    fn draw_surface(&self, props: &LifeRendererProps) {
        let size = props.cell_size;
        let alive = Color::from_rgba(0, 255, 150, 255);
        let frame = Color::from_rgba(150, 150, 150, 255);

        for (row, line) in self.surface.lines().iter().enumerate() {
            let y = props.target.y + (row as f32 + 1.0) * size;
            if row == 0 {
                draw_text(line, props.target.x, y, size, WHITE);
                continue;
            }
            for (column, glyph) in line.chars().enumerate() {
                let color = if glyph == Cell::Alive.glyph() { alive } else { frame };
                let mut buffer = [0u8; 4];
                draw_text(
                    glyph.encode_utf8(&mut buffer),
                    props.target.x + column as f32 * size,
                    y,
                    size,
                    color,
                );
            }
        }
    }

    fn forward_input(&self, props: &LifeRendererProps, life: &Life) {
        if let Some(at) = input::left_click().and_then(|point| {
            Self::board(props, life).cell_at(
                point,
                props.cell_size,
                life.grid.columns(),
                life.grid.rows(),
            )
        }) {
            props.game.send(Intent::ToggleCell(at));
        }
        for intent in input::keyboard_intents(life) {
            props.game.send(intent);
        }
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeRenderer for TableRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Table
    }

    fn mount(&mut self, props: LifeRendererProps) {
        if self.is_mounted() {
            self.dispose();
        }

        let surface = self.surface.clone();
        let latest = Rc::clone(&self.latest);
        self.subscriptions.add(props.game.life().subscribe(move |life: &Life| {
            surface.write(render_table(life));
            *latest.borrow_mut() = Some(life.clone());
        }));
        debug!("Table renderer mounted");
        self.mounted = Some(props);
    }

    fn frame(&mut self) {
        let Some(props) = &self.mounted else {
            return;
        };
        self.draw_surface(props);

        let latest = self.latest.borrow().clone();
        if let Some(life) = latest {
            self.forward_input(props, &life);
        }
    }

    fn dispose(&mut self) {
        self.subscriptions.dispose();
        self.latest.borrow_mut().take();
        if self.mounted.take().is_some() {
            debug!("Table renderer disposed");
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::{Game, GameOptions};
    use crate::domain::Grid;

    fn props(game: &Game) -> LifeRendererProps {
        LifeRendererProps {
            game: game.handle(),
            target: Viewport::new(0.0, 0.0, 400.0, 300.0),
            cell_size: 10.0,
        }
    }

    #[test]
    fn test_render_table_layout() {
        let grid: Grid = "#..\n.#.".parse().unwrap();
        let life = Life::new(grid, Default::default());
        let lines = render_table(&life);
        assert_eq!(lines[0], "gen 0  paused  speed 80  alive 2");
        assert_eq!(&lines[1..], ["+---+", "|#..|", "|.#.|", "+---+"]);
    }

    #[test]
    fn test_mount_replays_current_state() {
        let game = Game::new("##\n..".parse().unwrap(), GameOptions::default());
        let mut renderer = TableRenderer::new();
        assert!(renderer.surface().is_empty());

        renderer.mount(props(&game));
        assert!(renderer.is_mounted());
        assert_eq!(renderer.surface().lines()[2], "|##|");
    }

    #[test]
    fn test_surface_follows_generations_until_disposed() {
        let mut game = Game::new("...\n###\n...".parse().unwrap(), GameOptions::default());
        let surface = TextSurface::new();
        let mut renderer = TableRenderer::with_surface(surface.clone());
        renderer.mount(props(&game));
        let baseline = game.handle().life().subscriber_count();

        game.play();
        game.pump(Duration::ZERO);
        assert_eq!(&surface.lines()[2..5], ["|.#.|", "|.#.|", "|.#.|"]);

        renderer.dispose();
        assert!(!renderer.is_mounted());
        assert_eq!(game.handle().life().subscriber_count(), baseline - 1);

        let before = surface.lines();
        game.pump(Duration::from_secs(10));
        assert_eq!(surface.lines(), before);
    }

    #[test]
    fn test_remount_keeps_single_subscription() {
        let game = Game::new(Grid::dead(2, 2), GameOptions::default());
        let mut renderer = TableRenderer::new();
        renderer.mount(props(&game));
        renderer.mount(props(&game));
        assert_eq!(game.handle().life().subscriber_count(), 1);
    }
}
