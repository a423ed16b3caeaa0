use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use macroquad::prelude::*;

use super::{LifeRenderer, LifeRendererProps, RenderMode, Viewport};
use crate::application::{DisposeBag, Intent};
use crate::domain::{Life, SpeedLevel};
use crate::input;
use crate::ui::{BUTTON_GAP, BUTTON_HEIGHT, Button, Control, PANEL_WIDTH, create_buttons};

const PANEL_MARGIN: f32 = 10.0;
const PANEL_TOP: f32 = 20.0;

/// Filled-rectangle frontend with a control panel on the right
pub struct CanvasRenderer {
    latest: Rc<RefCell<Option<Life>>>,
    speed: Rc<RefCell<SpeedLevel>>,
    buttons: Vec<Button>,
    mounted: Option<LifeRendererProps>,
    subscriptions: DisposeBag,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self {
            latest: Rc::default(),
            speed: Rc::new(RefCell::new(SpeedLevel::default())),
            buttons: Vec::new(),
            mounted: None,
            subscriptions: DisposeBag::new(),
        }
    }

    fn panel_x(target: &Viewport) -> f32 {
        target.x + target.width - PANEL_WIDTH - PANEL_MARGIN
    }

    /// Board area: everything left of the panel
    fn board(props: &LifeRendererProps) -> Viewport {
        let target = &props.target;
        Viewport::new(
            target.x,
            target.y,
            (Self::panel_x(target) - PANEL_MARGIN - target.x).max(0.0),
            target.height,
        )
    }

    fn draw_grid(props: &LifeRendererProps, life: &Life) {
        let board = Self::board(props);
        let size = props.cell_size;
        let alive_color = Color::from_rgba(0, 255, 150, 255);
        let dead_cell_color = Color::from_rgba(15, 15, 15, 255);
        let grid_line_color = Color::from_rgba(40, 40, 40, 255);
        let draw_grid_lines = size >= 4.0;

        for (at, cell) in life.grid.iter_cells() {
            let (x, y) = board.cell_origin(at, size);
            if x + size > board.x + board.width || y + size > board.y + board.height {
                continue;
            }
            if cell.is_alive() {
                draw_rectangle(x, y, size, size, alive_color);
            } else if draw_grid_lines {
                draw_rectangle(x, y, size, size, dead_cell_color);
            }
            if draw_grid_lines {
                draw_rectangle_lines(x, y, size, size, 1.0, grid_line_color);
            }
        }
    }

    fn draw_panel(&self, props: &LifeRendererProps, life: &Life, mouse_pos: (f32, f32)) {
        let px = Self::panel_x(&props.target);
        draw_rectangle(
            px - PANEL_MARGIN,
            props.target.y,
            PANEL_WIDTH + 2.0 * PANEL_MARGIN,
            props.target.height,
            Color::from_rgba(30, 30, 30, 255),
        );

        for button in &self.buttons {
            button.draw(button.control().label(life.is_running), mouse_pos);
        }

        let info_top = PANEL_TOP
            + props.target.y
            + self.buttons.len() as f32 * (BUTTON_HEIGHT + BUTTON_GAP)
            + PANEL_MARGIN;
        let info = [
            format!("Generation: {}", life.generation),
            format!("Alive: {}", life.grid.alive_count()),
            format!("Speed: {}", self.speed.borrow().value()),
            format!("Grid: {}x{}", life.grid.columns(), life.grid.rows()),
        ];
        for (line, text) in info.iter().enumerate() {
            draw_text(
                text,
                px,
                info_top + line as f32 * 18.0,
                16.0,
                Color::from_rgba(150, 150, 150, 255),
            );
        }

        let help = ["Click: toggle cell", "Space: play", "Up/Down: speed", "Tab: switch view"];
        for (line, text) in help.iter().enumerate() {
            draw_text(text, px, info_top + 90.0 + line as f32 * 15.0, 12.0, GRAY);
        }
    }

    fn forward_input(&self, props: &LifeRendererProps, life: &Life, mouse_pos: (f32, f32)) {
        let mut intents = input::button_intents(&self.buttons, life, mouse_pos);

        if let Some(at) = input::left_click().and_then(|point| {
            Self::board(props).cell_at(point, props.cell_size, life.grid.columns(), life.grid.rows())
        }) {
            intents.push(Intent::ToggleCell(at));
        }
        intents.extend(input::keyboard_intents(life));

        for intent in intents {
            props.game.send(intent);
        }
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeRenderer for CanvasRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Canvas
    }

    fn mount(&mut self, props: LifeRendererProps) {
        if self.is_mounted() {
            self.dispose();
        }

        let latest = Rc::clone(&self.latest);
        self.subscriptions.add(props.game.life().subscribe(move |life: &Life| {
            *latest.borrow_mut() = Some(life.clone());
        }));
        let speed = Rc::clone(&self.speed);
        self.subscriptions
            .add(props.game.speed_level().subscribe(move |level: &SpeedLevel| {
                *speed.borrow_mut() = *level;
            }));

        self.buttons = create_buttons(Self::panel_x(&props.target), props.target.y + PANEL_TOP);
        debug!("Canvas renderer mounted with {} controls", Control::ALL.len());
        self.mounted = Some(props);
    }

    fn frame(&mut self) {
        let Some(props) = &self.mounted else {
            return;
        };
        let latest = self.latest.borrow().clone();
        let Some(life) = latest else {
            return;
        };

        let mouse_pos = mouse_position();
        Self::draw_grid(props, &life);
        self.draw_panel(props, &life, mouse_pos);
        self.forward_input(props, &life, mouse_pos);
    }

    fn dispose(&mut self) {
        self.subscriptions.dispose();
        self.latest.borrow_mut().take();
        self.buttons.clear();
        if self.mounted.take().is_some() {
            debug!("Canvas renderer disposed");
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}
