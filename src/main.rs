use std::process;
use std::time::Duration;

use log::{error, info};
use macroquad::prelude::*;
use life_stream::{Game, LifeConfig, LifeResult, LifeRenderer, LifeRendererProps, RenderMode, Viewport};

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

fn mount(mode: RenderMode, game: &Game, cell_size: f32) -> Box<dyn LifeRenderer> {
    let mut renderer = mode.create_renderer();
    renderer.mount(LifeRendererProps {
        game: game.handle(),
        target: Viewport::new(10.0, 10.0, screen_width() - 20.0, screen_height() - 20.0),
        cell_size,
    });
    info!("Showing {mode} view");
    renderer
}

/// Configuration plus its render mode; an unknown mode is fatal
fn load_config() -> LifeResult<(LifeConfig, RenderMode)> {
    let config = LifeConfig::from_env()?;
    let mode = config.render_mode()?;
    Ok((config, mode))
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let (config, mut mode) = match load_config() {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("Invalid configuration: {err}");
            process::exit(1);
        }
    };

    let mut game = Game::from_config(&config);
    let mut renderer = mount(mode, &game, config.cell_size);

    loop {
        if is_key_pressed(KeyCode::Tab) {
            renderer.dispose();
            mode = mode.next();
            renderer = mount(mode, &game, config.cell_size);
        }

        game.pump(Duration::from_secs_f64(get_time()));

        clear_background(BLACK);
        renderer.frame();

        next_frame().await;
    }
}
