use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use life_stream::rendering::{TableRenderer, TextSurface};
use life_stream::{
    Coordinates, Game, GameOptions, Grid, Intent, Life, LifeConfig, LifeRenderer, LifeRendererProps,
    RenderMode, Viewport, presets,
};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn props(game: &Game) -> LifeRendererProps {
    LifeRendererProps {
        game: game.handle(),
        target: Viewport::new(0.0, 0.0, 800.0, 600.0),
        cell_size: 10.0,
    }
}

#[test]
fn glider_from_config_travels_one_cell_in_four_generations() {
    let config = LifeConfig::from_json(r#"{ "columns": 12, "rows": 12, "pattern": "glider" }"#)
        .unwrap();
    let mut game = Game::from_config(&config);
    let handle = game.handle();

    handle.send(Intent::Start);
    // Default speed level 80 ticks every 200ms
    for now in [0, 200, 400, 600] {
        assert!(game.pump(ms(now)));
    }

    let mut expected = Grid::dead(12, 12);
    presets::GLIDER.place_on(&mut expected, Coordinates::new(5, 5));
    assert_eq!(*game.life().grid, expected);
    assert_eq!(game.life().generation, 4);
}

#[test]
fn speed_change_mid_run_restarts_cadence() {
    let mut game = Game::new(Grid::dead(5, 5), GameOptions::default());
    let handle = game.handle();

    handle.send(Intent::SetSpeedLevel(90));
    handle.send(Intent::Start);
    assert!(game.pump(ms(0)));
    assert_eq!(game.life().interval, ms(100));

    // New interval takes effect from the moment it is applied
    handle.send(Intent::SetSpeedLevel(50));
    assert!(game.pump(ms(50)));
    assert!(!game.pump(ms(150)));
    assert!(!game.pump(ms(549)));
    assert!(game.pump(ms(550)));
    assert_eq!(game.life().generation, 3);
}

#[test]
fn toggle_from_frontend_pauses_and_flips_cell() {
    let mut game = Game::new(Grid::dead(4, 4), GameOptions::default());
    let handle = game.handle();
    let running = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&running);
    let _sub = handle
        .is_running()
        .subscribe(move |flag: &bool| sink.borrow_mut().push(*flag));

    handle.send(Intent::Start);
    game.pump(ms(0));
    handle.send(Intent::ToggleCell(Coordinates::new(2, 1)));
    game.pump(ms(10));

    assert!(!game.is_running());
    assert_eq!(game.life().grid.alive_count(), 1);
    assert_eq!(*running.borrow(), vec![false, true, false]);
}

#[test]
fn swapping_renderers_keeps_simulation_running() {
    let mut game = Game::new("...\n###\n...".parse().unwrap(), GameOptions::default());
    let handle = game.handle();
    let surface = TextSurface::new();

    let mut table: Box<dyn LifeRenderer> = Box::new(TableRenderer::with_surface(surface.clone()));
    table.mount(props(&game));
    handle.send(Intent::Start);
    game.pump(ms(0));
    assert_eq!(surface.lines()[0], "gen 1  running  speed 80  alive 3");

    table.dispose();
    assert_eq!(handle.life().subscriber_count(), 0);

    let mut canvas = RenderMode::Canvas.create_renderer();
    canvas.mount(props(&game));
    assert!(canvas.is_mounted());
    assert!(handle.life().subscriber_count() > 0);

    game.pump(ms(200));
    assert_eq!(game.life().generation, 2);
    assert!(game.is_running());
    // Disposed renderer saw nothing after unmounting
    assert!(surface.lines()[0].starts_with("gen 1"));

    canvas.dispose();
    assert_eq!(handle.life().subscriber_count(), 0);
    assert_eq!(handle.speed_level().subscriber_count(), 0);
}

#[test]
fn unknown_render_mode_rejected_at_load() {
    let result = LifeConfig::from_json(r#"{ "render_mode": "react" }"#);
    assert!(result.is_err());
}

#[test]
fn frontend_handles_only_observe_store_state() {
    let mut game = Game::new("...\n###\n...".parse().unwrap(), GameOptions::default());
    let handle = game.handle();
    let observer = handle.life().clone();

    handle.send(Intent::Start);
    game.pump(ms(0));
    handle.send(Intent::ToggleCell(Coordinates::new(0, 0)));
    game.pump(ms(1));

    let late = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&late);
    let _sub = observer.subscribe(move |life: &Life| *sink.borrow_mut() = Some(life.clone()));

    assert_eq!(late.borrow().as_ref(), Some(game.life()));
    assert_eq!(handle.is_running().latest(), game.is_running());
}
