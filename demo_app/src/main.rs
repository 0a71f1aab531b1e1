//! Headless demo driver
//!
//! Loads configuration and messages from `resources/`, builds the demo scene,
//! then runs a paced frame loop that feeds a scripted sequence of key events
//! and renders into a recording surface.

mod scene;

use scene::DemoScene;
use sim_core::prelude::*;
use sim_core::config::ConfigError;
use sim_core::foundation::{logging, time::format_time};
use std::time::{Duration, Instant};

const CONFIG_PATH: &str = "resources/game.toml";
const MESSAGES_PATH: &str = "resources/messages.toml";

/// Key events replayed at given frame numbers
const SCRIPT: &[(u64, AppEvent)] = &[
    (30, AppEvent::KeyPressed(KeyCode::Right)),
    (90, AppEvent::KeyReleased(KeyCode::Right)),
    (100, AppEvent::KeyPressed(KeyCode::Up)),
    (130, AppEvent::KeyReleased(KeyCode::Up)),
    (150, AppEvent::KeyTyped(KeyCode::D)),
    (200, AppEvent::KeyTyped(KeyCode::P)),
    (230, AppEvent::KeyTyped(KeyCode::P)),
    (300, AppEvent::KeyPressed(KeyCode::Num1)),
    (340, AppEvent::KeyReleased(KeyCode::Num1)),
    (350, AppEvent::KeyPressed(KeyCode::Num0)),
    (351, AppEvent::KeyReleased(KeyCode::Num0)),
    (400, AppEvent::KeyTyped(KeyCode::G)),
    (450, AppEvent::KeyTyped(KeyCode::G)),
    (480, AppEvent::KeyTyped(KeyCode::D)),
    (560, AppEvent::KeyPressed(KeyCode::Escape)),
];

fn load_configuration(path: &str) -> Result<Configuration, AppError> {
    let mut config = match Configuration::load_from_file(path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) => {
            log::warn!("Using built-in defaults, cannot read {}: {}", path, e);
            Configuration::new()
        }
        Err(e) => return Err(e.into()),
    };
    let applied = config.parse_arguments(std::env::args().skip(1));
    if applied > 0 {
        log::info!("Applied {} command-line overrides", applied);
    }
    Ok(config)
}

fn load_messages() -> Messages {
    Messages::load_from_file(MESSAGES_PATH).unwrap_or_else(|e| {
        log::warn!("No localized messages: {}", e);
        Messages::new()
    })
}

fn run(engine: &mut Engine, scene: &mut DemoScene) -> Result<(), AppError> {
    let fps = engine.config().get_int("game.screen.fps", 60).max(1);
    let max_frames = u64::try_from(engine.config().get_int("game.demo.frames", 600)).unwrap_or(0);
    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let mut surface = RecordingSurface::new(
        engine.config().get_double("game.screen.width", 320.0),
        engine.config().get_double("game.screen.height", 200.0),
    );

    log::info!("Running at {} fps for at most {} frames", fps, max_frames);
    let mut frame = 0;
    let mut last = Instant::now();
    while !engine.is_exit_requested() && frame < max_frames {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            log::debug!("Frame {}: {:?}", frame, event);
            engine.handle_event(*event);
        }

        let elapsed = last.elapsed();
        last = Instant::now();
        scene.update(engine, elapsed.as_secs_f64())?;
        surface.reset();
        engine.frame(elapsed, &mut surface)?;
        log::trace!("Frame {} drew {} commands", frame, surface.commands().len());

        if let Some(rest) = frame_time.checked_sub(last.elapsed()) {
            std::thread::sleep(rest);
        }
        frame += 1;
    }

    log::info!("{}", engine.state().messages.format("game.demo.finished", &[&frame]));
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting simulation demo");
    let start = Instant::now();

    let config = load_configuration(CONFIG_PATH)?;
    let enemies = usize::try_from(config.get_int("game.demo.enemies", 10)).unwrap_or(0);
    let seed = u64::try_from(config.get_int("game.demo.seed", 42)).unwrap_or(0);
    let mut engine = Engine::new(config).with_messages(load_messages());
    let mut scene = DemoScene::new(seed, enemies);

    engine.load_scene(&mut scene)?;
    let result = run(&mut engine, &mut scene);
    engine.unload_scene(&mut scene);

    match result {
        Ok(()) => {
            log::info!("Demo finished in {}", format_time(start.elapsed()));
            Ok(())
        }
        Err(e) => {
            log::error!("Demo aborted: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_falls_back_to_defaults() {
        let config = load_configuration("resources/does-not-exist.toml").unwrap();
        assert_eq!(config.get_int("game.screen.fps", 60), 60);
    }

    #[test]
    fn test_broken_configuration_is_an_error() {
        let path = std::env::temp_dir().join(format!("demo_broken_{}.toml", std::process::id()));
        std::fs::write(&path, "[game\nwidth = ").unwrap();
        let err = load_configuration(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AppError::Config(ConfigError::Parse(_))));
    }
}
