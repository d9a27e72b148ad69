use log::{error, info, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use macroquad::prelude::*;

mod backup;
mod clock;
mod config;
mod day_night;
mod flash;
mod motion;
mod palette;
mod renderer;
mod settings;
mod simulation;
mod snapshot;
mod trail;
mod ui;
mod viewport;

use backup::FrameBackup;
use clock::FrameClock;
use day_night::{FixedHour, HourSource, LocalClock};
use simulation::SimState;
use snapshot::RenderSnapshot;
use ui::{UiAction, UiState};
use viewport::ContentBox;

fn window_conf() -> Conf {
    Conf {
        window_title: "ZigZag Retro".to_string(),
        window_width: 1024,
        window_height: 808,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("ZIGZAG_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[ZIGZAG] {d(%H:%M:%S)} {l} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("[ZIGZAG] logging disabled: {e}");
    }

    let mut sim = initial_state();
    let mut frame_clock = FrameClock::new();
    let mut backup = FrameBackup::default();
    let mut ui_state = UiState::default();
    let hours = hour_source();
    info!("started, frame backups in {}", backup.dir().display());

    loop {
        let window_w = screen_width();
        let window_h = (screen_height() - ui_state.toolbar_height).max(1.0);
        let content = ContentBox::fit(window_w, window_h);
        sim.resize(content.width as i64, content.height as i64);

        if !ui_state.wants_keyboard {
            if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                break;
            }
            if is_key_pressed(KeyCode::Space) {
                sim.toggle_pause();
            }
            if is_key_pressed(KeyCode::F11) {
                toggle_fullscreen(&mut ui_state);
            }
            if is_key_pressed(KeyCode::T) {
                sim.set_trail_enabled(!sim.show_trail);
            }
            if is_key_pressed(KeyCode::S) {
                sim.set_scanlines_enabled(!sim.show_scanlines);
            }
        }

        let now = get_time();
        if frame_clock.should_tick(now, sim.is_paused()) {
            let dt = frame_clock.tick(now);
            sim.tick(dt, hours.as_ref());
            backup.record_if_due(&sim);
        }

        clear_background(BLACK);
        let snapshot = RenderSnapshot::build(&sim, &content, window_w, window_h);
        renderer::draw(&snapshot);

        for action in ui::draw_ui(&snapshot, &mut sim, &mut ui_state) {
            match action {
                UiAction::TogglePause => sim.toggle_pause(),
                UiAction::ToggleFullscreen => toggle_fullscreen(&mut ui_state),
                UiAction::SaveConfig => save_config(&sim),
                UiAction::LoadConfig => load_config(&mut sim, &ui_state),
            }
        }

        next_frame().await;
    }

    info!("quit after {} frames", sim.frame_counter);
}

/// `ZIGZAG_SEED` replays a run; otherwise the RNG is seeded from entropy.
fn initial_state() -> SimState {
    match std::env::var("ZIGZAG_SEED").ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(seed) => {
            info!("seeded run {seed}");
            SimState::new(seed)
        }
        None => SimState::from_entropy(),
    }
}

/// `ZIGZAG_HOUR` pins the wall-clock hour, to preview night modes.
fn hour_source() -> Box<dyn HourSource> {
    match std::env::var("ZIGZAG_HOUR").ok().and_then(|v| v.parse::<u32>().ok()) {
        Some(hour) if hour < 24 => {
            info!("hour pinned to {hour}");
            Box::new(FixedHour(hour))
        }
        _ => Box::new(LocalClock),
    }
}

fn toggle_fullscreen(ui_state: &mut UiState) {
    ui_state.fullscreen = !ui_state.fullscreen;
    set_fullscreen(ui_state.fullscreen);
}

fn save_config(sim: &SimState) {
    match settings::save_to_file(&sim.settings(), config::CONFIG_DEFAULT_PATH) {
        Ok(()) => info!("config saved to {}", config::CONFIG_DEFAULT_PATH),
        Err(e) => error!("config save failed: {e}"),
    }
}

fn load_config(sim: &mut SimState, ui_state: &UiState) {
    match settings::load_from_file(config::CONFIG_DEFAULT_PATH, &sim.settings()) {
        Ok(loaded) => {
            sim.apply_settings(&loaded);
            if !ui_state.fullscreen {
                let w = (loaded.canvas_w as f32).max(config::MIN_WINDOW_W);
                let h = (loaded.canvas_h as f32).max(config::MIN_WINDOW_H);
                request_new_screen_size(w, h + ui_state.toolbar_height);
            }
            info!("config loaded from {}", config::CONFIG_DEFAULT_PATH);
        }
        Err(e) => error!("config load failed: {e}"),
    }
}
