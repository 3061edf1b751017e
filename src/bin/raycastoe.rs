//! Two-player raycast tic-tac-toe.
//!
//! ```bash
//! RAYCASTOE_LOG=info cargo run --release -- --map maps/arena.txt
//! ```

use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{InputCallback, Key, KeyRepeat, Window, WindowOptions};

use raycastoe::{
    assets::{self, TEXTURE_SIZE, TextureManifest},
    config::{Settings, WINDOW_TITLE},
    game::{Flow, Game, PendingInput},
    renderer::Software,
    sim::{Buttons, InputCmd},
};

#[derive(Parser, Debug)]
#[command(version, about = "Tic-tac-toe in a raycast maze")]
struct Cli {
    #[command(flatten)]
    settings: Settings,
}

/// Forwards typed characters from the window to the game loop.
struct CharSink(Sender<char>);

impl InputCallback for CharSink {
    fn add_char(&mut self, uni_char: u32) {
        if let Some(c) = char::from_u32(uni_char) {
            let _ = self.0.send(c);
        }
    }
}

fn held(win: &Window, keys: &[Key]) -> bool {
    keys.iter().any(|&k| win.is_key_down(k))
}

/// Continuous movement plus edge-triggered buttons for this frame.
fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    if held(win, &[Key::W, Key::Up]) {
        cmd.forward += 1.0;
    }
    if held(win, &[Key::S, Key::Down]) {
        cmd.forward -= 1.0;
    }
    if held(win, &[Key::D, Key::Right]) {
        cmd.turn += 1.0;
    }
    if held(win, &[Key::A, Key::Left]) {
        cmd.turn -= 1.0;
    }

    let pressed = |k| win.is_key_pressed(k, KeyRepeat::No);
    let ctrl = held(win, &[Key::LeftCtrl, Key::RightCtrl]);

    cmd.buttons.set(Buttons::PLACE, pressed(Key::E));
    cmd.buttons.set(Buttons::RESET, ctrl && pressed(Key::R));
    cmd.buttons.set(Buttons::CONFIRM, pressed(Key::Enter));
    cmd.buttons.set(Buttons::ERASE, pressed(Key::Backspace));
    cmd.buttons.set(Buttons::QUIT, pressed(Key::Escape));
    cmd
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RAYCASTOE_LOG");
    let cli = Cli::parse();
    let settings = cli.settings;
    settings.validate()?;

    let grid = assets::load_grid(settings.map.as_deref())?;
    let bank = assets::load_textures(&TextureManifest::standard(), TEXTURE_SIZE)?;
    let missing = assets::check_grid_textures(&grid, &bank);
    if !missing.is_empty() {
        log::warn!("{} tile kinds fall back to flat colour", missing.len());
    }

    let mut win = Window::new(
        WINDOW_TITLE,
        settings.width,
        settings.height,
        WindowOptions::default(),
    )
    .context("opening window")?;
    win.set_target_fps(settings.fps as usize);

    let (tx, rx) = mpsc::channel();
    win.set_input_callback(Box::new(CharSink(tx)));

    if !assets::check_spawns(&grid).is_empty() {
        log::warn!("players may start outside the maze");
    }

    let mut game = Game::new(grid, &settings);
    let mut pending = PendingInput::new();
    let mut renderer = Software::default();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() {
        let t0 = Instant::now();

        /* --------------- input, then as many tics as are due ------------ */
        pending.push(read_input(&win), rx.try_iter().filter(|c| !c.is_control()));
        let tics = game.due_tics();
        if pending.run(&mut game, tics) == Flow::Quit {
            break;
        }

        /* --------------- draw ------------------------------------------- */
        let mut shown = Ok(());
        game.render(&mut renderer, &bank, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown.context("presenting frame")?;
        win.set_title(&game.title());

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            log::debug!("avg frame: {avg_ms:.2} ms ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    log::info!("bye");
    Ok(())
}
