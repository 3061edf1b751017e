//! Top-down grid viewer with a fan of DDA rays from a movable eye.
//!
//! ```bash
//! cargo run --bin map_view -- --map maps/arena.txt --x 3.5 --y 3.5 --rays 48
//! ```
//!
//! Arrows turn and move the eye, Esc quits.

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Key, Window, WindowOptions};

use raycastoe::{
    assets::{self, mark_color},
    config::Settings,
    engine::cast,
    game::board::Mark,
    renderer::{Renderer, RendererExt, Software},
    world::{Camera, Grid, math::Vec2Ext},
};

const BACKGROUND: u32 = 0xFF_101014;
const WALL: u32 = 0xFF_B4B4B4;
const GRID_LINE: u32 = 0xFF_2A2A30;
const RAY: u32 = 0xFF_FFD24A;
const MISS: u32 = 0xFF_FF4040;

#[derive(Parser, Debug)]
#[command(about = "Top-down view of a map with cast rays")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Eye position, grid units
    #[arg(long, default_value_t = 11.5)]
    x: f32,
    #[arg(long, default_value_t = 11.5)]
    y: f32,

    /// Facing angle in radians, 0 is +X
    #[arg(long, default_value_t = std::f32::consts::PI)]
    angle: f32,

    /// Number of rays across the field of view
    #[arg(long, default_value_t = 32)]
    rays: usize,
}

/// Map-space → screen-space: uniform scale with a 5 % margin, centred.
struct View {
    scale: f32,
    offset: Vec2,
}

impl View {
    fn fit(grid: &Grid, w: usize, h: usize) -> Self {
        let map = Vec2::new(grid.width() as f32, grid.height() as f32);
        let scale = (w as f32 / map.x).min(h as f32 / map.y) * 0.95;
        let offset = (Vec2::new(w as f32, h as f32) - map * scale) / 2.0;
        Self { scale, offset }
    }

    fn to_screen(&self, p: Vec2) -> (i32, i32) {
        let s = self.offset + p * self.scale;
        (s.x as i32, s.y as i32)
    }
}

fn draw(r: &mut Software, grid: &Grid, view: &View, cam: &Camera, rays: usize) {
    let (w, h) = (r.width(), r.height());
    r.fill_rect(0, 0, w as i32, h as i32, BACKGROUND);

    let cell = view.scale.ceil() as i32;
    for (x, y, _) in grid.walls() {
        let (sx, sy) = view.to_screen(Vec2::new(x as f32, y as f32));
        r.fill_rect(sx, sy, cell, cell, WALL);
    }
    for x in 0..=grid.width() {
        let (x0, y0) = view.to_screen(Vec2::new(x as f32, 0.0));
        let (x1, y1) = view.to_screen(Vec2::new(x as f32, grid.height() as f32));
        r.draw_line(x0, y0, x1, y1, GRID_LINE);
    }
    for y in 0..=grid.height() {
        let (x0, y0) = view.to_screen(Vec2::new(0.0, y as f32));
        let (x1, y1) = view.to_screen(Vec2::new(grid.width() as f32, y as f32));
        r.draw_line(x0, y0, x1, y1, GRID_LINE);
    }

    let eye = view.to_screen(cam.pos());
    let steps = grid.max_ray_steps();
    for i in 0..rays {
        let dir = cam.ray_dir(Camera::camera_x(i, rays));
        let hit = cast(cam.pos(), dir, grid, steps);
        let (end, color) = if hit.hit {
            (cam.pos() + dir * hit.distance, RAY)
        } else {
            (cam.pos() + dir.normalize_or_zero() * 2.0, MISS)
        };
        let (ex, ey) = view.to_screen(end);
        r.draw_line(eye.0, eye.1, ex, ey, color);
    }

    r.fill_square_centered(eye.0, eye.1, 6, mark_color(Mark::X));
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RAYCASTOE_LOG");
    let cli = Cli::parse();
    cli.settings.validate()?;

    let grid = assets::load_grid(cli.settings.map.as_deref())?;
    let (w, h) = (cli.settings.width, cli.settings.height);
    let view = View::fit(&grid, w, h);

    let mut pos = Vec2::new(cli.x, cli.y);
    let mut dir = Vec2::X.rotated(cli.angle);
    if !grid.is_walkable(pos) {
        log::warn!("eye at ({}, {}) is not on a free cell", pos.x, pos.y);
    }

    let mut win =
        Window::new("Raycastoe map", w, h, WindowOptions::default()).context("opening window")?;
    win.set_target_fps(cli.settings.fps as usize);
    let mut renderer = Software::default();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if win.is_key_down(Key::Left) {
            dir = dir.rotated(-0.03);
        }
        if win.is_key_down(Key::Right) {
            dir = dir.rotated(0.03);
        }
        if win.is_key_down(Key::Up) {
            pos += dir * 0.05;
        }
        if win.is_key_down(Key::Down) {
            pos -= dir * 0.05;
        }

        let cam = Camera::new(pos, dir, cli.settings.fov);
        renderer.begin_frame(w, h);
        draw(&mut renderer, &grid, &view, &cam, cli.rays.max(1));

        let mut shown = Ok(());
        renderer.end_frame(|fb, fw, fh| shown = win.update_with_buffer(fb, fw, fh));
        shown.context("presenting frame")?;
    }
    Ok(())
}
