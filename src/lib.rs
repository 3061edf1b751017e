//! Raycastoe: tic-tac-toe where a mark is placed by walking into one of
//! nine rooms of a first-person raycast maze.
//!
//! * [`world`]    – grid, camera, textures, sprites (pure data).
//! * [`engine`]   – the raycasting core: DDA caster, wall columns, sprites.
//! * [`renderer`] – draw targets; the software frame buffer lives here.
//! * [`sim`]      – ECS world of players and billboards, movement, tic clock.
//! * [`game`]     – board rules, phases, minimap and HUD.
//! * [`assets`]   – texture manifest, procedural textures, map loading.
//! * [`config`]   – command line settings and game constants.

pub mod assets;
pub mod config;
pub mod engine;
pub mod game;
pub mod renderer;
pub mod sim;
pub mod world;
