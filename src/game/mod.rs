//! Tic-tac-toe on top of the raycaster.
//!
//! Each player walks through a 3×3 arrangement of rooms; pressing *place*
//! claims the room the player stands in as a board cell. [`Game`] owns the
//! rules, the ECS world and the render scratch, and drives a fixed list of
//! [`GameObject`]s for update and draw.

pub mod board;
mod hud;
mod input;
mod minimap;
pub mod names;
mod object;

use glam::Vec2;
use hecs::Entity;
use smallvec::SmallVec;

use crate::{
    assets::{self, tex},
    config::{GAME_OVER_SECS, ROOM_STRIDE, SPAWN_FACING, SPAWN_O, SPAWN_X, Settings, WINDOW_TITLE},
    engine::{FrameStats, Raycaster},
    renderer::{Renderer, RendererExt, Rgba},
    sim::{self, Avatar, Billboard, Buttons, Facing, InputCmd, Player, Position, TicRunner},
    world::{Camera, Grid, Sprite, TextureBank},
};
use board::{BOARD_SIZE, Board, Mark, Outcome};
use names::NameEntry;
pub use input::PendingInput;
pub use object::{DEFAULT_OBJECTS, GameObject};

/// Per-frame sprite list; the arena never comes close to spilling.
pub type SpriteList = SmallVec<[Sprite; 32]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    NameEntry(NameEntry),
    Playing,
    GameOver { outcome: Outcome, timer: f32 },
}

/// What the main loop should do after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game {
    sim: TicRunner,
    grid: Grid,
    board: Board,
    phase: Phase,
    current: Mark,
    objects: Vec<GameObject>,
    raycaster: Raycaster,
    fov: f32,
    width: usize,
    height: usize,
}

impl Game {
    pub fn new(grid: Grid, settings: &Settings) -> Self {
        let view_h = settings.view_height();
        let mut game = Self {
            sim: TicRunner::new(),
            grid,
            board: Board::new(),
            phase: Phase::NameEntry(NameEntry::new()),
            current: Mark::X,
            objects: DEFAULT_OBJECTS.to_vec(),
            raycaster: Raycaster::new(settings.width, view_h, settings.render_style()),
            fov: settings.fov,
            width: settings.width,
            height: settings.height,
        };
        game.spawn_world();
        game
    }

    fn spawn_world(&mut self) {
        let world = self.sim.world_mut();
        for (mark, pos) in [(Mark::X, SPAWN_X), (Mark::O, SPAWN_O)] {
            let player = Player {
                mark,
                name: mark.default_name().to_string(),
                score: 0,
            };
            sim::spawn_player(world, player, pos, SPAWN_FACING, assets::avatar_texture(mark));
        }
        let mut placed = 0;
        for prop in props() {
            if self.grid.is_walkable(prop.pos) {
                sim::spawn_prop(world, prop);
                placed += 1;
            } else {
                log::debug!("prop at {:?} is inside a wall, skipped", prop.pos);
            }
        }
        log::info!("spawned 2 players and {placed} props");
    }

    /*──────────────────────── accessors ──────────────────────────────*/

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whose turn it is.
    pub fn current(&self) -> Mark {
        self.current
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Rows used by the 3-D view; the panel sits below.
    pub fn view_height(&self) -> usize {
        self.raycaster.screen().h
    }

    /// Tics due since the last call; see [`TicRunner::due_tics`].
    pub fn due_tics(&mut self) -> u32 {
        self.sim.due_tics()
    }

    fn player_entity(&self, mark: Mark) -> Option<Entity> {
        sim::find_player(self.sim.world(), mark)
    }

    pub fn player(&self, mark: Mark) -> Option<Player> {
        let e = self.player_entity(mark)?;
        self.sim.world().get::<&Player>(e).ok().map(|p| (*p).clone())
    }

    pub fn score(&self, mark: Mark) -> u32 {
        self.player(mark).map_or(0, |p| p.score)
    }

    fn name(&self, mark: Mark) -> String {
        self.player(mark)
            .map_or_else(|| mark.default_name().to_string(), |p| p.name)
    }

    /// Position and facing of `mark`'s player.
    pub fn pose(&self, mark: Mark) -> Option<(Vec2, Vec2)> {
        let e = self.player_entity(mark)?;
        let world = self.sim.world();
        let pos = world.get::<&Position>(e).ok()?.0;
        let facing = world.get::<&Facing>(e).ok()?.0;
        Some((pos, facing))
    }

    /// Camera of the player whose turn it is.
    pub fn camera(&self) -> Option<Camera> {
        let (pos, dir) = self.pose(self.current)?;
        Some(Camera::new(pos, dir, self.fov))
    }

    /*──────────────────────── update ─────────────────────────────────*/

    /// Run one tic. `typed` are the characters entered since the last tic.
    pub fn update(&mut self, cmd: &InputCmd, typed: &[char]) -> Flow {
        if cmd.buttons.contains(Buttons::QUIT) {
            return Flow::Quit;
        }
        if cmd.buttons.contains(Buttons::RESET) {
            self.full_reset();
            return Flow::Continue;
        }

        for i in 0..self.objects.len() {
            let obj = self.objects[i];
            obj.update(self, cmd);
        }

        match &mut self.phase {
            Phase::NameEntry(entry) => {
                for &c in typed {
                    entry.push(c);
                }
                if cmd.buttons.contains(Buttons::ERASE) {
                    entry.backspace();
                }
                if cmd.buttons.contains(Buttons::CONFIRM) {
                    if let Some((x, o)) = entry.confirm() {
                        self.start_match(x, o);
                    }
                }
            }
            Phase::Playing => {
                if cmd.buttons.contains(Buttons::PLACE) {
                    self.try_place();
                }
            }
            Phase::GameOver { timer, .. } => {
                *timer -= sim::DT;
                if *timer <= 0.0 {
                    self.current = self.current.other();
                    self.reset_board();
                    self.phase = Phase::Playing;
                    log::info!("next round, {} starts", self.current);
                }
            }
        }
        Flow::Continue
    }

    fn start_match(&mut self, name_x: String, name_o: String) {
        log::info!("{name_x} (X) vs {name_o} (O)");
        for (mark, name) in [(Mark::X, name_x), (Mark::O, name_o)] {
            self.with_player(mark, |p| p.name = name);
        }
        self.current = Mark::X;
        self.phase = Phase::Playing;
    }

    fn with_player(&mut self, mark: Mark, f: impl FnOnce(&mut Player)) {
        if let Some(e) = self.player_entity(mark) {
            if let Ok(p) = self.sim.world_mut().query_one_mut::<&mut Player>(e) {
                f(p);
            }
        }
    }

    /// Board cell under `pos`, `None` outside the 3×3 area.
    pub fn cell_at(pos: Vec2) -> Option<(usize, usize)> {
        let c = (pos / ROOM_STRIDE).floor();
        let n = BOARD_SIZE as f32;
        if !c.is_finite() || c.x < 0.0 || c.y < 0.0 || c.x >= n || c.y >= n {
            return None;
        }
        Some((c.x as usize, c.y as usize))
    }

    /// World position of the centre of room `(cx, cy)`.
    pub fn cell_centre(cx: usize, cy: usize) -> Vec2 {
        (Vec2::new(cx as f32, cy as f32) + 0.5) * ROOM_STRIDE
    }

    fn try_place(&mut self) {
        let mark = self.current;
        let Some((pos, _)) = self.pose(mark) else {
            return;
        };
        let Some((cx, cy)) = Self::cell_at(pos) else {
            return;
        };
        if let Err(e) = self.board.place(cx, cy, mark) {
            log::debug!("place refused: {e}");
            return;
        }

        let sprite = Sprite::new(Self::cell_centre(cx, cy), assets::mark_texture(mark));
        sim::spawn_mark(self.sim.world_mut(), sprite);
        log::info!("{} placed {mark} at ({cx}, {cy})", self.name(mark));

        match self.board.outcome() {
            Some(outcome) => {
                if let Outcome::Win(w) = outcome {
                    self.with_player(w, |p| p.score += 1);
                    log::info!("{} wins", self.name(w));
                } else {
                    log::info!("draw");
                }
                self.phase = Phase::GameOver {
                    outcome,
                    timer: GAME_OVER_SECS,
                };
            }
            None => self.current = mark.other(),
        }
    }

    /// Clear the board and its mark billboards; props stay.
    fn reset_board(&mut self) {
        self.board.reset();
        sim::clear_marks(self.sim.world_mut());
    }

    /// Scores, names and board back to the start, X to move.
    pub fn full_reset(&mut self) {
        self.reset_board();
        for mark in Mark::BOTH {
            self.with_player(mark, |p| {
                p.score = 0;
                p.name = mark.default_name().to_string();
            });
        }
        self.current = Mark::X;
        self.phase = Phase::NameEntry(NameEntry::new());
        log::info!("full reset");
    }

    /*──────────────────────── draw ───────────────────────────────────*/

    /// Billboards visible to the current player: the other player's
    /// avatar plus every prop and placed mark.
    pub fn gather_sprites(&self) -> SpriteList {
        let world = self.sim.world();
        let mut out = SpriteList::new();
        for (_, (p, pos, avatar)) in world.query::<(&Player, &Position, &Avatar)>().iter() {
            if p.mark != self.current {
                out.push(Sprite::new(pos.0, avatar.0));
            }
        }
        for (_, b) in world.query::<&Billboard>().iter() {
            out.push(b.0);
        }
        out
    }

    /// Draw every object into `r` and hand the frame to `submit`.
    pub fn render<R, F>(&mut self, r: &mut R, bank: &TextureBank, submit: F) -> FrameStats
    where
        R: Renderer,
        F: FnOnce(&[Rgba], usize, usize),
    {
        r.begin_frame(self.width, self.height);
        let mut stats = FrameStats::default();
        for i in 0..self.objects.len() {
            let obj = self.objects[i];
            obj.draw(self, r, bank, &mut stats);
        }
        r.end_frame(submit);
        stats
    }

    /// Darken the view between rounds; show the result when it is over.
    fn draw_overlay<R: Renderer>(&self, r: &mut R, bank: &TextureBank) {
        let w = self.width as i32;
        let h = self.view_height() as i32;
        match &self.phase {
            Phase::Playing => {}
            Phase::NameEntry(entry) => {
                r.fill_rect(0, 0, w, h, 0xB4_000000);
                let size = h / 3;
                if let Ok(t) = bank.texture(assets::avatar_texture(entry.editing())) {
                    r.draw_texture(t, (w - size) / 2, h / 6, size);
                }
                // one slot per typed character
                let n = entry.buffer().chars().count() as i32;
                let slot = 14;
                let x0 = (w - n * (slot + 4)) / 2;
                for i in 0..n {
                    r.fill_rect(x0 + i * (slot + 4), h * 2 / 3, slot, slot, 0xFF_DCDCDC);
                }
            }
            Phase::GameOver { outcome, .. } => {
                r.fill_rect(0, 0, w, h, 0x8C_000000);
                let size = h / 2;
                let marks: &[Mark] = match outcome {
                    Outcome::Win(Mark::X) => &[Mark::X],
                    Outcome::Win(Mark::O) => &[Mark::O],
                    Outcome::Draw => &Mark::BOTH,
                };
                let total = size * marks.len() as i32;
                for (i, &m) in marks.iter().enumerate() {
                    if let Ok(t) = bank.texture(assets::mark_texture(m)) {
                        r.draw_texture(t, (w - total) / 2 + i as i32 * size, (h - size) / 2, size);
                    }
                }
            }
        }
    }

    /*──────────────────────── title ──────────────────────────────────*/

    /// Textual status for the window title.
    pub fn title(&self) -> String {
        let scores = format!(
            "{} {} : {} {}",
            self.name(Mark::X),
            self.score(Mark::X),
            self.score(Mark::O),
            self.name(Mark::O)
        );
        match &self.phase {
            Phase::NameEntry(entry) => format!(
                "{WINDOW_TITLE} | name for {}: {}_ (Enter to confirm)",
                entry.editing(),
                entry.buffer()
            ),
            Phase::Playing => format!(
                "{WINDOW_TITLE} | {} ({}) to place | {scores}",
                self.name(self.current),
                self.current
            ),
            Phase::GameOver {
                outcome: Outcome::Win(m),
                ..
            } => format!("{WINDOW_TITLE} | {} ({m}) wins! | {scores}", self.name(*m)),
            Phase::GameOver {
                outcome: Outcome::Draw,
                ..
            } => format!("{WINDOW_TITLE} | draw | {scores}"),
        }
    }
}

/*──────────────────────── decorations ────────────────────────────────*/

const SKULL_SCALE: f32 = 0.5;
const SKULL_Z: f32 = -0.5;
const CHAINS_SCALE: f32 = 0.5;
const CHAINS_Z: f32 = 0.5;

/// Lanterns, skulls on the floor and chains hanging from the ceiling.
pub fn props() -> Vec<Sprite> {
    let lantern = |x, y| Sprite::new(Vec2::new(x, y), tex::LANTERN);
    let skull = |x, y| {
        Sprite::new(Vec2::new(x, y), tex::SKULL)
            .with_scale(SKULL_SCALE)
            .with_z(SKULL_Z)
    };
    let chains = |x, y| {
        Sprite::new(Vec2::new(x, y), tex::CHAINS)
            .with_scale(CHAINS_SCALE)
            .with_z(CHAINS_Z)
    };
    vec![
        lantern(2.2, 4.7),
        lantern(11.5, 1.4),
        lantern(8.4, 14.6),
        lantern(18.2, 18.6),
        skull(2.9, 5.3),
        skull(10.6, 5.1),
        skull(15.9, 4.4),
        skull(5.2, 11.7),
        skull(12.7, 12.4),
        skull(17.1, 17.3),
        chains(6.4, 3.2),
        chains(14.8, 10.6),
    ]
}

/*──────────────────────────────── Tests ───────────────────────────────*/
