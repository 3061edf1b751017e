use super::{
    Game, Phase,
    board::Mark,
    hud::{self, HudView},
    minimap::{self, Marker},
};
use crate::{
    config::HUD_HEIGHT,
    engine::{FrameStats, Scene},
    renderer::Renderer,
    sim::{self, Facing, InputCmd, Player, Position},
    world::TextureBank,
};

/// Everything that takes part in the per-tic update and the per-frame draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameObject {
    World,
    Minimap,
    Hud,
    Player(Mark),
}

/// Draw order: 3-D view first, panels on top.
pub const DEFAULT_OBJECTS: [GameObject; 5] = [
    GameObject::World,
    GameObject::Player(Mark::X),
    GameObject::Player(Mark::O),
    GameObject::Minimap,
    GameObject::Hud,
];

impl GameObject {
    pub fn update(self, game: &mut Game, cmd: &InputCmd) {
        match self {
            GameObject::World | GameObject::Minimap | GameObject::Hud => {}
            GameObject::Player(mark) => {
                if !matches!(game.phase, Phase::Playing) || game.current != mark {
                    return;
                }
                if let Some(e) = game.player_entity(mark) {
                    sim::player_input(game.sim.world_mut(), e, &game.grid, *cmd);
                }
            }
        }
    }

    pub fn draw<R: Renderer>(
        self,
        game: &mut Game,
        r: &mut R,
        bank: &TextureBank,
        stats: &mut FrameStats,
    ) {
        match self {
            GameObject::World => {
                if let Some(cam) = game.camera() {
                    let sprites = game.gather_sprites();
                    let scene = Scene {
                        camera: &cam,
                        grid: &game.grid,
                        sprites: &sprites,
                        textures: bank,
                    };
                    *stats = game.raycaster.render(r, &scene);
                }
                game.draw_overlay(r, bank);
            }
            GameObject::Minimap => {
                let world = game.sim.world();
                let markers: Vec<Marker> = world
                    .query::<(&Player, &Position, &Facing)>()
                    .iter()
                    .map(|(_, (p, pos, f))| Marker {
                        mark: p.mark,
                        pos: pos.0,
                        facing: f.0,
                    })
                    .collect();
                minimap::draw_minimap(r, &game.grid, &markers, game.width);
            }
            GameObject::Hud => {
                let view = HudView {
                    current: game.current,
                    scores: Mark::BOTH.map(|m| (m, game.score(m))),
                    board: &game.board,
                };
                hud::draw_hud(
                    r,
                    bank,
                    game.view_height() as i32,
                    game.width as i32,
                    HUD_HEIGHT as i32,
                    &view,
                );
            }
            // players are drawn as billboards by `World`
            GameObject::Player(_) => {}
        }
    }
}
