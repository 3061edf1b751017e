use glam::Vec2;
use hecs::World;

use super::{
    components::{Facing, InputCmd, Position},
    tic::DT,
};
use crate::world::{Grid, math::Vec2Ext};

pub const MOVE_SPEED: f32 = 5.0; // grid units / second
pub const TURN_RATE: f32 = 3.0; // rad / second

/// Move by `delta`, one axis at a time, refusing any step that would end
/// outside walkable floor. Lets the player slide along walls.
pub fn slide_move(grid: &Grid, pos: Vec2, delta: Vec2) -> Vec2 {
    let mut out = pos;
    let try_x = Vec2::new(out.x + delta.x, out.y);
    if grid.is_walkable(try_x) {
        out = try_x;
    }
    let try_y = Vec2::new(out.x, out.y + delta.y);
    if grid.is_walkable(try_y) {
        out = try_y;
    }
    out
}

/// Apply one tic of `cmd` to `player`: turn first, then walk.
pub fn player_input(world: &mut World, player: hecs::Entity, grid: &Grid, cmd: InputCmd) {
    let Ok((pos, facing)) = world.query_one_mut::<(&mut Position, &mut Facing)>(player) else {
        return;
    };

    if cmd.turn != 0.0 {
        facing.0 = facing.0.rotated(cmd.turn * TURN_RATE * DT);
    }
    if cmd.forward != 0.0 {
        let step = facing.0 * (cmd.forward.clamp(-1.0, 1.0) * MOVE_SPEED * DT);
        pos.0 = slide_move(grid, pos.0, step);
    }
}
