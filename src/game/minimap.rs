use glam::Vec2;

use super::board::Mark;
use crate::{
    assets::mark_color,
    renderer::{Renderer, RendererExt, Rgba},
    world::Grid,
};

pub const CELL: i32 = 8;
pub const PADDING: i32 = 10;
pub const BORDER: i32 = 2;
const ARROW_LEN: f32 = 20.0;
const PLAYER_SIZE: i32 = 4;

const BORDER_COLOR: Rgba = 0x64_000000;
const WALL_COLOR: Rgba = 0xC8_C8C8C8;

/// One player as the minimap sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub mark: Mark,
    pub pos: Vec2,
    pub facing: Vec2,
}

/// Top-left pixel of the map area for a `screen_w` wide frame.
pub fn origin(grid: &Grid, screen_w: usize) -> (i32, i32) {
    let map_w = grid.width() as i32 * CELL;
    (screen_w as i32 - map_w - PADDING - BORDER, PADDING)
}

/// Walls, players and their facing, in the top-right corner.
pub fn draw_minimap<R: Renderer>(r: &mut R, grid: &Grid, players: &[Marker], screen_w: usize) {
    let (ox, oy) = origin(grid, screen_w);
    let map_w = grid.width() as i32 * CELL;
    let map_h = grid.height() as i32 * CELL;

    r.fill_rect(
        ox - BORDER,
        oy - BORDER,
        map_w + 2 * BORDER,
        map_h + 2 * BORDER,
        BORDER_COLOR,
    );
    for (x, y, _) in grid.walls() {
        r.fill_rect(ox + x as i32 * CELL, oy + y as i32 * CELL, CELL, CELL, WALL_COLOR);
    }

    for p in players {
        let col = mark_color(p.mark);
        let px = ox as f32 + p.pos.x * CELL as f32;
        let py = oy as f32 + p.pos.y * CELL as f32;
        r.fill_square_centered(px as i32, py as i32, PLAYER_SIZE, col);

        let tip = Vec2::new(px, py) + p.facing * ARROW_LEN;
        r.draw_line(px as i32, py as i32, tip.x as i32, tip.y as i32, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::{Call, Recorder};

    #[test]
    fn walls_and_players_drawn() {
        let grid = Grid::parse("11\n1.\n").unwrap();
        let mut rec = Recorder::default();
        let players = [Marker {
            mark: Mark::O,
            pos: Vec2::new(1.5, 1.5),
            facing: Vec2::X,
        }];
        draw_minimap(&mut rec, &grid, &players, 200);

        let (ox, oy) = origin(&grid, 200);
        assert_eq!((ox, oy), (200 - 16 - PADDING - BORDER, PADDING));

        let wall_rects = rec
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Rect { color: WALL_COLOR, .. }))
            .count();
        assert_eq!(wall_rects, 3);

        // facing arrow starts at the player and points along +X
        let line = rec.calls.iter().find_map(|c| match c {
            Call::Line { from, to, color } => Some((*from, *to, *color)),
            _ => None,
        });
        let (from, to, color) = line.unwrap();
        assert_eq!(color, mark_color(Mark::O));
        assert_eq!(from, (ox + 12, oy + 12));
        assert_eq!(to, (ox + 32, oy + 12));
    }
}
