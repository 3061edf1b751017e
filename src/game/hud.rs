use super::board::{BOARD_SIZE, Board, Mark};
use crate::{
    assets::{mark_color, mark_texture},
    renderer::{Renderer, RendererExt, Rgba},
    world::TextureBank,
};

const FILL: Rgba = 0xDC_0A0A0A;
const FRAME: Rgba = 0xFF_78788C;
const FRAME_W: i32 = 2;
const PAD: i32 = 16;

const LEFT_W: i32 = 320;
const RIGHT_W: i32 = 300;

const PIP: i32 = 12;
const PIP_GAP: i32 = 6;
const MAX_PIPS: u32 = 20;

/// What the bottom panel shows.
#[derive(Clone, Copy, Debug)]
pub struct HudView<'a> {
    pub current: Mark,
    pub scores: [(Mark, u32); 2],
    pub board: &'a Board,
}

/// Bottom panel occupying rows `[y0, y0 + h)` of a `w` wide frame:
/// current player's mark, score pips and a miniature board.
pub fn draw_hud<R: Renderer>(r: &mut R, bank: &TextureBank, y0: i32, w: i32, h: i32, view: &HudView) {
    r.fill_rect(0, y0, w, h, FILL);

    let centre_w = (w - LEFT_W - RIGHT_W).max(0);
    r.stroke_rect(0, y0, LEFT_W, h, FRAME_W, FRAME);
    r.stroke_rect(LEFT_W, y0, centre_w, h, FRAME_W, FRAME);
    r.stroke_rect(LEFT_W + centre_w, y0, RIGHT_W, h, FRAME_W, FRAME);

    /* left: whose turn */
    let icon = h - 2 * PAD;
    if let Ok(t) = bank.texture(mark_texture(view.current)) {
        r.draw_texture(t, PAD, y0 + PAD, icon);
    }

    /* centre: one row of pips per player */
    let row_h = (h - 2 * PAD) / 2;
    for (row, &(mark, score)) in view.scores.iter().enumerate() {
        let y = y0 + PAD + row as i32 * row_h;
        let x = LEFT_W + PAD;
        if let Ok(t) = bank.texture(mark_texture(mark)) {
            r.draw_texture(t, x, y, row_h - PIP_GAP);
        }
        for i in 0..score.min(MAX_PIPS) as i32 {
            let px = x + row_h + PAD + i * (PIP + PIP_GAP);
            r.fill_rect(px, y + (row_h - PIP) / 2, PIP, PIP, mark_color(mark));
        }
    }

    /* right: miniature board */
    let cell = (h - 2 * PAD) / BOARD_SIZE as i32;
    let bx = LEFT_W + centre_w + (RIGHT_W - cell * BOARD_SIZE as i32) / 2;
    let by = y0 + PAD;
    for i in 0..BOARD_SIZE as i32 {
        for j in 0..BOARD_SIZE as i32 {
            r.stroke_rect(bx + i * cell, by + j * cell, cell, cell, 1, FRAME);
        }
    }
    for (x, y, mark) in view.board.marks() {
        if let Ok(t) = bank.texture(mark_texture(mark)) {
            r.draw_texture(t, bx + x as i32 * cell, by + y as i32 * cell, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{TEXTURE_SIZE, TextureManifest, load_textures};
    use crate::renderer::recorder::{Call, Recorder};

    fn pips(rec: &Recorder, mark: Mark) -> usize {
        rec.calls
            .iter()
            .filter(|c| {
                matches!(c, Call::Rect { w: PIP, h: PIP, color, .. } if *color == mark_color(mark))
            })
            .count()
    }

    #[test]
    fn pips_follow_scores_and_board_marks_drawn() {
        let bank = load_textures(&TextureManifest::standard(), TEXTURE_SIZE).unwrap();
        let mut board = Board::new();
        board.place(0, 0, Mark::X).unwrap();
        board.place(2, 2, Mark::O).unwrap();

        let mut rec = Recorder::default();
        let view = HudView {
            current: Mark::O,
            scores: [(Mark::X, 3), (Mark::O, 1)],
            board: &board,
        };
        draw_hud(&mut rec, &bank, 580, 1280, 140, &view);

        assert_eq!(pips(&rec, Mark::X), 3);
        assert_eq!(pips(&rec, Mark::O), 1);
        // every icon goes through masked columns
        assert!(!rec.masked_columns().is_empty());
        assert!(rec.masked_columns().iter().all(|c| c.y_top >= 580.0));
    }

    #[test]
    fn pips_are_capped() {
        let bank = TextureBank::new();
        let board = Board::new();
        let mut rec = Recorder::default();
        let view = HudView {
            current: Mark::X,
            scores: [(Mark::X, 500), (Mark::O, 0)],
            board: &board,
        };
        draw_hud(&mut rec, &bank, 0, 1280, 140, &view);
        assert_eq!(pips(&rec, Mark::X), MAX_PIPS as usize);
        // no textures: nothing masked, nothing panics
        assert!(rec.masked_columns().is_empty());
    }
}
