//! Test double that records draw calls instead of rasterising them.

use super::{ColumnSpan, Renderer, Rgba};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Column { span: ColumnSpan, first: Rgba, len: usize },
    Rect { x: i32, y: i32, w: i32, h: i32, color: Rgba },
    Line { from: (i32, i32), to: (i32, i32), color: Rgba },
}

#[derive(Default)]
pub(crate) struct Recorder {
    pub calls: Vec<Call>,
    pub frames: usize,
}

impl Recorder {
    /// Only the column calls, in order.
    pub fn columns(&self) -> Vec<ColumnSpan> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Column { span, .. } => Some(*span),
                _ => None,
            })
            .collect()
    }

    /// Column calls whose span is masked (sprite columns).
    pub fn masked_columns(&self) -> Vec<ColumnSpan> {
        self.columns().into_iter().filter(|s| s.masked).collect()
    }

    /// First texel of every masked column, in draw order.
    pub fn masked_texels(&self) -> Vec<Rgba> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Column { span, first, .. } if span.masked => Some(*first),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for Recorder {
    fn begin_frame(&mut self, _w: usize, _h: usize) {
        self.calls.clear();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        self.calls.push(Call::Rect { x, y, w, h, color });
    }

    fn draw_column(&mut self, span: &ColumnSpan, strip: &[Rgba]) {
        self.calls.push(Call::Column {
            span: *span,
            first: strip.first().copied().unwrap_or(0),
            len: strip.len(),
        });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        self.calls.push(Call::Line {
            from: (x0, y0),
            to: (x1, y1),
            color,
        });
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.frames += 1;
        submit(&[], 0, 0);
    }
}
