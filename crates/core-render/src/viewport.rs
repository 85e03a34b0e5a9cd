//! Viewport: the visible window into the document.
//!
//! * `rowoff` is the index of the topmost document line on screen.
//! * `coloff` is the leftmost visible *visual* column (after tab expansion).
//! * `rows` counts text rows only; the status row is managed by the caller.
//!
//! After `scroll` the cursor is inside the window:
//! `rowoff <= cy < rowoff + rows` and `coloff <= rx < coloff + cols`
//! (whenever `rows`/`cols` are non-zero).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub rowoff: usize,
    pub coloff: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            rows,
            cols,
        }
    }

    /// Update the window size, keeping offsets. The next `scroll` restores the
    /// cursor containment.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if (rows, cols) != (self.rows, self.cols) {
            tracing::debug!(target: "render", rows, cols, "viewport_resize");
        }
        self.rows = rows;
        self.cols = cols;
    }

    /// Adjust offsets so the cursor at document line `cy` and visual column
    /// `rx` is visible.
    pub fn scroll(&mut self, cy: usize, rx: usize) {
        if cy < self.rowoff {
            self.rowoff = cy;
        }
        if self.rows > 0 && cy >= self.rowoff + self.rows {
            self.rowoff = cy + 1 - self.rows;
        }
        if rx < self.coloff {
            self.coloff = rx;
        }
        if self.cols > 0 && rx >= self.coloff + self.cols {
            self.coloff = rx + 1 - self.cols;
        }
    }

    /// Whether the cursor lies inside the window.
    pub fn contains(&self, cy: usize, rx: usize) -> bool {
        (self.rowoff..self.rowoff + self.rows).contains(&cy)
            && (self.coloff..self.coloff + self.cols).contains(&rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scrolls_down_to_keep_cursor_on_last_row() {
        let mut vp = Viewport::new(5, 80);
        vp.scroll(7, 0);
        assert_eq!(vp.rowoff, 3);
        vp.scroll(4, 0);
        assert_eq!(vp.rowoff, 3, "cursor already visible");
        vp.scroll(1, 0);
        assert_eq!(vp.rowoff, 1);
    }

    #[test]
    fn horizontal_scroll_tracks_visual_column() {
        let mut vp = Viewport::new(5, 10);
        vp.scroll(0, 10);
        assert_eq!(vp.coloff, 1);
        vp.scroll(0, 25);
        assert_eq!(vp.coloff, 16);
        vp.scroll(0, 3);
        assert_eq!(vp.coloff, 3);
    }

    #[test]
    fn zero_sized_window_does_not_panic() {
        let mut vp = Viewport::new(0, 0);
        vp.scroll(12, 40);
        assert_eq!(vp.rowoff, 0);
        assert_eq!(vp.coloff, 0);
    }

    proptest! {
        #[test]
        fn scroll_always_contains_cursor(
            rows in 1usize..60,
            cols in 1usize..200,
            start_row in 0usize..500,
            start_col in 0usize..500,
            cy in 0usize..500,
            rx in 0usize..500,
        ) {
            let mut vp = Viewport { rowoff: start_row, coloff: start_col, rows, cols };
            vp.scroll(cy, rx);
            prop_assert!(vp.contains(cy, rx));
        }
    }
}
