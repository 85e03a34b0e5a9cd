//! Screen rendering: viewport scroll arithmetic, status line composition, the
//! terminal command writer and the full-frame `RenderPipeline`.
//!
//! Typical per-iteration use:
//!
//! ```ignore
//! viewport.resize(text_rows, cols);
//! viewport.scroll(state.cursor.cy, state.cursor_visual_col());
//! pipeline.render(&state, &viewport, &mut stdout)?;
//! ```

pub mod render_engine;
pub mod status;
pub mod viewport;
pub mod writer;

pub use render_engine::RenderPipeline;
pub use viewport::Viewport;
