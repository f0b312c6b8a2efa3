pub mod file_state;
pub mod sheet_ctx;
pub mod sheet_flow;
pub mod view;

pub use file_state::{BatchStats, FileState, TrackedFile};
pub use sheet_ctx::SheetCtx;
pub use sheet_flow::{SheetFlow, GENERIC_PROCESSING_ERROR};
pub use view::{render_card, render_row, FileRowView, ResultCardView, StatusTag};
