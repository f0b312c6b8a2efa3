pub mod answer;
pub mod grading;
pub mod loaders;
pub mod pending_file;
pub mod period;
pub mod result;

pub use answer::AnswerMark;
pub use grading::{GradingConfig, GradingResponse, ImportResponse};
pub use loaders::{load_folder, load_paths, load_pending_file};
pub use pending_file::{PendingFile, PDF_MIME};
pub use period::period_label;
pub use result::{FailedSheet, ProcessedSheet, ProcessingResult, NOT_AVAILABLE};
