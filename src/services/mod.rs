pub mod failure_writer;
pub mod notifier;
pub mod preview;

pub use failure_writer::FailureWriter;
pub use notifier::{Notification, Severity, ToastCenter};
pub use preview::{DocumentOpener, LocalPreview, PreviewOutcome, SystemOpener};
