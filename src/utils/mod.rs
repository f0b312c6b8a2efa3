pub mod counter;
pub mod format;
pub mod logging;

pub use counter::{AnimatedCounter, StatsCounters};
pub use format::{format_file_size, truncate_text};
