pub mod pdf_loader;

pub use pdf_loader::{load_folder, load_paths, load_pending_file};
