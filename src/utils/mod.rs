//! Shared helpers for paths and text.

pub mod encoding;
pub mod paths;
pub mod text;

pub use encoding::read_file_safe;
pub use paths::{normalize_path, relative_to};
pub use text::{read_text_limited, truncate_middle, SNIP_MARKER};
