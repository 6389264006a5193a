pub mod denylist;
pub mod links;
pub mod scanner;

pub use denylist::Denylist;
pub use links::{as_file_destination, link_destinations};
pub use scanner::{ReferenceScanner, ScanResult, all_files, canonical_dir, markdown_files};
