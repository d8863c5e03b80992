//! Path arithmetic and file classification for the output tree.
//!
//! Both helpers are pure and shared by every pass: the depth calculator turns a file's
//! location into the prefix that reaches the output root, and the classifier decides which
//! pass (if any) owns a file.

mod classify;
mod depth;

pub use classify::{FileClass, classify};
pub use depth::relative_prefix;
