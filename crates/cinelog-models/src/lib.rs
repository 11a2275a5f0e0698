pub mod review;
pub mod saved;

pub use review::{Review, ReviewDraft, FALLBACK_AUTHOR};
pub use saved::{MovieRef, SavedMovie};
