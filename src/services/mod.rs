//! Services module
//!
//! Business logic services that coordinate between handlers and the
//! repository, and announce refreshes after successful mutations.

pub mod notes;
pub mod tags;

pub use notes::NotesService;
pub use tags::TagsService;
