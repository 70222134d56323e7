//! File-backed article library and the fixed catalog of timeline steps and resources.

pub mod catalog;
mod frontmatter;
pub mod posts;

pub use catalog::{resource_by_slug, resource_items, timeline_step_by_slug, timeline_steps};
pub use catalog::{ResourceItem, TimelineStep};
pub use posts::{ContentError, Post, PostLibrary, PostSummary};
