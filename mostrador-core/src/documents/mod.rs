//! Document drafting
//!
//! The draft editor accepts discrete edit events from the UI and returns a
//! consistent snapshot after every one: line totals are committed at item
//! mutation time, document totals are re-aggregated synchronously, and
//! validation errors never partially apply.

mod draft;
mod edits;
mod import;
mod save;
pub mod validate;

pub use draft::*;
pub use edits::*;
pub use import::*;
pub use save::*;
