//! Output module for the book library
//!
//! This module handles:
//! - The `Library` trait for create-once text and page writes
//! - A filesystem implementation and an in-memory one
//! - Regenerating the site index from the rendered pages

mod fs_library;
mod index;
mod memory;
mod traits;

pub use fs_library::FsLibrary;
pub use index::{format_index, rebuild_index, IndexEntry};
pub use memory::MemoryLibrary;
pub use traits::{Library, OutputError, OutputResult, StoredPage};
