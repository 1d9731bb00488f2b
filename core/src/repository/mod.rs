pub mod file;
pub mod marks;
pub mod memory;
pub mod traits;

// Re-export
pub use file::{data_dir, FileKeyValueStore};
pub use marks::{marks_key, MarksRepository, MARKS_KEY};
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
