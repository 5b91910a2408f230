pub mod chunker;
pub mod config;
pub mod cursor;
pub mod error;
pub mod features;
pub mod reader;
pub mod tokenizer;

pub use config::ReaderSettings;
pub use cursor::Cursor;
pub use error::*;
pub use features::Features;
pub use reader::Reader;
