pub mod constants;
pub mod decode;
pub mod error;
pub mod export;
pub mod format;
pub mod offset;
pub mod reader;
pub mod series;
pub mod timestamp;
