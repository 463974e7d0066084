pub mod cache;
pub mod depth;
pub mod encoder;
pub mod engine;
pub mod grouper;
pub mod index;
pub mod matcher;
pub mod script;
pub mod segmenter;
pub mod types;
