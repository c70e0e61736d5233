pub mod handler;
pub mod mock;
pub mod prompt;
pub mod summarizer;
pub mod vector_store;
