pub mod dto;
pub mod export;
pub mod handler;
