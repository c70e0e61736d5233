pub mod ai;
pub mod auth;
pub mod document;
pub mod error;
pub mod helpers;
pub mod intake;
pub mod notification;
pub mod processing;
pub mod refinement;
pub mod summary;
pub mod viewer;
