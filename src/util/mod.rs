//! Small shared utilities

pub mod photo;

pub use photo::{load_data_uri, PhotoError, PhotoSlot};
