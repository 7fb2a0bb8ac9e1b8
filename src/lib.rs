// Quarterlog Library
// Slot-based personal time tracking: models, stores and engines.
// Rendering lives in the embedding application; this crate is the core.

pub mod models;
pub mod services;
