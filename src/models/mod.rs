// Module exports for models

pub mod activity;
pub mod category;
pub mod slot;
