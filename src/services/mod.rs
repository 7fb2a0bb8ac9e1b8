// Service module exports

pub mod category;
pub mod commit;
pub mod export;
pub mod occupancy;
pub mod selection;
pub mod settings;
pub mod storage;
pub mod store;
pub mod summary;
