pub mod format;
pub mod models;
pub mod page;
