pub mod cors;
pub mod database;
