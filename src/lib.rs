pub mod app;
pub mod config;
pub mod db;
pub mod domains;
pub mod error;
pub mod models;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::{create_app, root_handler};
pub use utils::error::AppError;
