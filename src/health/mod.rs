pub mod check;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
