pub mod config;
pub mod database;
pub mod global;
pub mod http;
pub mod mailer;
pub mod news;
pub mod views;
