pub mod config;
pub mod email_check;
pub mod i18n;
pub mod server;
