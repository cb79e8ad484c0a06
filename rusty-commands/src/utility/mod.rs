pub mod confirm;
pub mod help;
pub mod ping;
