pub mod command;
pub mod encode;
pub mod info;
mod progress;
