pub mod args;
pub mod handlers;
mod print;
