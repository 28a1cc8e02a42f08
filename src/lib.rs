#[macro_use]
extern crate tracing;

pub mod animation;
pub mod capture;
pub mod cli;
pub mod headless;
pub mod input;
pub mod ui;
pub mod utils;
