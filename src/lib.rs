pub mod app;
pub mod cart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod sorting;
pub mod suggest;
pub mod validation;
pub mod widgets;
