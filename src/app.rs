mod app_events;
mod app_render;
mod app_state;
mod mouse;

pub use app_state::{App, LayoutRegions};



#[cfg(test)]
#[path = "app/app_render_tests.rs"]
mod app_render_tests;
