#[path = "../../src/host_api.rs"]
pub mod host_api;

pub mod game_loop;
pub mod reloader;
