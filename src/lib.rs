// Library surface for the session engine; the terminal UI lives in the binary.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod controller;
pub mod cue;
pub mod error;
pub mod logging;
pub mod plan;
pub mod render;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod util;
