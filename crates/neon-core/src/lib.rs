pub mod animators;
pub mod backdrop;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod glitch;
pub mod input;
pub mod loading;
pub mod parallax;
pub mod pipeline;
pub mod scene;
pub mod scheduler;
pub mod sound;
pub mod timers;
pub mod tween;
pub mod uniforms;

pub use animators::*;
pub use config::*;
pub use constants::*;
pub use input::{InputEvent, InputReactor};
pub use pipeline::*;
pub use scene::*;
pub use scheduler::FrameScheduler;
pub use sound::*;
