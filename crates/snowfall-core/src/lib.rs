pub mod config;
pub mod constants;
pub mod error;
pub mod intensity;
pub mod observer;
pub mod particle;
pub mod population;
pub mod render_loop;
pub mod state;

pub use config::*;
pub use constants::*;
pub use error::SnowfallError;
pub use intensity::*;
pub use observer::*;
pub use particle::*;
pub use population::*;
pub use render_loop::*;
pub use state::*;
