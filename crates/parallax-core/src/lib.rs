pub mod coalesce;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod geometry;
pub mod lifecycle;
pub mod position;
pub mod resolver;
pub mod schedule;
pub mod state;

pub use coalesce::*;
pub use config::*;
pub use constants::*;
pub use debounce::*;
pub use geometry::*;
pub use lifecycle::*;
pub use position::*;
pub use resolver::*;
pub use schedule::*;
pub use state::*;
