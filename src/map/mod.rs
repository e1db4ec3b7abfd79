pub mod geometry;
mod projection;
mod renderer;
mod spatial;

pub use projection::Viewport;
pub use renderer::{HazardLayer, HazardLine, LineString};
pub use spatial::{fast_distance_km, ProximityIndex};
