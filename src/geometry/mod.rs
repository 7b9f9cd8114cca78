mod containment;
mod polygon;

pub use containment::{BAND_FRACTION, RADIUS_FACTOR, is_inside, sample_disk};
pub use polygon::{clip_below, contains_point};
