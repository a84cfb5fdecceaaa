pub mod geometry;
pub mod nav_series;
pub mod projection;
