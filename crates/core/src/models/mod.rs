pub mod config;
pub mod data_point;
pub mod geometry;
pub mod period;
pub mod projection;
pub mod selection;
