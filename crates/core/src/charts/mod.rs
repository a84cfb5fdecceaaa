//! Chart widgets: geometry, animation and (for the line chart) touch
//! tracking composed behind a small prop-style API. Rendering produces plain
//! frame descriptions; the host draws them.

pub mod bar;
pub mod line;
pub mod pie;
