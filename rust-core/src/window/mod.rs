//! Window functions and overlapping segmentation

pub mod functions;
pub mod segmenter;

pub use functions::{generate_window, WindowType};
pub use segmenter::{segment, Segments, WindowPlan, WindowSpec};
