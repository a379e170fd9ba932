// src/lib.rs

pub mod error;
pub mod geometry;
pub mod sketch;
pub mod subdivision;

pub use error::{Result, SketchError};
pub use geometry::{midpoint, normal, perpendicular_line, Point, Segment, Triangle};
pub use sketch::{assemble_frame, build_frame, peak_length_from_mouse, SketchConfig, StyledTriangle};
pub use subdivision::{split, split_into, split_with_variance, triangle_count};
