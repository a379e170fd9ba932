// src/cli.rs

use clap::Parser;

use edge_split_sketch::geometry::{Point, Triangle};
use edge_split_sketch::{Result, SketchConfig, SketchError};

/// Recursively split the edges of a triangle and draw the result.
///
/// Move the mouse vertically to change the peak length.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Recursion depth applied to each edge of the seed triangle
    #[arg(long, allow_negative_numbers = true)]
    pub recursions: Option<i32>,

    /// Peak length used until the mouse first moves
    #[arg(long)]
    pub peak_length: Option<f64>,

    /// Upper bound of a random extra offset added to every peak (0 disables it)
    #[arg(long)]
    pub variance: Option<f64>,

    /// Seed triangle as "bx,by,cx,cy,ax,ay" (two base points, then the peak)
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<String>,

    /// Window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Target frames per second
    #[arg(long)]
    pub frame_rate: Option<f64>,

    /// The mouse's y position is divided by this to get the peak length
    #[arg(long)]
    pub mouse_divisor: Option<f64>,
}

impl Cli {
    /// Applies the given options over the default sketch and validates the result.
    pub fn into_config(self) -> Result<SketchConfig> {
        let mut config = SketchConfig::default();

        if let Some(recursions) = self.recursions {
            config.recursions = recursions;
        }
        if let Some(peak_length) = self.peak_length {
            config.peak_length = peak_length;
        }
        if let Some(variance) = self.variance {
            config.variance = variance;
        }
        if let Some(seed) = self.seed.as_deref() {
            config.seed_triangle = parse_seed(seed)?;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        if let Some(mouse_divisor) = self.mouse_divisor {
            config.mouse_divisor = mouse_divisor;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_seed(raw: &str) -> Result<Triangle> {
    let coords = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| SketchError::InvalidConfig(format!("seed '{}': {}", raw, e)))?;

    match coords.as_slice() {
        &[bx, by, cx, cy, ax, ay] => Ok(Triangle::new(
            Point::new(bx, by),
            Point::new(cx, cy),
            Point::new(ax, ay),
        )),
        _ => Err(SketchError::InvalidConfig(format!(
            "seed '{}' must have 6 coordinates, got {}",
            raw,
            coords.len()
        ))),
    }
}
