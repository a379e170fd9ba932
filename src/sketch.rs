// src/sketch.rs

//! Scene assembly: the seed triangle, the per-frame edge splitting, and the hue cycle
//! used to color the result.

use std::time::Duration;

use rand::Rng;

use crate::error::{Result, SketchError};
use crate::geometry::{Point, Triangle};
use crate::subdivision::{split_with_variance, triangle_count};

/// Hue values run over `0..HUE_RANGE` degrees.
pub const HUE_RANGE: f32 = 360.0;
/// Saturation and brightness run over `0..SB_RANGE`.
pub const SB_RANGE: f32 = 100.0;
/// Alpha runs over `0..ALPHA_RANGE`.
pub const ALPHA_RANGE: f32 = 255.0;

pub const MAX_RECURSIONS: i32 = 14;
/// Largest accepted peak length and variance, in sketch units.
pub const MAX_PEAK_LENGTH: f64 = 100_000.0;
/// Slowest accepted frame pacing, in frames per second.
pub const MIN_FRAME_RATE: f64 = 1.0;

/// Color with every channel normalized to `0..=1`. Hue is a fraction of a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsba {
    pub fn to_array(self) -> [f32; 4] {
        [self.hue, self.saturation, self.brightness, self.alpha]
    }
}

/// Saturation/brightness/alpha of a fill or stroke, in sketch units
/// (`SB_RANGE` for saturation and brightness, `ALPHA_RANGE` for alpha).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl ShapeStyle {
    pub fn with_hue(&self, hue: u32) -> Hsba {
        Hsba {
            hue: hue as f32 / HUE_RANGE,
            saturation: self.saturation / SB_RANGE,
            brightness: self.brightness / SB_RANGE,
            alpha: self.alpha / ALPHA_RANGE,
        }
    }
}

/// Process-wide sketch parameters, built once at startup and shared read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct SketchConfig {
    pub width: u32,
    pub height: u32,
    pub seed_triangle: Triangle,
    /// Max depth handed to the splitter for every seed edge.
    pub recursions: i32,
    /// Peak length used until the cursor first moves.
    pub peak_length: f64,
    /// Upper bound of the random extra peak offset. 0 disables it.
    pub variance: f64,
    /// Cursor y (logical pixels) is divided by this to get the peak length.
    pub mouse_divisor: f64,
    pub hue_cycle: u32,
    pub fill: ShapeStyle,
    pub stroke: ShapeStyle,
    /// Gray level of the background, `0..=1`.
    pub background: f32,
    pub frame_rate: f64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            seed_triangle: Triangle::new(
                Point::new(-160, 100),
                Point::new(160, 100),
                Point::new(0, -170),
            ),
            recursions: 5,
            peak_length: 100.0,
            variance: 0.0,
            mouse_divisor: 6.0,
            hue_cycle: 182,
            fill: ShapeStyle { saturation: 80.0, brightness: 100.0, alpha: 70.0 },
            stroke: ShapeStyle { saturation: 80.0, brightness: 80.0, alpha: ALPHA_RANGE },
            // gray levels share the hue channel's range
            background: 20.0 / HUE_RANGE,
            frame_rate: 144.0,
        }
    }
}

impl SketchConfig {
    /// The three seed edges in drawing order: left, right, bottom.
    pub fn seed_edges(&self) -> [(Point, Point); 3] {
        let t = &self.seed_triangle;
        [(t.base_b, t.peak_a), (t.peak_a, t.base_c), (t.base_c, t.base_b)]
    }

    /// Triangles produced per frame for this configuration.
    pub fn triangles_per_frame(&self) -> usize {
        triangle_count(self.recursions).saturating_mul(3)
    }

    /// Time between frames at the configured frame rate.
    pub fn frame_interval(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(1.0 / self.frame_rate).map_err(|e| {
            SketchError::InvalidConfig(format!("frame rate {}: {}", self.frame_rate, e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.recursions > MAX_RECURSIONS {
            return Err(SketchError::InvalidConfig(format!(
                "recursions must be at most {}, got {}",
                MAX_RECURSIONS, self.recursions
            )));
        }
        if !(0.0..=MAX_PEAK_LENGTH).contains(&self.peak_length) {
            return Err(SketchError::InvalidConfig(format!(
                "peak length must be between 0 and {}, got {}",
                MAX_PEAK_LENGTH, self.peak_length
            )));
        }
        if !(0.0..=MAX_PEAK_LENGTH).contains(&self.variance) {
            return Err(SketchError::InvalidConfig(format!(
                "variance must be between 0 and {}, got {}",
                MAX_PEAK_LENGTH, self.variance
            )));
        }
        if !self.mouse_divisor.is_finite() || self.mouse_divisor == 0.0 {
            return Err(SketchError::InvalidConfig(format!(
                "mouse divisor must be a non-zero number, got {}",
                self.mouse_divisor
            )));
        }
        if !self.frame_rate.is_finite() || self.frame_rate < MIN_FRAME_RATE {
            return Err(SketchError::InvalidConfig(format!(
                "frame rate must be at least {}, got {}",
                MIN_FRAME_RATE, self.frame_rate
            )));
        }
        self.frame_interval()?;
        if self.hue_cycle == 0 {
            return Err(SketchError::InvalidConfig("hue cycle must be non-zero".to_string()));
        }
        for (a, b) in self.seed_edges() {
            if a == b {
                return Err(SketchError::InvalidConfig(format!(
                    "seed triangle has a zero-length edge at {:?}",
                    a.get()
                )));
            }
        }
        Ok(())
    }
}

/// Maps the cursor's vertical position to a peak length.
pub fn peak_length_from_mouse(config: &SketchConfig, mouse_y: f64) -> f64 {
    mouse_y / config.mouse_divisor
}

/// Splits every seed edge with the same parameters and concatenates the results
/// in edge order.
pub fn assemble_frame(config: &SketchConfig, peak_length: f64) -> Vec<Triangle> {
    assemble_frame_with_rng(config, peak_length, &mut rand::thread_rng())
}

/// [`assemble_frame`] with an explicit random source for the variance offset.
pub fn assemble_frame_with_rng<R: Rng>(
    config: &SketchConfig,
    peak_length: f64,
    rng: &mut R,
) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(config.triangles_per_frame());
    for (a, b) in config.seed_edges() {
        triangles.extend(split_with_variance(
            a,
            b,
            peak_length,
            config.variance,
            0,
            config.recursions,
            rng,
        ));
    }
    triangles
}

/// Endless hue sequence `0, 1, .., cycle - 1, 0, 1, ..`.
#[derive(Clone, Debug)]
pub struct HueCycle {
    next: u32,
    cycle: u32,
}

impl HueCycle {
    pub fn new(cycle: u32) -> Self {
        Self { next: 0, cycle }
    }
}

impl Iterator for HueCycle {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let hue = self.next;
        self.next += 1;
        if self.next >= self.cycle {
            self.next = 0;
        }
        Some(hue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyledTriangle {
    pub triangle: Triangle,
    pub fill: Hsba,
    pub stroke: Hsba,
}

/// Pairs each triangle with its fill and stroke color, advancing the hue per triangle.
pub fn style_frame(config: &SketchConfig, triangles: &[Triangle]) -> Vec<StyledTriangle> {
    triangles
        .iter()
        .zip(HueCycle::new(config.hue_cycle))
        .map(|(triangle, hue)| StyledTriangle {
            triangle: *triangle,
            fill: config.fill.with_hue(hue),
            stroke: config.stroke.with_hue(hue),
        })
        .collect()
}

/// Everything the renderer needs for one frame.
pub fn build_frame(config: &SketchConfig, peak_length: f64) -> Vec<StyledTriangle> {
    let triangles = assemble_frame(config, peak_length);
    log::debug!(
        "Assembled {} triangles (peak length {:.2}, recursions {})",
        triangles.len(),
        peak_length,
        config.recursions
    );
    style_frame(config, &triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subdivision::split;

    #[test]
    fn default_config_is_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.triangles_per_frame(), 3 * 63);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut config = SketchConfig::default();
        config.recursions = MAX_RECURSIONS + 1;
        assert!(matches!(config.validate(), Err(SketchError::InvalidConfig(_))));

        let mut config = SketchConfig::default();
        config.mouse_divisor = 0.0;
        assert!(config.validate().is_err());

        let mut config = SketchConfig::default();
        config.peak_length = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SketchConfig::default();
        config.peak_length = 1.0e10;
        assert!(config.validate().is_err());

        let mut config = SketchConfig::default();
        config.variance = MAX_PEAK_LENGTH * 2.0;
        assert!(config.validate().is_err());

        let mut config = SketchConfig::default();
        config.frame_rate = 1.0e-300;
        assert!(matches!(config.validate(), Err(SketchError::InvalidConfig(_))));

        let mut config = SketchConfig::default();
        config.frame_rate = 0.5;
        assert!(config.validate().is_err());

        let mut config = SketchConfig::default();
        config.seed_triangle.peak_a = config.seed_triangle.base_b;
        assert!(config.validate().is_err());
    }

    #[test]
    fn frame_interval_follows_frame_rate() {
        let mut config = SketchConfig::default();
        config.frame_rate = 50.0;
        let interval = config.frame_interval().unwrap();
        assert!((interval.as_secs_f64() - 0.02).abs() < 1e-9);

        config.frame_rate = 1.0e-300;
        assert!(matches!(config.frame_interval(), Err(SketchError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_peak_length_still_assembles() {
        let config = SketchConfig::default();
        let frame = assemble_frame(&config, 1.0e10);
        assert_eq!(frame.len(), config.triangles_per_frame());
    }

    #[test]
    fn negative_recursions_are_accepted() {
        let mut config = SketchConfig::default();
        config.recursions = -2;
        assert!(config.validate().is_ok());
        assert_eq!(assemble_frame(&config, 10.0).len(), 3);
    }

    #[test]
    fn mouse_maps_to_peak_length() {
        let config = SketchConfig::default();
        assert_eq!(peak_length_from_mouse(&config, 0.0), 0.0);
        assert_eq!(peak_length_from_mouse(&config, 600.0), 100.0);
    }

    #[test]
    fn frame_concatenates_edges_in_order() {
        let config = SketchConfig::default();
        let frame = assemble_frame(&config, 30.0);
        let per_edge = triangle_count(config.recursions);
        assert_eq!(frame.len(), 3 * per_edge);

        for (i, (a, b)) in config.seed_edges().into_iter().enumerate() {
            let expected = split(a, b, 30.0, 0, config.recursions);
            assert_eq!(&frame[i * per_edge..(i + 1) * per_edge], expected.as_slice());
        }
    }

    #[test]
    fn seed_edges_walk_the_triangle() {
        let config = SketchConfig::default();
        let [left, right, bottom] = config.seed_edges();
        assert_eq!(left, (Point::new(-160, 100), Point::new(0, -170)));
        assert_eq!(right, (Point::new(0, -170), Point::new(160, 100)));
        assert_eq!(bottom, (Point::new(160, 100), Point::new(-160, 100)));
    }

    #[test]
    fn hue_cycle_wraps_after_181() {
        let hues: Vec<u32> = HueCycle::new(182).take(185).collect();
        assert_eq!(hues[0], 0);
        assert_eq!(hues[181], 181);
        assert_eq!(&hues[182..], &[0, 1, 2]);
    }

    #[test]
    fn style_frame_uses_sketch_palette() {
        let config = SketchConfig::default();
        let triangles = assemble_frame(&config, 20.0);
        let styled = style_frame(&config, &triangles);
        assert_eq!(styled.len(), triangles.len());

        let first = styled[0];
        assert_eq!(first.fill, Hsba { hue: 0.0, saturation: 0.8, brightness: 1.0, alpha: 70.0 / 255.0 });
        assert_eq!(first.stroke, Hsba { hue: 0.0, saturation: 0.8, brightness: 0.8, alpha: 1.0 });
        assert_eq!(styled[90].fill.hue, 90.0 / HUE_RANGE);
        assert_eq!(styled[182].fill.hue, 0.0);
    }
}
