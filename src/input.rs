// src/input.rs

use winit::{event::WindowEvent, window::Window};

use edge_split_sketch::{peak_length_from_mouse, SketchConfig};

/// Tracks the cursor so each frame can derive its peak length from it.
#[derive(Debug, Default)]
pub struct PointerState {
    mouse_y: Option<f64>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records cursor motion. Never consumes the event.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if let WindowEvent::CursorMoved { position, .. } = event {
            let logical = position.to_logical::<f64>(window.scale_factor());
            self.set_mouse_y(logical.y);
        }
        false
    }

    pub fn set_mouse_y(&mut self, y: f64) {
        self.mouse_y = Some(y);
    }

    /// Peak length for the current frame. Falls back to the configured length until the
    /// cursor has moved over the window.
    pub fn peak_length(&self, config: &SketchConfig) -> f64 {
        match self.mouse_y {
            Some(y) => peak_length_from_mouse(config, y),
            None => config.peak_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_configured_length_before_motion() {
        let config = SketchConfig::default();
        assert_eq!(PointerState::new().peak_length(&config), config.peak_length);
    }

    #[test]
    fn follows_last_cursor_position() {
        let config = SketchConfig::default();
        let mut pointer = PointerState::new();
        pointer.set_mouse_y(300.0);
        assert_eq!(pointer.peak_length(&config), 50.0);
        pointer.set_mouse_y(0.0);
        assert_eq!(pointer.peak_length(&config), 0.0);
    }
}
