//! Error types for the sketch viewer.
//!
//! The geometry core has no failure paths; everything here comes from startup
//! configuration or the window/GPU host.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SketchError {
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// The event loop could not be created or stopped with an error.
    EventLoop(String),
    /// The window could not be created.
    Window(String),
    /// The rendering surface could not be created or configured.
    Surface(String),
    /// No graphics adapter is compatible with the surface.
    Adapter,
    /// The graphics device request failed.
    Device(String),
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SketchError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
            SketchError::Window(msg) => write!(f, "Window error: {}", msg),
            SketchError::Surface(msg) => write!(f, "Surface error: {}", msg),
            SketchError::Adapter => write!(f, "No compatible graphics adapter found"),
            SketchError::Device(msg) => write!(f, "Device error: {}", msg),
        }
    }
}

impl std::error::Error for SketchError {}

impl From<winit::error::EventLoopError> for SketchError {
    fn from(err: winit::error::EventLoopError) -> Self {
        SketchError::EventLoop(err.to_string())
    }
}

impl From<winit::error::OsError> for SketchError {
    fn from(err: winit::error::OsError) -> Self {
        SketchError::Window(err.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for SketchError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        SketchError::Surface(err.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for SketchError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        SketchError::Device(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, SketchError>;
