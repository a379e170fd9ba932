// src/ui.rs
use egui;

/// Per-frame numbers shown in the overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    pub peak_length: f64,
    pub recursions: i32,
    pub triangle_count: usize,
    pub frame_time_ms: f32,
}

pub fn build_ui(ctx: &egui::Context, stats: &FrameStats) {
    egui::Window::new("Polygon Splitting")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label(format!("Peak length: {:.1}", stats.peak_length));
                ui.label(format!("Recursions: {}", stats.recursions));
                ui.label(format!("Triangles: {}", stats.triangle_count));
                ui.label(format!("Frame time: {:.2} ms", stats.frame_time_ms));
                ui.separator();

                ui.label("🖱 Mouse Y: peak length");
            });
        });
}
