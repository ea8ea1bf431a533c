// overlay.rs - User-visible startup status, drawn over every frame
use egui::{Color32, RichText};

/// The three mutually exclusive overlay states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    Loading(String),
    Error(String),
}

/// Status overlay with a one-way state machine:
/// hidden -> loading (repeatable, message replaced), loading -> hidden on
/// success, loading -> error on failure. Error is terminal.
#[derive(Debug, Default)]
pub struct StatusOverlay {
    state: OverlayState,
}

impl StatusOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn set_loading(&mut self, message: impl Into<String>) {
        if matches!(self.state, OverlayState::Error(_)) {
            return;
        }
        self.state = OverlayState::Loading(message.into());
    }

    pub fn hide(&mut self) {
        if matches!(self.state, OverlayState::Error(_)) {
            return;
        }
        self.state = OverlayState::Hidden;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = OverlayState::Error(message.into());
    }

    pub fn ui(&self, ctx: &egui::Context) {
        let (text, color) = match &self.state {
            OverlayState::Hidden => return,
            OverlayState::Loading(message) => (message.as_str(), Color32::WHITE),
            OverlayState::Error(message) => (message.as_str(), Color32::from_rgb(255, 90, 90)),
        };

        egui::Window::new("status")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.label(RichText::new(text).size(22.0).color(color));
            });
    }
}
