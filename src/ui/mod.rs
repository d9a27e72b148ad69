pub mod toolbar;

use crate::simulation::SimState;
use crate::snapshot::RenderSnapshot;

/// Commands the toolbar hands back to the main loop, for anything that
/// touches the window or the filesystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    TogglePause,
    ToggleFullscreen,
    SaveConfig,
    LoadConfig,
}

pub struct UiState {
    pub fullscreen: bool,
    /// Height of the control bar last frame, reserved below the content.
    pub toolbar_height: f32,
    pub wants_keyboard: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fullscreen: false,
            toolbar_height: 40.0,
            wants_keyboard: false,
        }
    }
}

/// Draw all egui UI panels. Read-only state comes from the frame's snapshot;
/// `sim` is only touched by the live controls.
pub fn draw_ui(
    snapshot: &RenderSnapshot,
    sim: &mut SimState,
    ui_state: &mut UiState,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, snapshot, sim, ui_state, &mut actions);
        ui_state.wants_keyboard = ctx.wants_keyboard_input();
    });

    egui_macroquad::draw();
    actions
}
