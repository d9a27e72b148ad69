use super::{UiAction, UiState};
use crate::config;
use crate::simulation::SimState;
use crate::snapshot::RenderSnapshot;

const BAR_FILL: egui::Color32 = egui::Color32::from_rgb(0xB3, 0xB4, 0xB6);

/// Bottom control bar: buttons, speed slider, toggles and the status line.
pub fn draw_toolbar(
    ctx: &egui::Context,
    snapshot: &RenderSnapshot,
    sim: &mut SimState,
    ui_state: &mut UiState,
    actions: &mut Vec<UiAction>,
) {
    let panel = egui::TopBottomPanel::bottom("controls")
        .frame(egui::Frame::side_top_panel(&ctx.style()).fill(BAR_FILL))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let pause_label = if snapshot.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    actions.push(UiAction::TogglePause);
                }
                let full_label = if ui_state.fullscreen {
                    "Exit Fullscreen"
                } else {
                    "Fullscreen"
                };
                if ui.button(full_label).clicked() {
                    actions.push(UiAction::ToggleFullscreen);
                }
                if ui.button("Save Config").clicked() {
                    actions.push(UiAction::SaveConfig);
                }
                if ui.button("Load Config").clicked() {
                    actions.push(UiAction::LoadConfig);
                }

                ui.separator();

                let mut speed = sim.base_speed();
                let slider = egui::Slider::new(
                    &mut speed,
                    config::MIN_BASE_SPEED..=config::MAX_BASE_SPEED,
                )
                .text("Speed");
                if ui.add(slider).changed() {
                    sim.set_base_speed(speed);
                }

                let mut show_trail = sim.show_trail;
                if ui.checkbox(&mut show_trail, "Trail").changed() {
                    sim.set_trail_enabled(show_trail);
                }
                let mut show_scanlines = sim.show_scanlines;
                if ui.checkbox(&mut show_scanlines, "Scanlines").changed() {
                    sim.set_scanlines_enabled(show_scanlines);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&snapshot.status)
                            .monospace()
                            .color(egui::Color32::BLACK),
                    );
                });
            });
        });

    ui_state.toolbar_height = panel.response.rect.height();
}
