use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – run set list
// ---------------------------------------------------------------------------

/// Render the left panel: display toggles and one checkbox per run set.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Run sets");
    ui.separator();

    if state.summaries.is_empty() {
        ui.label("No runs loaded.");
        return;
    }

    ui.checkbox(&mut state.show_band, "±2 stderr band");
    ui.checkbox(&mut state.cumulative, "Cumulative");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Collect first so the loop can mutate `state`.
    let entries: Vec<(String, usize, usize)> = state
        .summaries
        .iter()
        .map(|s| (s.name.clone(), s.runs, s.len()))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (name, runs, steps) in &entries {
                let color = state.colors.color_for(name);
                let mut checked = state.is_visible(name);
                let text = RichText::new(format!("{name}  ({runs} runs, {steps} steps)")).color(color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open directory…").clicked() {
                open_directory_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dir) = &state.directory {
            ui.label(format!(
                "{}: {} run sets, {} visible",
                dir.display(),
                state.summaries.len(),
                state.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_directory_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Open run directory");
    if let Some(dir) = &state.directory {
        dialog = dialog.set_directory(dir);
    }

    if let Some(dir) = dialog.pick_folder() {
        state.open_directory(&dir);
    }
}
