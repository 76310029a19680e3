use eframe::egui;

use crate::data::model::WageTables;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WageScopeApp {
    pub state: AppState,
}

impl WageScopeApp {
    pub fn new(tables: WageTables) -> Self {
        Self {
            state: AppState::new(tables),
        }
    }
}

impl eframe::App for WageScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the four chart sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::heatmap_section(ui, &mut self.state);
                    ui.separator();
                    panels::trend_section(ui, &mut self.state);
                    ui.separator();
                    panels::bubble_section(ui, &mut self.state);
                    ui.separator();
                    panels::category_section(ui, &mut self.state);
                });
        });
    }
}
