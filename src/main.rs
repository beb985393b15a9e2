//! Entry point for the hotel review sentiment dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use sentidash::egui_app::controller::DashboardController;
use sentidash::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use sentidash::{config, logging, model};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Hotel Sentiment Dashboard")
        .with_inner_size([1100.0, 820.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Hotel Sentiment Dashboard",
        native_options,
        Box::new(|_cc| match build_controller() {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

fn build_controller() -> Result<DashboardController, String> {
    let config_path =
        config::config_path().map_err(|err| format!("Failed to resolve config: {err}"))?;
    let settings = config::load_from_path(&config_path)
        .map_err(|err| format!("Failed to load config: {err}"))?;
    let model = model::load_model(&settings.model)
        .map_err(|err| format!("Failed to load sentiment model: {err}"))?;
    tracing::info!(
        batch_size = settings.analysis.batch_size,
        model = model.model_id(),
        "Dashboard ready"
    );
    Ok(DashboardController::new(model, settings).with_config_path(config_path))
}

struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start dashboard");
                ui.label(&self.message);
            });
        });
    }
}
