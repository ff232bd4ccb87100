use crate::application::client::{ClientEvent, DashboardClient};
use crate::domain::forecast::ForecastForm;
use crate::domain::health::BackendStatus;
use crate::domain::reveal::Section;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::charts::{SeriesStyle, render_series_chart};
use crate::interfaces::components::forecast_form::{FormAction, initial_form, render_forecast_form};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::egui_view::{EguiSurface, EguiView, ViewState};
use eframe::egui;
use std::collections::VecDeque;
use tracing::error;

const MAX_LOG_LINES: usize = 200;

/// Chart surfaces owned by the window, one per series.
#[derive(Clone)]
pub struct DashboardCharts {
    pub load: EguiSurface,
    pub temperature: EguiSurface,
    pub humidity: EguiSurface,
}

pub struct DashboardApp {
    client: DashboardClient,
    view: EguiView,
    charts: DashboardCharts,
    form: ForecastForm,
    backend_status: BackendStatus,
    logs: VecDeque<String>,
}

impl DashboardApp {
    pub fn new(client: DashboardClient, view: EguiView, charts: DashboardCharts) -> Self {
        let backend_status = client.backend_status();
        Self {
            client,
            view,
            charts,
            form: initial_form(),
            backend_status,
            logs: VecDeque::new(),
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.client.poll_next() {
            match event {
                ClientEvent::Log(line) => {
                    self.logs.push_back(line.trim_end().to_string());
                    if self.logs.len() > MAX_LOG_LINES {
                        self.logs.pop_front();
                    }
                }
                ClientEvent::BackendStatus(status) => self.backend_status = status,
            }
        }
    }

    fn handle_action(&mut self, action: FormAction) {
        let result = match action {
            FormAction::None => return,
            FormAction::Predict => self.client.submit(self.form.clone()),
            FormAction::Reset => self.client.reset(),
        };
        if let Err(e) = result {
            error!("{}", e);
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("⚡ Load Forecast");
            ui.separator();
            ui.label(format!(
                "Local time: {}",
                chrono::Local::now().format("%H:%M:%S")
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let color = match self.backend_status {
                    BackendStatus::Online(_) => DesignSystem::SUCCESS,
                    BackendStatus::Offline(_) => DesignSystem::DANGER,
                    BackendStatus::Unknown => DesignSystem::WARNING,
                };
                ui.label(
                    egui::RichText::new(format!("● {}", self.backend_status))
                        .color(color)
                        .small(),
                );
            });
        });
    }

    fn render_weather(&self, ui: &mut egui::Ui, state: &ViewState) {
        Card::new().title("Live weather").show(ui, |ui| {
            if !state.weather_has_data {
                ui.vertical_centered(|ui| {
                    ui.add_space(DesignSystem::SPACING_MEDIUM);
                    ui.label(
                        egui::RichText::new("Waiting for live weather data...")
                            .italics()
                            .color(DesignSystem::TEXT_MUTED),
                    );
                });
                return;
            }
            ui.columns(2, |cols| {
                render_series_chart(
                    &mut cols[0],
                    &SeriesStyle::TEMPERATURE,
                    &self.charts.temperature.frame(),
                );
                render_series_chart(
                    &mut cols[1],
                    &SeriesStyle::HUMIDITY,
                    &self.charts.humidity.frame(),
                );
            });
        });
    }

    fn render_forecast(&self, ui: &mut egui::Ui, state: &ViewState) -> egui::Rect {
        Card::new()
            .title("Forecast")
            .revealed(state.results_visible)
            .show(ui, |ui| {
                let prediction = &state.prediction;
                let color = if prediction.is_error {
                    DesignSystem::TEXT_MUTED
                } else {
                    DesignSystem::TEXT_PRIMARY
                };
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&prediction.text)
                            .size(36.0)
                            .strong()
                            .color(color),
                    );
                    if let Some(unit) = &prediction.unit {
                        ui.label(
                            egui::RichText::new(unit)
                                .size(18.0)
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                    }
                });
            })
            .response
            .rect
    }

    fn render_load_chart(&self, ui: &mut egui::Ui, state: &ViewState) -> egui::Rect {
        Card::new()
            .title("Load history")
            .revealed(state.results_visible)
            .show(ui, |ui| {
                render_series_chart(ui, &SeriesStyle::LOAD, &self.charts.load.frame());
            })
            .response
            .rect
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        self.drain_events();
        let state = self.view.snapshot();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        let mut action = FormAction::None;
        egui::SidePanel::left("form_panel")
            .default_width(320.0)
            .min_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                Card::new().title("Forecast inputs").show(ui, |ui| {
                    action = render_forecast_form(ui, &mut self.form);
                });
                ui.add_space(DesignSystem::SPACING_MEDIUM);
                ui.label(
                    egui::RichText::new("Activity")
                        .strong()
                        .color(DesignSystem::TEXT_SECONDARY),
                );
                ui.separator();
                render_log(ui, &self.logs);
            });
        self.handle_action(action);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_weather(ui, &state);

                    if !state.results_visible {
                        return;
                    }
                    ui.add_space(DesignSystem::SPACING_MEDIUM);
                    let forecast_rect = self.render_forecast(ui, &state);
                    ui.add_space(DesignSystem::SPACING_MEDIUM);
                    let chart_rect = self.render_load_chart(ui, &state);

                    if let Some(section) = self.view.take_scroll() {
                        let rect = match section {
                            Section::Forecast => forecast_rect,
                            Section::Chart => chart_rect,
                        };
                        ui.scroll_to_rect(rect, Some(egui::Align::TOP));
                    }
                });
        });

        // Keeps the clock ticking
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

fn render_log(ui: &mut egui::Ui, logs: &VecDeque<String>) {
    egui::ScrollArea::vertical()
        .id_salt("activity_log")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in logs {
                let color = if line.contains("ERROR") {
                    DesignSystem::DANGER
                } else if line.contains("WARN") {
                    DesignSystem::WARNING
                } else {
                    DesignSystem::TEXT_SECONDARY
                };
                ui.label(egui::RichText::new(line).size(11.0).color(color));
            }
        });
}
