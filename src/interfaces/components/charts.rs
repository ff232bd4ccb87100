use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::egui_view::ChartFrame;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

/// Axis hints for one series chart. The y range is a starting view only,
/// values outside it still widen the plot.
pub struct SeriesStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub color: egui::Color32,
    pub suggested_min: f64,
    pub suggested_max: f64,
}

impl SeriesStyle {
    pub const LOAD: Self = Self {
        id: "load_chart",
        name: "Predicted load (MW)",
        color: DesignSystem::SERIES_LOAD,
        suggested_min: 2500.0,
        suggested_max: 9500.0,
    };

    pub const TEMPERATURE: Self = Self {
        id: "temperature_chart",
        name: "Temperature (°C)",
        color: DesignSystem::SERIES_TEMP,
        suggested_min: 0.0,
        suggested_max: 50.0,
    };

    pub const HUMIDITY: Self = Self {
        id: "humidity_chart",
        name: "Humidity (%)",
        color: DesignSystem::SERIES_HUM,
        suggested_min: 0.0,
        suggested_max: 100.0,
    };
}

/// Renders a line chart of a series window, x ticks show the point labels.
pub fn render_series_chart(ui: &mut egui::Ui, style: &SeriesStyle, frame: &ChartFrame) {
    let labels = frame.labels.clone();
    let has_data = !frame.is_empty();
    let points = frame.points();

    Plot::new(style.id)
        .height(DesignSystem::CHART_HEIGHT)
        .show_grid([true, true])
        .legend(Legend::default())
        .allow_scroll(false)
        .include_y(style.suggested_min)
        .include_y(style.suggested_max)
        .x_axis_formatter(move |mark, _range| tick_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            if !has_data {
                return;
            }
            plot_ui.line(
                Line::new(style.name, points.clone())
                    .color(style.color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(style.name, points)
                    .color(style.color)
                    .radius(3.0),
            );
        });
}

/// Label of the point at an integer x position, empty between points.
fn tick_label(labels: &[String], x: f64) -> String {
    if x < 0.0 || x.fract() != 0.0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}
