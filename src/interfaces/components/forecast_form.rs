//! Forecast input form (left panel)

use crate::domain::forecast::ForecastForm;
use eframe::egui;

const DAY_TYPES: [&str; 2] = ["Weekday", "Weekend"];
const SEASONS: [&str; 3] = ["Summer", "Monsoon", "Winter"];

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Predict,
    Reset,
}

/// Blank form with today's date and the first option of each choice.
pub fn initial_form() -> ForecastForm {
    ForecastForm {
        date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        temperature: String::new(),
        humidity: String::new(),
        daytype: DAY_TYPES[0].to_string(),
        season: SEASONS[0].to_string(),
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) -> egui::Response {
    ui.label(egui::RichText::new(label).size(14.0));
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);
    response
}

fn choice_row(ui: &mut egui::Ui, label: &str, value: &mut String, options: &[&str]) {
    ui.label(egui::RichText::new(label).size(14.0));
    egui::ComboBox::from_id_salt(label)
        .selected_text(value.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
    ui.add_space(8.0);
}

/// Renders the five inputs and the two actions. Enter in a text field
/// submits like the Predict button.
pub fn render_forecast_form(ui: &mut egui::Ui, form: &mut ForecastForm) -> FormAction {
    let mut submitted = false;

    for (label, value, hint) in [
        ("Date", &mut form.date, "YYYY-MM-DD"),
        ("Temperature (°C)", &mut form.temperature, "e.g. 32.5"),
        ("Humidity (%)", &mut form.humidity, "e.g. 60"),
    ] {
        let response = text_row(ui, label, value, hint);
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submitted = true;
        }
    }

    choice_row(ui, "Day type", &mut form.daytype, &DAY_TYPES);
    choice_row(ui, "Season", &mut form.season, &SEASONS);

    ui.add_space(8.0);
    let mut action = FormAction::None;
    ui.horizontal(|ui| {
        if ui.button("Predict").clicked() || submitted {
            action = FormAction::Predict;
        }
        if ui.button("Reset").clicked() {
            action = FormAction::Reset;
        }
    });

    if action == FormAction::Reset {
        *form = initial_form();
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_form_lowercases_into_request() {
        let request = initial_form().to_request();
        assert_eq!(request.daytype, "weekday");
        assert_eq!(request.season, "summer");
        assert!(request.temperature.is_nan());
        assert_eq!(request.date.len(), 10);
    }
}
