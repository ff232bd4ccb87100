pub mod components;
pub mod design_system;
pub mod egui_view;
pub mod ui;
