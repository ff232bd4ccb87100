pub mod card;
pub mod charts;
pub mod forecast_form;
