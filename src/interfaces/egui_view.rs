use crate::domain::forecast::PredictionDisplay;
use crate::domain::ports::{ChartSurface, DashboardView};
use crate::domain::reveal::Section;
use eframe::egui;
use std::sync::{Arc, Mutex, OnceLock};

/// Wakes the UI thread after a background update. The egui context only
/// exists once the native window is up, so it is filled in late.
#[derive(Clone, Default)]
pub struct RepaintSignal {
    ctx: Arc<OnceLock<egui::Context>>,
}

impl RepaintSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, ctx: &egui::Context) {
        let _ = self.ctx.set(ctx.clone());
    }

    pub fn request(&self) {
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
    }
}

/// Visibility flags read by the dashboard app each frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub weather_has_data: bool,
    pub results_visible: bool,
    pub prediction: PredictionDisplay,
    pub pending_scroll: Option<Section>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            weather_has_data: false,
            results_visible: false,
            prediction: PredictionDisplay::placeholder(),
            pending_scroll: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct EguiView {
    state: Arc<Mutex<ViewState>>,
    repaint: RepaintSignal,
}

impl EguiView {
    pub fn new(repaint: RepaintSignal) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::default())),
            repaint,
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// Hands the pending scroll target to the renderer exactly once.
    pub fn take_scroll(&self) -> Option<Section> {
        self.state
            .lock()
            .ok()
            .and_then(|mut state| state.pending_scroll.take())
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
        self.repaint.request();
    }
}

impl DashboardView for EguiView {
    fn show_weather_charts(&self) {
        self.update(|state| state.weather_has_data = true);
    }

    fn set_results_visible(&self, visible: bool) {
        self.update(|state| state.results_visible = visible);
    }

    fn show_prediction(&self, display: &PredictionDisplay) {
        let display = display.clone();
        self.update(|state| state.prediction = display);
    }

    fn scroll_into_view(&self, section: Section) {
        self.update(|state| state.pending_scroll = Some(section));
    }
}

/// Last frame pushed by a series window.
#[derive(Debug, Clone, Default)]
pub struct ChartFrame {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartFrame {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| [i as f64, *v])
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct EguiSurface {
    frame: Arc<Mutex<ChartFrame>>,
    repaint: RepaintSignal,
}

impl EguiSurface {
    pub fn new(repaint: RepaintSignal) -> Self {
        Self {
            frame: Arc::new(Mutex::new(ChartFrame::default())),
            repaint,
        }
    }

    pub fn frame(&self) -> ChartFrame {
        self.frame
            .lock()
            .map(|frame| frame.clone())
            .unwrap_or_default()
    }
}

impl ChartSurface for EguiSurface {
    fn redraw(&self, labels: &[String], values: &[f64]) {
        if let Ok(mut frame) = self.frame.lock() {
            frame.labels = labels.to_vec();
            frame.values = values.to_vec();
        }
        self.repaint.request();
    }
}
