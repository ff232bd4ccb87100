use loadcast::application::client::DashboardClient;
use loadcast::application::dashboard::ChartSurfaces;
use loadcast::application::system::Application;
use loadcast::config::Config;
use loadcast::interfaces::egui_view::{EguiSurface, EguiView, RepaintSignal};
use loadcast::interfaces::ui::{DashboardApp, DashboardCharts};
use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Initializing loadcast dashboard...");

    let config = Config::from_env()?;

    // 3. View bindings shared between the runtime and the window
    let repaint = RepaintSignal::new();
    let view = EguiView::new(repaint.clone());
    let charts = DashboardCharts {
        load: EguiSurface::new(repaint.clone()),
        temperature: EguiSurface::new(repaint.clone()),
        humidity: EguiSurface::new(repaint.clone()),
    };
    let surfaces = ChartSurfaces {
        load: Some(Arc::new(charts.load.clone())),
        temperature: Some(Arc::new(charts.temperature.clone())),
        humidity: Some(Arc::new(charts.humidity.clone())),
    };

    let app = Application::build(config, surfaces, Arc::new(view.clone()))?;

    // 4. Tokio Runtime in a background thread
    let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            info!("Background Runtime Started.");
            match app.start().await {
                Ok(handle) => {
                    let _ = handle_tx.send(handle);
                    // Spawned tasks live as long as this runtime
                    std::future::pending::<()>().await;
                }
                Err(e) => {
                    tracing::error!("Failed to start dashboard: {}", e);
                }
            }
        });
    });

    let handle = handle_rx
        .recv()
        .map_err(|_| anyhow::anyhow!("Dashboard runtime exited before starting"))?;
    info!("Dashboard running. Launching UI.");

    let client = DashboardClient::new(handle, log_rx);
    let dashboard_app = DashboardApp::new(client, view, charts);

    // 5. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Load Forecast Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Load Forecast Dashboard",
        native_options,
        Box::new(move |cc| {
            repaint.attach(&cc.egui_ctx);
            Ok(Box::new(dashboard_app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
