use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use firlab::output::LabeledSeries;
use firlab::processing::run_software;
use firlab::validation::load_chip_hold;

#[derive(Parser, Debug)]
#[command(name = "firlab_plot")]
#[command(about = "Plot FIR filter outputs or chip hold results", long_about = None)]
struct Args {
    /// Input signal vector file
    #[arg(long, requires = "configs")]
    vector: Option<PathBuf>,

    /// FIR coefficient config files
    #[arg(long, num_args = 1..)]
    configs: Vec<PathBuf>,

    /// Plot a chip validation results file instead
    #[arg(long, conflicts_with_all = ["vector", "configs"])]
    chip_hold: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct PlotApp {
    title: String,
    x_label: &'static str,
    y_label: &'static str,
    series: Vec<LabeledSeries>,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.title.as_str());
            let mut plot = Plot::new("series_plot")
                .legend(Legend::default())
                .x_axis_label(self.x_label)
                .y_axis_label(self.y_label);
            if let Some(labels) = self.series.iter().find_map(|s| s.x_labels.clone()) {
                plot = plot.x_axis_formatter(move |mark, _range| tick_label(&labels, mark.value));
            }
            plot.show(ui, |plot_ui| {
                for series in &self.series {
                    let points: PlotPoints = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v as f64])
                        .collect();
                    plot_ui.line(Line::new(series.label.clone(), points));
                }
            });
        });
    }
}

/// Chip identifier for a tick on an integer position, blank elsewhere
fn tick_label(labels: &[String], x: f64) -> String {
    if x < 0.0 || x.fract() != 0.0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let app = if let Some(path) = &args.chip_hold {
        let data = load_chip_hold(path)
            .with_context(|| format!("Unable to locate or read {}", path.display()))?;
        PlotApp {
            title: format!("Chip hold: {}", path.display()),
            x_label: "chip",
            y_label: "hold",
            series: vec![data.to_series("chip_hold")],
        }
    } else {
        let vector = args
            .vector
            .as_deref()
            .context("Pass --vector and --configs, or --chip-hold")?;
        PlotApp {
            title: "FIR filter output".to_string(),
            x_label: "sample index",
            y_label: "output value",
            series: run_software(vector, &args.configs)?,
        }
    };

    log::info!("Displaying plot");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_title("firlab"),
        ..Default::default()
    };

    eframe::run_native(
        "firlab",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
