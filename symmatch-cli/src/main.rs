use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use symmatch::io::{load_gray_image, save_gray_image, surface_to_gray};
use symmatch::{DetectConfig, Detection, Detector, Metric, Template};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "SymMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    #[default]
    Auto,
    Zncc,
    Ncc,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::Auto => Metric::Auto,
            MetricConfig::Zncc => Metric::Zncc,
            MetricConfig::Ncc => Metric::Ncc,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    threshold_level: u8,
    min_correlation: f32,
    min_distance: f32,
    metric: MetricConfig,
    parallel: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            threshold_level: cfg.threshold_level,
            min_correlation: cfg.min_correlation,
            min_distance: cfg.min_distance,
            metric: MetricConfig::Auto,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectConfigJson> for DetectConfig {
    fn from(value: DetectConfigJson) -> Self {
        Self {
            threshold_level: value.threshold_level,
            min_correlation: value.min_correlation,
            min_distance: value.min_distance,
            metric: value.metric.into(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DebugOutputJson {
    binary_path: Option<String>,
    surface_path: Option<String>,
    mask_path: Option<String>,
}

impl DebugOutputJson {
    fn any(&self) -> bool {
        self.binary_path.is_some() || self.surface_path.is_some() || self.mask_path.is_some()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    detect: DetectConfigJson,
    debug: DebugOutputJson,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x: f32,
    y: f32,
    score: f32,
    area: usize,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
            area: value.area,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("symmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    let image = load_gray_image(&config.image_path)?;
    let template = Template::from(load_gray_image(&config.template_path)?);
    tracing::info!(
        image_width = image.width(),
        image_height = image.height(),
        template_width = template.width(),
        template_height = template.height(),
        "inputs loaded"
    );

    let detector = Detector::new(template).with_config(config.detect.into());
    let detections = if config.debug.any() {
        let report = detector.detect_with_diagnostics(image.view())?;
        if let Some(path) = &config.debug.binary_path {
            save_gray_image(&report.binary, path)?;
        }
        if let Some(path) = &config.debug.surface_path {
            save_gray_image(&surface_to_gray(report.surface.view()), path)?;
        }
        if let Some(path) = &config.debug.mask_path {
            save_gray_image(&report.mask, path)?;
        }
        report.detections
    } else {
        detector.detect(image.view())?
    };

    let output = Output {
        count: detections.len(),
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
