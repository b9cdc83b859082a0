use anyhow::{Context, Result};
use clap::Parser;
use price_forecast::config::{GroundTruth, LoaderConfig, PipelineConfig, RegressorConfig, ScalerFit};
use price_forecast::kernels::KernelKind;
use price_forecast::{synthetic, ForecastReport, Pipeline, PriceSeries};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Forecast closing prices with a windowed support vector regressor", long_about = None)]
struct Args {
    /// Delimited price file with a header row
    #[arg(required_unless_present = "demo")]
    file: Option<PathBuf>,

    /// Run on a synthetic random walk of this length instead of a file
    #[arg(long, conflicts_with = "file")]
    demo: Option<usize>,

    /// Price column name
    #[arg(long, default_value = "Close")]
    column: String,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Lookback window length
    #[arg(long, default_value_t = 60)]
    lookback: usize,

    /// Fraction of the series used for training
    #[arg(long, default_value_t = 0.8)]
    train_ratio: f64,

    /// Kernel: rbf, linear or poly
    #[arg(long, default_value = "rbf")]
    kernel: KernelKind,

    /// Regularisation strength
    #[arg(long, default_value_t = 1000.0)]
    c: f64,

    /// Kernel coefficient
    #[arg(long, default_value_t = 0.1)]
    gamma: f64,

    /// Width of the insensitive tube
    #[arg(long, default_value_t = 0.1)]
    epsilon: f64,

    /// Polynomial degree
    #[arg(long, default_value_t = 3)]
    degree: u32,

    /// Fit the scaler on the full series or the training prefix only
    #[arg(long, default_value = "full")]
    scaler_fit: ScalerFit,

    /// Score against the raw series or the inverse-scaled test targets
    #[arg(long, default_value = "raw")]
    ground_truth: GroundTruth,

    /// Also report the legacy scaled mean difference
    #[arg(long)]
    legacy_score: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Write index, date, actual and predicted values to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("delimiter must be a single ASCII character");
        }

        Ok(PipelineConfig {
            loader: LoaderConfig {
                price_column: self.column.clone(),
                delimiter: self.delimiter as u8,
            },
            lookback: self.lookback,
            train_ratio: self.train_ratio,
            scaler_fit: self.scaler_fit,
            ground_truth: self.ground_truth,
            legacy_score: self.legacy_score,
            regressor: RegressorConfig {
                kernel: self.kernel,
                c: self.c,
                gamma: self.gamma,
                epsilon: self.epsilon,
                degree: self.degree,
                ..RegressorConfig::default()
            },
        })
    }
}

fn write_predictions(path: &Path, report: &ForecastReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["index", "date", "actual", "predicted"])?;
    for (i, (date, actual, predicted)) in report.rows().enumerate() {
        writer.write_record([
            i.to_string(),
            date.map(|d| d.to_string()).unwrap_or_default(),
            actual.to_string(),
            predicted.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args = Args::parse();
    let pipeline = Pipeline::new(args.pipeline_config()?)?;

    let report = match (&args.file, args.demo) {
        (_, Some(len)) => {
            info!(len, "Running on a synthetic random walk");
            let prices = synthetic::random_walk(len, 100.0, 0.0003, 0.015, 42)?;
            pipeline.run_series(&PriceSeries::new("Close", prices)?)?
        }
        (Some(file), None) => pipeline
            .run(file)
            .with_context(|| format!("forecasting {}", file.display()))?,
        (None, None) => anyhow::bail!("either a file or --demo is required"),
    };

    if let Some(path) = &args.output {
        write_predictions(path, &report)?;
        info!(path = %path.display(), rows = report.len(), "Predictions written");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Model:       {}", report.model);
        println!(
            "Train/test:  {} / {} values, {} / {} windows",
            report.train_size, report.test_size, report.train_windows, report.test_windows
        );
        print!("{}", report.metrics);
    }

    Ok(())
}
