use price_forecast::config::{PipelineConfig, RegressorConfig};
use price_forecast::kernels::KernelKind;
use price_forecast::{synthetic, Pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Synthetic Series Example");
    println!("========================================\n");

    // Write a reproducible random walk to a temporary CSV file
    let prices = synthetic::random_walk(500, 100.0, 0.0003, 0.015, 42)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prices.csv");
    synthetic::write_csv(&path, &prices)?;
    println!("Wrote {} prices to {}\n", prices.len(), path.display());

    // Reference settings: 60-value lookback, 80/20 split, RBF kernel
    let report = Pipeline::default().run(&path)?;
    println!("{}", report.model);
    println!(
        "{} training windows, {} test windows",
        report.train_windows, report.test_windows
    );
    print!("{}", report.metrics);

    println!("\nLast five forecasts:");
    for (date, actual, predicted) in report.rows().skip(report.len().saturating_sub(5)) {
        let date = date.map(|d| d.to_string()).unwrap_or_default();
        println!("  {}  actual {:>8.2}  predicted {:>8.2}", date, actual, predicted);
    }

    // Same data with a linear kernel, no other changes to the pipeline
    let config = PipelineConfig {
        regressor: RegressorConfig {
            kernel: KernelKind::Linear,
            c: 10.0,
            ..RegressorConfig::default()
        },
        ..PipelineConfig::default()
    };
    let linear = Pipeline::new(config)?.run(&path)?;
    println!("\n{}", linear.model);
    print!("{}", linear.metrics);

    Ok(())
}
