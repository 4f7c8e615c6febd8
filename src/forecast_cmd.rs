use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use janus_sarima::{FitConfig, SarimaSpec};

use crate::cli::ForecastArgs;
use crate::config::JanusConfig;
use crate::series_io::{read_series_csv, write_forecast_csv};
use crate::synth;

/// Run the fit-and-forecast pipeline.
pub fn run(args: ForecastArgs) -> Result<()> {
    let config = JanusConfig::load(args.config.as_deref())?;

    // Step 1: Acquire the input series.
    let series = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "reading input series");
            read_series_csv(path)?
        }
        None => {
            let start: NaiveDate = config
                .synth
                .start
                .parse()
                .context("invalid [synth].start date")?;
            let seed = args.seed.or(config.seed).unwrap_or(42);
            let days = config.synth.days;
            info!(days, seed, "generating synthetic traffic series");
            synth::traffic_series(days, start, seed)
        }
    };
    info!(
        n = series.len(),
        first = %series.dates()[0],
        last = %series.last_date(),
        "series loaded"
    );

    // Step 2: Assemble model orders and fitting options (flags win).
    let spec = SarimaSpec::new(
        args.p.unwrap_or(config.model.p),
        args.d.unwrap_or(config.model.d),
        args.q.unwrap_or(config.model.q),
    )
    .with_seasonal(
        args.seasonal_p.unwrap_or(config.model.seasonal_p),
        args.seasonal_d.unwrap_or(config.model.seasonal_d),
        args.seasonal_q.unwrap_or(config.model.seasonal_q),
        args.period.unwrap_or(config.model.period),
    );
    let fit_config = FitConfig::new()
        .with_max_iterations(config.fit.max_iterations)
        .with_convergence_tolerance(config.fit.convergence_tolerance)
        .with_random_restarts(config.fit.random_restarts)
        .with_confidence_level(args.level.unwrap_or(config.fit.confidence_level));

    // Step 3: Fit.
    info!(
        order = %format!("({},{},{})", spec.p(), spec.d(), spec.q()),
        seasonal = %format!(
            "({},{},{})_{}",
            spec.seasonal_p(),
            spec.seasonal_d(),
            spec.seasonal_q(),
            spec.period()
        ),
        "fitting SARIMA model"
    );
    let fit = spec
        .fit_with(&series, &fit_config)
        .context("model fitting failed")?;
    info!(
        log_likelihood = fit.log_likelihood(),
        aic = fit.aic(),
        sigma2 = fit.sigma2(),
        "model fitted"
    );
    info!(
        ar = ?fit.ar(),
        ma = ?fit.ma(),
        seasonal_ar = ?fit.seasonal_ar(),
        seasonal_ma = ?fit.seasonal_ma(),
        "estimated coefficients"
    );
    if !fit.converged() {
        warn!("optimizer did not converge; results are the best iterate found");
    }

    // Step 4: Forecast.
    let horizon = args.horizon.or(config.horizon).unwrap_or(50);
    let forecast = fit.forecast(horizon).context("forecasting failed")?;

    // Step 5: Emit.
    match &args.output {
        Some(path) => {
            write_forecast_csv(path, &forecast)?;
            info!(path = %path.display(), steps = forecast.len(), "forecast written");
        }
        None => {
            let pct = forecast.level() * 100.0;
            println!("{:<12} {:>12} {:>12} {:>12}", "date", "mean", "lower", "upper");
            println!("{:-<12} {:->12} {:->12} {:->12}", "", "", "", "");
            for pt in forecast.points() {
                println!(
                    "{:<12} {:>12.2} {:>12.2} {:>12.2}",
                    pt.date, pt.mean, pt.lower, pt.upper
                );
            }
            println!("({horizon} steps, {pct:.0}% confidence bounds)");
        }
    }

    Ok(())
}
