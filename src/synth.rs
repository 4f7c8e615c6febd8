use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use janus_series::TimeSeries;

/// Generates a synthetic daily website-traffic series: a baseline of 500
/// visits with an upward trend of 2/day, a weekday boost of 100, a spike
/// of 50 every 30th day, and Gaussian noise with standard deviation 25.
pub fn traffic_series(n_days: usize, start: NaiveDate, seed: u64) -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 25.0).expect("valid noise sigma");

    let values: Vec<f64> = (0..n_days)
        .map(|i| {
            let weekday_boost = if i % 7 < 5 { 100.0 } else { 0.0 };
            let monthly_spike = if i % 30 == 0 { 50.0 } else { 0.0 };
            500.0 + 2.0 * i as f64 + weekday_boost + monthly_spike + noise.sample(&mut rng)
        })
        .collect();

    TimeSeries::daily(start, values).expect("generated series is valid")
}
