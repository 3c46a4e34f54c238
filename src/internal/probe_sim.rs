#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

//! Probe-count simulation: fills open-addressing tables to stepped load
//! factors and compares linear probing, quadratic probing, and the crate's
//! double hashing. Renders `probe_comparison.png` in the working directory.

use dhtable::hashing::{next_prime, probe_index};
use plotters::prelude::*;
use rand::Rng;

// A prime size, like every real table in this crate, so the double-hash
// cycle covers every slot.
const TABLE_SIZE: usize = 100_003;
// Load factors from 10% to 90%
const LOAD_STEPS: usize = 9;
const STRATEGIES: [&str; 3] = ["Linear Probing", "Quadratic Probing", "Double Hashing"];
// Cap per-insert probing so a clustered strategy cannot spin forever
const MAX_PROBES: usize = 200;

/// Slot index for `attempt` under the strategy named `strategy`.
fn slot_for(strategy: &str, key: &str, attempt: usize) -> usize {
    let home = probe_index(key, TABLE_SIZE, 0);
    match strategy {
        "Linear Probing" => (home + attempt) % TABLE_SIZE,
        "Quadratic Probing" => (home + attempt * attempt) % TABLE_SIZE,
        _ => probe_index(key, TABLE_SIZE, attempt),
    }
}

/// Inserts `key` into the occupancy table, returning how many probes it took
/// (capped at `MAX_PROBES`).
fn insert_counting_probes(table: &mut [bool], strategy: &str, key: &str) -> usize {
    for attempt in 0..MAX_PROBES {
        let index = slot_for(strategy, key, attempt);
        if !table[index] {
            table[index] = true;
            return attempt + 1;
        }
    }
    MAX_PROBES
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(next_prime(TABLE_SIZE - 1), TABLE_SIZE, "table size must be prime");

    let load_factors: Vec<f64> = (1..=LOAD_STEPS).map(|i| i as f64 / 10.0).collect();
    let key_counts: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {load_factors:?}");

    // One shared key corpus so every strategy sees the same workload
    let mut rng = rand::rng();
    let max_keys = key_counts.last().copied().unwrap_or(0);
    let keys: Vec<String> = (0..max_keys).map(|_| format!("key-{}", rng.random::<u64>())).collect();

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];
    let mut worst_probes: Vec<Vec<usize>> = vec![Vec::new(); STRATEGIES.len()];

    for (step, &n_keys) in key_counts.iter().enumerate() {
        println!("Filling to {:.0}% load ({} keys)", load_factors[step] * 100.0, n_keys);

        for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
            let mut table = vec![false; TABLE_SIZE];
            let mut total = 0usize;
            let mut worst = 0usize;

            for key in keys.iter().take(n_keys) {
                let probes = insert_counting_probes(&mut table, strategy, key);
                total += probes;
                worst = worst.max(probes);
            }

            let average = total as f64 / n_keys as f64;
            average_probes[strategy_idx].push(average);
            worst_probes[strategy_idx].push(worst);

            println!("  {strategy}: avg probes = {average:.3}, worst = {worst}");
        }
    }

    let root = BitMapBackend::new("probe_comparison.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .flat_map(|series| series.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Probes per Insert by Strategy", ("sans-serif", 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Average Probes per Insert")
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220), RGBColor(50, 180, 50)];
    for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
        let color = colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                load_factors
                    .iter()
                    .zip(&average_probes[strategy_idx])
                    .map(|(&load, &avg)| (load, avg)),
                line_style,
            ))?
            .label(strategy)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(&average_probes[strategy_idx])
                .map(|(&load, &avg)| Circle::new((load, avg), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    println!("Wrote probe_comparison.png");

    Ok(())
}
