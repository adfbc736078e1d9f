#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(warnings)]

use plotters::prelude::*;
use rand::Rng;

// A prime table size so the quadratic probe sequence covers enough slots
const TABLE_SIZE: usize = 100_003;
// Load factors from 0.1 to 0.9 in 9 steps
const NUM_LOAD_FACTORS: usize = 9;

// Probing strategies to compare
const METHODS: [&str; 3] = ["Linear Probing", "Quadratic Probing", "Double Hashing"];
const MAX_PROBES: usize = 1000; // Prevent unbounded scans at high load

// Simple hash function for simulation purposes
fn hash_function(key: usize, size: usize) -> usize {
    key % size
}

// Secondary hash for double hashing; must never be zero
fn hash_function_2(key: usize, size: usize) -> usize {
    1 + (key / size) % (size - 1)
}

// Linear probing: slot = (h + j) mod size
fn linear_probing(table: &mut Vec<Option<usize>>, key: usize) -> usize {
    let origin = hash_function(key, TABLE_SIZE);
    let mut probes = 1;
    let mut index = origin;

    while table[index].is_some() && probes < MAX_PROBES {
        index = (origin + probes) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

// Quadratic probing: slot = (h + j^2) mod size, the scheme ProbingHashMap uses
fn quadratic_probing(table: &mut Vec<Option<usize>>, key: usize) -> usize {
    let origin = hash_function(key, TABLE_SIZE);
    let mut probes = 1;
    let mut index = origin;

    while table[index].is_some() && probes < MAX_PROBES {
        index = (origin + probes * probes) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

// Double hashing: slot = (h1 + j * h2) mod size
fn double_hashing(table: &mut Vec<Option<usize>>, key: usize) -> usize {
    let origin = hash_function(key, TABLE_SIZE);
    let step = hash_function_2(key, TABLE_SIZE);
    let mut probes = 1;
    let mut index = origin;

    while table[index].is_some() && probes < MAX_PROBES {
        index = (origin + probes * step) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

// Analytic probability that `keys` random placements into `slots` slots all
// land in distinct slots (the birthday bound): product of (slots - i) / slots
fn no_collision_probability(keys: usize, slots: usize) -> f64 {
    let mut result = 1.0;
    for i in 1..keys {
        result *= (slots - i) as f64 / slots as f64;
    }
    result
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.9
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.9 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Table size: {TABLE_SIZE}");
    println!("Load factors: {:?}", load_factors);

    // The bound that motivates prime-sized sparse tables: even a million-slot
    // table sees a collision almost surely after a few thousand keys.
    println!(
        "P(no collision, 2450 keys into 1e6 slots) = {:.6}",
        no_collision_probability(2450, 1_000_000)
    );

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_probes: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    // Generate random keys outside the loop so every method sees the same data
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<usize> =
        (0..max_keys_needed).map(|_| rng.random_range(1..10_000_000)).collect();

    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let mut table: Vec<Option<usize>> = vec![None; TABLE_SIZE];
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            for &key in keys.iter().take(n_keys) {
                let probes = match method {
                    "Linear Probing" => linear_probing(&mut table, key),
                    "Quadratic Probing" => quadratic_probing(&mut table, key),
                    "Double Hashing" => double_hashing(&mut table, key),
                    _ => panic!("Unknown method"),
                };
                probes_list.push(probes);
            }

            let avg = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst = *probes_list.iter().max().unwrap_or(&0);

            average_probes[method_idx].push(avg);
            worst_probes[method_idx].push(worst);

            println!("  {}: Avg probes = {:.2}, Worst = {}", method, avg, worst);
        }
    }

    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 30;

    // Plot 1: Average probes per insertion
    let root = BitMapBackend::new("average_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Probes per Insertion", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Average Probes")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors.iter().zip(average_probes[method_idx].iter()).map(|(&x, &y)| (x, y)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(average_probes[method_idx].iter())
                .map(|(&x, &y)| Circle::new((x, y), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst-case probes
    let root = BitMapBackend::new("worst_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Probes per Insertion", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Worst-Case Probes")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors
                    .iter()
                    .zip(worst_probes[method_idx].iter())
                    .map(|(&x, &y)| (x, y as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Wrote average_probes.png and worst_probes.png");

    Ok(())
}
