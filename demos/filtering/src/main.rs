//! Demonstrates the tof-head filter stages
//!
//! Replays a recorded-style sequence of noisy rangefinder samples through
//! several configurations and prints the published distance.

use tof_head::{Config, RangeFilter};

// Raw readings every 50ms: settle near 500mm, a spike, a dropout, then a step to 900mm
const SAMPLES: [i32; 24] = [
    512, 508, 511, 509, 1800, 510, 507, 512, 0, 0, 0, 509, 511, 905, 912, 908, 910, 906,
    911, 909, 2600, 908, 910, 909,
];

fn run(name: &str, config: Config) {
    println!("{}", name);
    let mut filter = RangeFilter::new(config).expect("Valid config");

    println!("   t[ms]   raw → out[m]");
    for (i, &raw) in SAMPLES.iter().enumerate() {
        let t = i as u32 * 50;
        let out = filter.process(raw, t);
        println!("   {:5} {:5} → {:.3}", t, raw, out);
    }
    println!();
}

fn main() {
    println!("=== tof-head Filtering Examples ===\n");

    // Example 1: median, validation and throttle only
    run("1. Default (no optional stages)", Config::default());

    // Example 2: adaptive EMA with small deadband
    run("2. Simple preset (EMA + deadband)", Config::simple());

    // Example 3: everything enabled
    let config = Config::default()
        .with_ema(0.02, 0.6)
        .with_deadband(2)
        .with_delta_norm(60)
        .with_stability(10, 400)
        .with_percent_filter(0.05, -1)
        .with_publish_interval(100);
    run("3. All stages", config);
}
