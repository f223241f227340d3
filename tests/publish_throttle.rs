use tof_head::{Config, RangeFilter, Reading};

#[test]
fn test_first_valid_sample_publishes_immediately() {
    let mut filter = RangeFilter::new(Config::default()).expect("Valid config");

    assert_eq!(filter.update(510, 12_345), Reading::from_mm(500.0));
    assert_eq!(filter.state().publisher.last_publish_ms, Some(12_345));
}

#[test]
fn test_calls_within_interval_return_identical_value() {
    let config = Config::default().with_publish_interval(200);
    let mut filter = RangeFilter::new(config).expect("Valid config");

    let first = filter.update(510, 0);
    let second = filter.update(610, 50);
    let third = filter.update(610, 100);

    assert_eq!(first, Reading::from_mm(500.0));
    assert_eq!(second, first);
    assert_eq!(third, first);

    // Internal state kept moving while the output was held
    assert_eq!(filter.estimate_mm(), Some(600.0));

    // Interval elapsed, latest state becomes visible
    let fourth = filter.update(610, 200);
    assert_eq!(fourth, Reading::from_mm(600.0));
}

#[test]
fn test_publish_interval_is_measured_from_last_publish() {
    let config = Config::default().with_publish_interval(100);
    let mut filter = RangeFilter::new(config).expect("Valid config");

    filter.update(510, 0);
    filter.update(510, 150);
    assert_eq!(filter.state().publisher.last_publish_ms, Some(150));

    // Less than 100ms after the last publish, not yet due
    filter.update(710, 220);
    assert_eq!(filter.update(710, 230), Reading::from_mm(500.0));
    assert_eq!(filter.update(710, 250), Reading::from_mm(700.0));
}

#[test]
fn test_zero_interval_publishes_every_call() {
    let config = Config::default().with_publish_interval(0);
    let mut filter = RangeFilter::new(config).expect("Valid config");

    filter.update(510, 0);
    filter.update(610, 0);
    assert_eq!(filter.update(610, 0), Reading::from_mm(600.0));
}

#[test]
fn test_throttle_across_clock_wraparound() {
    let config = Config::default().with_publish_interval(200);
    let mut filter = RangeFilter::new(config).expect("Valid config");

    filter.update(510, u32::MAX - 99);
    filter.update(610, u32::MAX);
    assert_eq!(filter.update(610, 50), Reading::from_mm(500.0));
    assert_eq!(filter.update(610, 100), Reading::from_mm(600.0));
}
