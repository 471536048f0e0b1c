use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_mean_and_sum() {
    let v = [1.0, 2.0, 3.0, 4.0];
    assert!(close(sum(&v), 10.0));
    assert!(close(mean(&v), 2.5));
    assert!(close(mean(&[]), 0.0));
}

#[test]
fn test_median_odd_and_even() {
    assert!(close(median(&[3.0, 1.0, 2.0]), 2.0));
    assert!(close(median(&[4.0, 1.0, 3.0, 2.0]), 2.5));
}

#[test]
fn test_std_dev_is_sample() {
    // Sample std of 2,4,4,4,5,5,7,9 is sqrt(32/7)
    let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert!(close(std_dev(&v), (32.0_f64 / 7.0).sqrt()));
}

#[test]
fn test_std_dev_small_samples() {
    assert!(close(std_dev(&[]), 0.0));
    assert!(close(std_dev(&[42.0]), 0.0));
}

#[test]
fn test_quantile_linear_interpolation() {
    let v = [1.0, 2.0, 3.0, 4.0];
    assert!(close(quantile(&v, 0.25), 1.75));
    assert!(close(quantile(&v, 0.75), 3.25));
    assert!(close(quantile(&v, 0.0), 1.0));
    assert!(close(quantile(&v, 1.0), 4.0));
}

#[test]
fn test_quantile_single_value() {
    assert!(close(quantile(&[7.0], 0.25), 7.0));
}

#[test]
fn test_min_max() {
    let v = [5.0, -1.0, 3.0];
    assert!(close(min(&v), -1.0));
    assert!(close(max(&v), 5.0));
    assert!(close(max(&[]), 0.0));
}
