use cusum_stat::{Cusum, CusumConfig, CusumError, DropNonFinite, RollingCusum, cusum};
use proptest::prelude::*;

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, 0..80)
}

proptest! {
    #[test]
    fn output_len_is_data_minus_warmup(data in series(), baseline in 0usize..20, guard_band in 0usize..5) {
        let stats = cusum(&data, baseline, guard_band);
        prop_assert_eq!(stats.len(), data.len().saturating_sub(baseline + guard_band));
    }

    #[test]
    fn empty_when_warmup_covers_data(data in series(), extra in 0usize..5, guard_band in 0usize..5) {
        let baseline = (data.len() + extra).saturating_sub(guard_band);
        prop_assert!(cusum(&data, baseline, guard_band).is_empty());
    }

    #[test]
    fn present_values_are_non_negative(data in series(), baseline in 0usize..20, guard_band in 0usize..5) {
        for stat in cusum(&data, baseline, guard_band).into_iter().flatten() {
            prop_assert!(stat >= 0.0);
        }
    }

    #[test]
    fn zero_baseline_passes_through(data in series()) {
        let stats = cusum(&data, 0, 0);
        let expected: Vec<_> = data.iter().map(|&x| (x >= 0.0).then_some(x)).collect();
        prop_assert_eq!(stats, expected);
    }

    #[test]
    fn baseline_of_two_or_more_is_never_absent(data in series(), baseline in 2usize..20, guard_band in 0usize..5) {
        prop_assert!(cusum(&data, baseline, guard_band).iter().all(Option::is_some));
    }

    #[test]
    fn streaming_matches_batch(data in series(), baseline in 0usize..20, guard_band in 0usize..5) {
        let batch = Cusum::new(baseline, guard_band).compute(&data);

        let mut rolling = RollingCusum::new(baseline, guard_band);
        let mut streamed = vec![];
        for &x in &data {
            if rolling.next(x).is_ready() {
                streamed.push(rolling.statistic());
            }
        }
        prop_assert_eq!(batch, streamed);
    }

    #[test]
    fn input_is_not_mutated(data in series(), baseline in 0usize..20, guard_band in 0usize..5) {
        let before = data.clone();
        let _ = cusum(&data, baseline, guard_band);
        prop_assert_eq!(data, before);
    }

    #[test]
    fn drop_non_finite_is_identity_on_clean_data(data in series(), baseline in 0usize..20, guard_band in 0usize..5) {
        let config = CusumConfig::default().with_generator(DropNonFinite);
        let filtered = Cusum::with_config(baseline, guard_band, config).compute(&data);
        prop_assert_eq!(filtered, cusum(&data, baseline, guard_band));
    }
}

#[test]
fn recommended_window_on_forty_points() {
    let data: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 3.0 } else { 1.0 }).collect();
    let stats = cusum(&data, 28, 2);
    assert_eq!(stats.len(), 10);

    // baseline data[0..28] has mean 2 and sample deviation sqrt(28 / 27)
    let sigma = (28.0f64 / 27.0).sqrt();
    let expected = ((data[30] - 2.0) / sigma - 0.5).max(0.0);
    let first = stats[0].unwrap_or(f64::NAN);
    assert!((first - expected).abs() < 1e-9, "{first} != {expected}");
}

#[test]
fn builder_rejects_missing_guard_band() {
    let err = Cusum::<f64>::builder().baseline(28).build().err();
    assert_eq!(err, Some(CusumError::InvalidArguments("guard_band")));
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("invalid arguments: you must specify guard_band".to_string())
    );
}

#[test]
fn missing_values_can_be_dropped_from_the_baseline() {
    let data = [1.0, f64::NAN, 2.0, 1.5, 9.0];
    let config = CusumConfig::default().with_generator(DropNonFinite);
    let stats = Cusum::with_config(4, 0, config).compute(&data);

    // without the NaN the baseline is [1, 2, 1.5]: mean 1.5, deviation floored at 0.5
    assert_eq!(stats.len(), 1);
    let first = stats[0].unwrap_or(f64::NAN);
    assert!((first - 14.5).abs() < 1e-9, "{first}");

    // with the NaN kept the deviation is undefined and the step is absent
    assert_eq!(cusum(&data, 4, 0), vec![None]);
}
