use approx::assert_relative_eq;
use price_forecast::metrics::{legacy_score, score, score_with_legacy};
use price_forecast::ForecastError;
use rstest::rstest;

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let metrics = score(&actual, &predicted).unwrap();

    // Errors are -2, 2, -3, 3, -2
    assert_relative_eq!(metrics.mae, 2.4, epsilon = 1e-12);
    assert_relative_eq!(metrics.mse, 6.0, epsilon = 1e-12);
    assert_relative_eq!(metrics.rmse, 6.0_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(metrics.mape, 10.3, epsilon = 1e-9);
    assert_relative_eq!(metrics.max_abs_error, 3.0, epsilon = 1e-12);
    assert!(metrics.legacy_score.is_none());
}

#[test]
fn test_perfect_prediction() {
    let actual = vec![101.5, 102.25, 99.75];
    let metrics = score(&actual, &actual).unwrap();

    assert_eq!(metrics.mae, 0.0);
    assert_eq!(metrics.mse, 0.0);
    assert_eq!(metrics.rmse, 0.0);
    assert_eq!(metrics.max_abs_error, 0.0);
}

#[test]
fn test_mape_skips_zero_actuals() {
    let metrics = score(&[0.0, 10.0], &[5.0, 11.0]).unwrap();
    assert_relative_eq!(metrics.mape, 10.0, epsilon = 1e-12);
    assert_relative_eq!(metrics.mae, 3.0, epsilon = 1e-12);
}

#[test]
fn test_legacy_score() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    // Signed errors sum to -2
    let legacy = legacy_score(&actual, &predicted).unwrap();
    assert_relative_eq!(legacy, -2.0 * 0.09 / 5.0, epsilon = 1e-12);

    let metrics = score_with_legacy(&actual, &predicted).unwrap();
    assert_relative_eq!(metrics.legacy_score.unwrap(), legacy, epsilon = 1e-15);
    assert_relative_eq!(metrics.mae, 2.4, epsilon = 1e-12);
}

#[rstest]
#[case(vec![1.0, 2.0, 3.0], vec![1.0, 2.0])]
#[case(vec![1.0], vec![])]
fn test_length_mismatch(#[case] actual: Vec<f64>, #[case] predicted: Vec<f64>) {
    match score(&actual, &predicted) {
        Err(ForecastError::LengthMismatch { left, right, .. }) => {
            assert_eq!(left, actual.len());
            assert_eq!(right, predicted.len());
        }
        other => panic!("Expected LengthMismatch, got {:?}", other),
    }
    assert!(matches!(
        legacy_score(&actual, &predicted),
        Err(ForecastError::LengthMismatch { .. })
    ));
}

#[test]
fn test_error_handling() {
    // Test with empty vectors
    let empty: Vec<f64> = vec![];
    assert!(matches!(
        score(&empty, &empty),
        Err(ForecastError::EmptyData(_))
    ));
    assert!(matches!(
        score_with_legacy(&empty, &empty),
        Err(ForecastError::EmptyData(_))
    ));
}

#[test]
fn test_metrics_display() {
    let mut metrics = score(&[10.0, 20.0], &[11.0, 19.0]).unwrap();
    let text = metrics.to_string();
    assert!(text.contains("MAE:     1.0000"));
    assert!(!text.contains("Legacy"));

    metrics.legacy_score = Some(0.5);
    assert!(metrics.to_string().contains("Legacy:  0.5000"));
}

#[test]
fn test_metrics_json_omits_missing_legacy_score() {
    let metrics = score(&[10.0, 20.0], &[11.0, 19.0]).unwrap();
    let json = serde_json::to_string(&metrics).unwrap();
    assert!(json.contains("\"mae\":1.0"));
    assert!(!json.contains("legacy_score"));
}
