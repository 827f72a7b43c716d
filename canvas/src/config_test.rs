use super::*;

#[test]
fn defaults() {
    let config = GameConfig::default();
    assert_eq!(config.size(), Size::new(640.0, 480.0));
    assert!((config.pixel_ratio - 1.0).abs() < f64::EPSILON);
    assert!(!config.debug);
    config.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let config = GameConfig::from_json(r#"{"width": 800, "debug": true}"#).unwrap();
    assert_eq!(config.size(), Size::new(800.0, 480.0));
    assert!(config.debug);
}

#[test]
fn malformed_json_is_configuration_error() {
    let err = GameConfig::from_json("{width:").unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn non_positive_dimensions_are_rejected() {
    for json in [r#"{"width": 0}"#, r#"{"height": -5}"#, r#"{"pixel_ratio": 0}"#] {
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)), "{json}");
    }
}

#[test]
fn non_finite_values_are_rejected() {
    let config = GameConfig { width: f64::NAN, ..GameConfig::default() };
    assert!(config.validate().is_err());
}
