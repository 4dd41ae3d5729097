use super::*;

#[test]
fn parses_tagged_linear_speed() {
    let def = TimingDef::from_json(
        r#"{ "kind": "linear_speed", "start_time": 0, "end_time": 100, "playback_speed": 10 }"#,
    )
    .unwrap();
    assert_eq!(
        def,
        TimingDef::LinearSpeed {
            start_time: 0.0,
            end_time: 100.0,
            playback_speed: 10.0
        }
    );
    let mut timing = def.build().unwrap();
    assert_eq!(timing.sduration(), 10.0);
    assert_eq!(timing.update_with_stime(5.0).indextime, 50.0);
}

#[test]
fn nested_combined_definition_builds() {
    let json = r#"{
        "kind": "combined",
        "children": [
            { "kind": "linear_duration", "start_time": 0, "end_time": 1, "sduration": 2 },
            { "kind": "combined", "children": [
                { "kind": "log_duration", "start_time": 1, "end_time": 1000, "sduration": 3 },
                { "kind": "spin", "period": 4 }
            ]}
        ]
    }"#;
    let timing = TimingDef::from_json(json).unwrap().build().unwrap();
    assert_eq!(timing.sduration(), 9.0);
    assert!((timing.stime_to_time(3.0) - 10.0).abs() < 1e-9);
    assert_eq!(timing.stime_to_time(6.0), 90.0);
}

#[test]
fn defaults_fill_optional_fields() {
    let def = TimingDef::from_json(
        r#"{ "kind": "periodic", "start_time": 0, "end_time": 1, "period": 2 }"#,
    )
    .unwrap();
    assert_eq!(def.build().unwrap().sduration(), 2.0);
}

#[test]
fn invalid_values_surface_as_configuration_errors() {
    let def = TimingDef::LogDuration {
        start_time: 0.0,
        end_time: 10.0,
        sduration: 1.0,
    };
    assert!(matches!(def.build(), Err(PlotvidError::Configuration(_))));

    let empty = TimingDef::Combined { children: vec![] };
    assert!(matches!(
        empty.build(),
        Err(PlotvidError::EmptyComposition(_))
    ));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        TimingDef::from_json(r#"{ "kind": "warp", "speed": 9 }"#),
        Err(PlotvidError::Serde(_))
    ));
    assert!(matches!(
        TimingDef::from_json(r#"{ "kind": "linear_speed", "start_time": 0 }"#),
        Err(PlotvidError::Serde(_))
    ));
}

#[test]
fn json_round_trip_preserves_definition() {
    let def = TimingDef::Combined {
        children: vec![
            TimingDef::LinearSpeedDuration {
                start_time: 1.0,
                playback_speed: 2.0,
                sduration: 3.0,
            },
            TimingDef::Spin {
                period: 5.0,
                azim_init: 45.0,
            },
        ],
    };
    let json = def.to_json().unwrap();
    assert_eq!(TimingDef::from_json(&json).unwrap(), def);
}
