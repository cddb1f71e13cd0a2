use englab::plot::{self, PlotError, SAMPLES, X_MAX};
use englab::topic::Topic;

fn labels(topic: Topic) -> Vec<&'static str> {
    topic.fields().iter().map(|f| f.label).collect()
}

fn vals(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn every_topic_has_its_documented_field_set() {
    assert_eq!(labels(Topic::Dynamics), ["Mass (kg)", "Velocity (m/s)"]);
    assert_eq!(
        labels(Topic::NewtonsLaws),
        ["Mass (kg)", "Acceleration (m/s²)"]
    );
    assert_eq!(labels(Topic::WorkEnergy), ["Force (N)", "Displacement (m)"]);
    let kinematics = [
        "Initial Velocity (m/s)",
        "Final Velocity (m/s)",
        "Time (s)",
    ];
    assert_eq!(labels(Topic::Kinematics), kinematics);
    assert_eq!(labels(Topic::ProjectileMotion), kinematics);
    assert_eq!(
        labels(Topic::Calculus),
        ["Function (e.g., x^2 + 2*x + 1)", "Variable (e.g., x)"]
    );
}

#[test]
fn calculus_fields_are_text_not_numeric() {
    assert!(Topic::Calculus.fields().iter().all(|f| !f.numeric));
    assert!(Topic::Dynamics.fields().iter().all(|f| f.numeric));
}

#[test]
fn plot_capability_flags() {
    assert!(Topic::Dynamics.plot_supported());
    assert!(Topic::NewtonsLaws.plot_supported());
    assert!(Topic::WorkEnergy.plot_supported());
    assert!(Topic::Calculus.plot_supported());
    assert!(!Topic::Kinematics.plot_supported());
    assert!(!Topic::ProjectileMotion.plot_supported());
}

#[test]
fn topic_names_round_trip_through_parsing() {
    for topic in Topic::ALL {
        assert_eq!(topic.to_string().parse::<Topic>().unwrap(), topic);
    }
    assert!("Thermodynamics".parse::<Topic>().is_err());
}

#[test]
fn curves_sample_one_hundred_points_over_the_fixed_range() {
    for (topic, values) in [
        (Topic::Dynamics, vals(&["2", ""])),
        (Topic::NewtonsLaws, vals(&["5", ""])),
        (Topic::WorkEnergy, vals(&["3", ""])),
    ] {
        let curve = plot::curve(topic, &values).expect("curve");
        assert!(!curve.title.is_empty());
        assert!(!curve.x_label.is_empty());
        assert!(!curve.y_label.is_empty());
        let points = &curve.series[0].points;
        assert_eq!(points.len(), SAMPLES);
        assert_eq!(points[0][0], 0.0);
        assert!((points[SAMPLES - 1][0] - X_MAX).abs() < 1e-12);
    }
}

#[test]
fn newtons_curve_is_linear_in_acceleration() {
    let curve = plot::curve(Topic::NewtonsLaws, &vals(&["5", ""])).unwrap();
    for point in &curve.series[0].points {
        assert!((point[1] - 5.0 * point[0]).abs() < 1e-9);
    }
}

#[test]
fn unsupported_topics_return_a_capability_absent_result() {
    for topic in [Topic::Kinematics, Topic::ProjectileMotion] {
        match plot::curve(topic, &vals(&["0", "10", "5"])) {
            Err(PlotError::Unsupported(t)) => assert_eq!(t, topic),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
