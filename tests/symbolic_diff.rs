use englab::{
    calc::{self, CalcError},
    symbolic::{self, ParseError},
    topic::Topic,
};

fn vals(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn quadratic_derivative_is_equivalent_to_2x_plus_2() {
    let d = symbolic::differentiate("x^2 + 2*x + 1", "x").expect("differentiate");
    for x in [-3.0, 0.0, 0.5, 7.0] {
        let expected = 2.0 * x + 2.0;
        assert!((d.eval("x", x).unwrap() - expected).abs() < 1e-9, "x = {x}");
    }
    assert_eq!(d.to_string(), "2*x + 2");
}

#[test]
fn double_star_power_notation_is_equivalent() {
    let a = symbolic::differentiate("x**2 + 2*x + 1", "x").unwrap();
    let b = symbolic::differentiate("x^2 + 2*x + 1", "x").unwrap();
    assert_eq!(a, b);
}

#[test]
fn derivative_respects_the_chosen_variable() {
    let d = symbolic::differentiate("t^3", "t").unwrap();
    assert_eq!(d.to_string(), "3*t^2");
    // Differentiating wrt x treats t as a constant.
    let d = symbolic::differentiate("t^3", "x").unwrap();
    assert_eq!(d.to_string(), "0");
}

#[test]
fn trigonometric_derivative() {
    let d = symbolic::differentiate("sin(x)*cos(x)", "x").unwrap();
    for x in [0.2f64, 1.0, 2.0] {
        let expected = (2.0 * x).cos();
        assert!((d.eval("x", x).unwrap() - expected).abs() < 1e-9);
    }
}

#[test]
fn unparseable_expression_is_a_distinguishable_error() {
    assert!(symbolic::differentiate("x +* 2", "x").is_err());
    assert!(matches!(
        symbolic::differentiate("2x", "x"),
        Err(ParseError::UnexpectedToken(_))
    ));
}

#[test]
fn calculus_topic_dispatch_renders_the_derivative() {
    let out = calc::compute(Topic::Calculus, &vals(&["x^2 + 2*x + 1", "x"])).unwrap();
    assert_eq!(out, "Derivative: 2*x + 2");
}

#[test]
fn calculus_topic_bad_expression_is_a_parse_error() {
    let err = calc::compute(Topic::Calculus, &vals(&["x^^2", "x"])).unwrap_err();
    assert!(matches!(err, CalcError::Parse(_)));
}
