use crate::physics::{kinematics, mechanics, KinematicsError};
use crate::symbolic::{self, ParseError};
use crate::topic::{FieldDescriptor, Topic};

/// Errors from the calculate/plot dispatch. `Input` maps to a recoverable
/// "Input Error" warning, the other variants to a "Calculation Error".
#[derive(Debug)]
pub enum CalcError {
    /// Non-numeric text in a numeric field, or a missing field value.
    Input(String),
    /// A formula that is mathematically undefined for the given values.
    Math(String),
    /// The symbolic engine rejected the expression.
    Parse(ParseError),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::Input(msg) => write!(f, "input error: {msg}"),
            CalcError::Math(msg) => write!(f, "calculation error: {msg}"),
            CalcError::Parse(e) => write!(f, "expression error: {e}"),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<ParseError> for CalcError {
    fn from(value: ParseError) -> Self {
        CalcError::Parse(value)
    }
}

impl From<KinematicsError> for CalcError {
    fn from(value: KinematicsError) -> Self {
        CalcError::Math(value.to_string())
    }
}

/// Returns the raw value for `fields[index]`, or an `Input` error when the
/// form does not carry that many values.
pub(crate) fn raw_field<'a>(
    fields: &[FieldDescriptor],
    values: &'a [String],
    index: usize,
) -> Result<&'a str, CalcError> {
    let descriptor = fields
        .get(index)
        .ok_or_else(|| CalcError::Input("field descriptor out of range".into()))?;
    values
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| CalcError::Input(format!("missing value for {}", descriptor.label)))
}

/// Parses `fields[index]` out of `values` as a number.
pub(crate) fn numeric_field(
    fields: &[FieldDescriptor],
    values: &[String],
    index: usize,
) -> Result<f64, CalcError> {
    let raw = raw_field(fields, values, index)?;
    raw.trim().parse::<f64>().map_err(|_| {
        CalcError::Input(format!(
            "please enter a valid numerical value for {}",
            fields[index].label
        ))
    })
}

/// Computes the result string for a topic from the raw form values, in the
/// field order of [`Topic::fields`].
pub fn compute(topic: Topic, values: &[String]) -> Result<String, CalcError> {
    let fields = topic.fields();
    match topic {
        Topic::Dynamics => {
            let mass = numeric_field(fields, values, 0)?;
            let velocity = numeric_field(fields, values, 1)?;
            let ke = mechanics::kinetic_energy(mass, velocity);
            Ok(format!("Kinetic Energy: {ke:.2} J"))
        }
        Topic::NewtonsLaws => {
            let mass = numeric_field(fields, values, 0)?;
            let acceleration = numeric_field(fields, values, 1)?;
            let force = mechanics::force(mass, acceleration);
            Ok(format!("Force: {force:.2} N"))
        }
        Topic::WorkEnergy => {
            let force = numeric_field(fields, values, 0)?;
            let displacement = numeric_field(fields, values, 1)?;
            let work = mechanics::work_done(force, displacement);
            Ok(format!("Work Done: {work:.2} J"))
        }
        Topic::Kinematics | Topic::ProjectileMotion => {
            let v0 = numeric_field(fields, values, 0)?;
            let v = numeric_field(fields, values, 1)?;
            let t = numeric_field(fields, values, 2)?;
            let a = kinematics::average_acceleration(v0, v, t)?;
            Ok(format!("Average Acceleration: {a:.2} m/s²"))
        }
        Topic::Calculus => {
            let function = raw_field(fields, values, 0)?;
            let variable = raw_field(fields, values, 1)?;
            let derivative = symbolic::differentiate(function, variable)?;
            Ok(format!("Derivative: {derivative}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vals(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dynamics_kinetic_energy() {
        let out = compute(Topic::Dynamics, &vals(&["2", "3"])).unwrap();
        assert_eq!(out, "Kinetic Energy: 9.00 J");
    }

    #[test]
    fn non_numeric_field_is_an_input_error() {
        let err = compute(Topic::Dynamics, &vals(&["abc", "3"])).unwrap_err();
        assert!(matches!(err, CalcError::Input(_)));
    }

    #[test]
    fn kinematics_zero_time_is_a_math_error() {
        let err = compute(Topic::Kinematics, &vals(&["0", "10", "0"])).unwrap_err();
        assert!(matches!(err, CalcError::Math(_)));
    }

    #[test]
    fn calculus_defaults_variable_to_x() {
        let out = compute(Topic::Calculus, &vals(&["x^2 + 2*x + 1", ""])).unwrap();
        assert_eq!(out, "Derivative: 2*x + 2");
    }
}
