use crate::calc::{self, CalcError};
use crate::physics::mechanics;
use crate::symbolic;
use crate::topic::Topic;

/// Number of evenly spaced samples per curve.
pub const SAMPLES: usize = 100;
/// Fixed independent-variable range, inclusive on both ends.
pub const X_MAX: f64 = 20.0;

/// One named line of a plot.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// A 2D curve ready for rendering: title, axis labels, one or more series.
#[derive(Debug, Clone)]
pub struct PlotCurve {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
}

/// Errors from curve generation.
#[derive(Debug)]
pub enum PlotError {
    /// The topic has no curve over the fixed range.
    Unsupported(Topic),
    /// Field parsing or evaluation failed.
    Calc(CalcError),
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::Unsupported(topic) => {
                write!(f, "plotting is not available for {topic}")
            }
            PlotError::Calc(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PlotError {}

impl From<CalcError> for PlotError {
    fn from(value: CalcError) -> Self {
        PlotError::Calc(value)
    }
}

fn linspace() -> impl Iterator<Item = f64> {
    (0..SAMPLES).map(|i| X_MAX * i as f64 / (SAMPLES - 1) as f64)
}

fn sampled<F: Fn(f64) -> f64>(f: F) -> Vec<[f64; 2]> {
    linspace()
        .map(|x| [x, f(x)])
        .filter(|p| p[1].is_finite())
        .collect()
}

/// Builds the curve for a topic from the raw form values. Only the fields
/// the curve depends on are parsed.
pub fn curve(topic: Topic, values: &[String]) -> Result<PlotCurve, PlotError> {
    if !topic.plot_supported() {
        return Err(PlotError::Unsupported(topic));
    }
    let fields = topic.fields();
    match topic {
        Topic::Dynamics => {
            let mass = calc::numeric_field(fields, values, 0)?;
            Ok(PlotCurve {
                title: "Kinetic Energy vs. Velocity".into(),
                x_label: "Velocity (m/s)".into(),
                y_label: "Kinetic Energy (J)".into(),
                series: vec![PlotSeries {
                    name: "Kinetic Energy (J)".into(),
                    points: sampled(|v| mechanics::kinetic_energy(mass, v)),
                }],
            })
        }
        Topic::NewtonsLaws => {
            let mass = calc::numeric_field(fields, values, 0)?;
            Ok(PlotCurve {
                title: "Force vs. Acceleration".into(),
                x_label: "Acceleration (m/s²)".into(),
                y_label: "Force (N)".into(),
                series: vec![PlotSeries {
                    name: "Force (N)".into(),
                    points: sampled(|a| mechanics::force(mass, a)),
                }],
            })
        }
        Topic::WorkEnergy => {
            let force = calc::numeric_field(fields, values, 0)?;
            Ok(PlotCurve {
                title: "Work Done vs. Displacement".into(),
                x_label: "Displacement (m)".into(),
                y_label: "Work Done (J)".into(),
                series: vec![PlotSeries {
                    name: "Work Done (J)".into(),
                    points: sampled(|d| mechanics::work_done(force, d)),
                }],
            })
        }
        Topic::Calculus => {
            let function = calc::raw_field(fields, values, 0)?;
            let variable = calc::raw_field(fields, values, 1)?;
            let var = variable.trim();
            let var = if var.is_empty() { "x" } else { var };
            let expr = symbolic::parse(function).map_err(CalcError::Parse)?;
            let derivative = symbolic::differentiate(function, var).map_err(CalcError::Parse)?;
            // Surface an unbound variable before sampling rather than
            // silently producing an empty curve.
            if let Err(e) = expr.eval(var, 1.0) {
                return Err(PlotError::Calc(CalcError::Math(e.to_string())));
            }
            Ok(PlotCurve {
                title: format!("f({var}) and f'({var})"),
                x_label: var.to_string(),
                y_label: format!("f({var})"),
                series: vec![
                    PlotSeries {
                        name: format!("f({var}) = {expr}"),
                        points: sampled(|x| expr.eval(var, x).unwrap_or(f64::NAN)),
                    },
                    PlotSeries {
                        name: format!("f'({var}) = {derivative}"),
                        points: sampled(|x| derivative.eval(var, x).unwrap_or(f64::NAN)),
                    },
                ],
            })
        }
        Topic::Kinematics | Topic::ProjectileMotion => Err(PlotError::Unsupported(topic)),
    }
}
