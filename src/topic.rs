use std::fmt;
use std::str::FromStr;

/// Physics topics the lab supports. Selecting one determines the input form,
/// the formula, and whether a curve can be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Dynamics,
    NewtonsLaws,
    WorkEnergy,
    Kinematics,
    ProjectileMotion,
    Calculus,
}

/// One labeled input control of the dynamic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Display label shown next to the entry widget.
    pub label: &'static str,
    /// Stable identifier for the field.
    pub id: &'static str,
    /// Numeric fields are parsed as f64 at calculate/plot time; text fields
    /// (the calculus function and variable) are passed through as-is.
    pub numeric: bool,
}

const fn num(label: &'static str, id: &'static str) -> FieldDescriptor {
    FieldDescriptor { label, id, numeric: true }
}

const fn text(label: &'static str, id: &'static str) -> FieldDescriptor {
    FieldDescriptor { label, id, numeric: false }
}

const DYNAMICS_FIELDS: &[FieldDescriptor] =
    &[num("Mass (kg)", "mass"), num("Velocity (m/s)", "velocity")];

const NEWTONS_LAWS_FIELDS: &[FieldDescriptor] =
    &[num("Mass (kg)", "mass"), num("Acceleration (m/s²)", "acceleration")];

const WORK_ENERGY_FIELDS: &[FieldDescriptor] =
    &[num("Force (N)", "force"), num("Displacement (m)", "displacement")];

const KINEMATICS_FIELDS: &[FieldDescriptor] = &[
    num("Initial Velocity (m/s)", "v0"),
    num("Final Velocity (m/s)", "v"),
    num("Time (s)", "t"),
];

const CALCULUS_FIELDS: &[FieldDescriptor] = &[
    text("Function (e.g., x^2 + 2*x + 1)", "function"),
    text("Variable (e.g., x)", "variable"),
];

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Dynamics,
        Topic::NewtonsLaws,
        Topic::WorkEnergy,
        Topic::Kinematics,
        Topic::ProjectileMotion,
        Topic::Calculus,
    ];

    /// Ordered field descriptors for this topic's form.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            Topic::Dynamics => DYNAMICS_FIELDS,
            Topic::NewtonsLaws => NEWTONS_LAWS_FIELDS,
            Topic::WorkEnergy => WORK_ENERGY_FIELDS,
            // Projectile motion reuses the kinematics form.
            Topic::Kinematics | Topic::ProjectileMotion => KINEMATICS_FIELDS,
            Topic::Calculus => CALCULUS_FIELDS,
        }
    }

    /// Whether a curve over the fixed 0..=20 range is defined for this topic.
    pub fn plot_supported(&self) -> bool {
        match self {
            Topic::Dynamics | Topic::NewtonsLaws | Topic::WorkEnergy | Topic::Calculus => true,
            Topic::Kinematics | Topic::ProjectileMotion => false,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Dynamics => "Dynamics",
            Topic::NewtonsLaws => "Newton's Laws",
            Topic::WorkEnergy => "Work & Energy",
            Topic::Kinematics => "Kinematics",
            Topic::ProjectileMotion => "Projectile Motion",
            Topic::Calculus => "Calculus",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "dynamics" => Ok(Topic::Dynamics),
            "newtonslaws" | "newton" | "newtons" => Ok(Topic::NewtonsLaws),
            "workenergy" | "work" => Ok(Topic::WorkEnergy),
            "kinematics" => Ok(Topic::Kinematics),
            "projectilemotion" | "projectile" => Ok(Topic::ProjectileMotion),
            "calculus" => Ok(Topic::Calculus),
            _ => Err(format!("unknown topic: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_display_names() {
        for topic in Topic::ALL {
            assert_eq!(topic.display_name().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn projectile_motion_shares_kinematics_form() {
        assert_eq!(Topic::ProjectileMotion.fields(), Topic::Kinematics.fields());
    }
}
