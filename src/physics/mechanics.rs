/// Kinetic energy [J] of a mass [kg] moving at a velocity [m/s].
pub fn kinetic_energy(mass_kg: f64, velocity_m_s: f64) -> f64 {
    0.5 * mass_kg * velocity_m_s * velocity_m_s
}

/// Newton's second law: force [N] from mass [kg] and acceleration [m/s²].
pub fn force(mass_kg: f64, acceleration_m_s2: f64) -> f64 {
    mass_kg * acceleration_m_s2
}

/// Work [J] done by a constant force [N] over a displacement [m].
pub fn work_done(force_n: f64, displacement_m: f64) -> f64 {
    force_n * displacement_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinetic_energy_basic() {
        assert!((kinetic_energy(2.0, 3.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn force_basic() {
        assert!((force(5.0, 2.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn work_done_basic() {
        assert!((work_done(4.0, 2.5) - 10.0).abs() < 1e-12);
    }
}
