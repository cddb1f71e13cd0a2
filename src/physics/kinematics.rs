/// Errors for kinematics calculations.
#[derive(Debug)]
pub enum KinematicsError {
    /// Elapsed time of zero leaves the average acceleration undefined.
    ZeroTime,
}

impl std::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KinematicsError::ZeroTime => {
                write!(f, "time must be non-zero to compute an average acceleration")
            }
        }
    }
}

impl std::error::Error for KinematicsError {}

/// Average acceleration [m/s²] over an interval: (v - v0) / t.
pub fn average_acceleration(
    initial_velocity_m_s: f64,
    final_velocity_m_s: f64,
    time_s: f64,
) -> Result<f64, KinematicsError> {
    if time_s == 0.0 {
        return Err(KinematicsError::ZeroTime);
    }
    Ok((final_velocity_m_s - initial_velocity_m_s) / time_s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_acceleration_basic() {
        let a = average_acceleration(0.0, 10.0, 5.0).unwrap();
        assert!((a - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_time_is_an_error() {
        assert!(matches!(
            average_acceleration(0.0, 10.0, 0.0),
            Err(KinematicsError::ZeroTime)
        ));
    }
}
