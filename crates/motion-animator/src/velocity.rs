//! Initial velocity projection.
//!
//! Callers supply velocity in the property's own units per second (for example
//! points per second for a position). Springs expect velocity relative to the
//! total displacement of the change, so the raw value is divided by the signed
//! displacement along the dominant axis.

use super::types::Value;

/// Normalize `raw` against the `from -> to` displacement.
///
/// Returns `0.0` when the displacement is zero or the values cannot be
/// subtracted.
pub fn project(raw: f64, from: &Value, to: &Value) -> f64 {
    if raw == 0.0 {
        return 0.0;
    }
    match to.checked_sub(from).and_then(|delta| delta.signed_magnitude()) {
        Some(d) if d != 0.0 && d.is_finite() => raw / d,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Size};

    #[test]
    fn test_scalar_projection() {
        assert_eq!(project(50.0, &Value::from(0.0), &Value::from(100.0)), 0.5);
        assert_eq!(project(-50.0, &Value::from(100.0), &Value::from(0.0)), 0.5);
        assert_eq!(project(50.0, &Value::from(100.0), &Value::from(0.0)), -0.5);
    }

    #[test]
    fn test_point_and_size_projection() {
        let from = Value::from(Point::new(0.0, 0.0));
        let to = Value::from(Point::new(0.0, 100.0));
        assert_eq!(project(50.0, &from, &to), 0.5);

        let from = Value::from(Size::new(100.0, 100.0));
        let to = Value::from(Size::new(0.0, 50.0));
        assert_eq!(project(-50.0, &from, &to), 0.5);
    }

    #[test]
    fn test_zero_displacement_projects_to_zero() {
        assert_eq!(project(50.0, &Value::from(10.0), &Value::from(10.0)), 0.0);
    }

    #[test]
    fn test_opaque_projects_to_zero() {
        let from = Value::Opaque { id: 1 };
        let to = Value::Opaque { id: 2 };
        assert_eq!(project(50.0, &from, &to), 0.0);
    }
}
