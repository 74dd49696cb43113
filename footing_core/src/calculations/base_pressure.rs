//! # Eccentricity and Base Pressure
//!
//! Classical rigid-footing contact pressure under biaxial eccentricity:
//!
//! ```text
//! q = Fz/A · (1 ± 6·ex/L ± 6·ey/W)
//! ```
//!
//! Corners are numbered q1 (−X,−Y), q2 (−X,+Y), q3 (+X,−Y), q4 (+X,+Y).
//! The formula assumes full contact. A resultant outside the kern produces a
//! negative corner value, which is reported through
//! [`CornerPressures::has_uplift`] but not redistributed.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, FootingGeometry};
use crate::units::round_to;

/// Eccentricity of the resultant from the plan centre (m).
///
/// Zero when there is no vertical force to be eccentric.
pub fn eccentricity(moment: f64, force_z: f64, extent: f64) -> f64 {
    if force_z.abs() < f64::EPSILON {
        0.0
    } else {
        moment / force_z - extent / 2.0
    }
}

/// Unrounded largest corner pressure, `Fz·(1 + 6ex/L + 6ey/W)/(L·W)`.
pub fn peak_pressure(force_z: f64, ex: f64, ey: f64, length: f64, width: f64) -> f64 {
    force_z * (1.0 + 6.0 * ex / length + 6.0 * ey / width) / (length * width)
}

/// Soil contact pressure at the four plan corners (kN/m²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerPressures {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl CornerPressures {
    /// Corner pressures for a vertical force with eccentricities in metres.
    ///
    /// # Example
    /// ```
    /// use footing_core::calculations::base_pressure::CornerPressures;
    /// use footing_core::geometry::FootingGeometry;
    ///
    /// let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
    /// let q = CornerPressures::from_resultant(1242.56, 0.112, 0.0, &footing);
    /// assert_eq!(q.as_array(), [93.576, 93.576, 136.528, 136.528]);
    /// ```
    pub fn from_resultant(force_z: f64, ex: f64, ey: f64, footing: &FootingGeometry) -> Self {
        let base = force_z / footing.area();
        let rx = 6.0 * ex / footing.length;
        let ry = 6.0 * ey / footing.width;
        let corner = |sx: f64, sy: f64| round_to(base * (1.0 + sx * rx + sy * ry), 3);
        CornerPressures {
            q1: corner(-1.0, -1.0),
            q2: corner(-1.0, 1.0),
            q3: corner(1.0, -1.0),
            q4: corner(1.0, 1.0),
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    pub fn max(&self) -> f64 {
        self.as_array().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.as_array().into_iter().fold(f64::INFINITY, f64::min)
    }

    /// A corner is predicted to lift off the soil
    pub fn has_uplift(&self) -> bool {
        self.min() < 0.0
    }
}

/// Base reaction per unit length along the two edges normal to each axis (kN/m).
///
/// Along X the beam runs from the left edge (q1, q2) to the right edge
/// (q3, q4). Along Y it runs from the bottom edge (q1, q3) to the top edge
/// (q2, q4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLineLoads {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl EdgeLineLoads {
    pub fn from_pressures(q: &CornerPressures, footing: &FootingGeometry) -> Self {
        EdgeLineLoads {
            left: round_to((q.q1 + q.q2) * footing.width / 2.0, 3),
            right: round_to((q.q3 + q.q4) * footing.width / 2.0, 3),
            bottom: round_to((q.q1 + q.q3) * footing.length / 2.0, 3),
            top: round_to((q.q2 + q.q4) * footing.length / 2.0, 3),
        }
    }

    /// (start, end) intensities of the beam along an axis
    pub fn along(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.bottom, self.top),
        }
    }
}
