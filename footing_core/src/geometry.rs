//! # Footing and Column Geometry
//!
//! Plan geometry for a footing and the columns it carries. All constructors
//! take millimetres (the input convention) and store metres.
//!
//! ## Coordinates
//!
//! ```text
//!   y ^
//!   W |  q2 (-X,+Y)        q4 (+X,+Y)
//!     |
//!     |        [column at (x, y)]
//!     |
//!   0 +  q1 (-X,-Y)        q3 (+X,-Y) --> x
//!     0                               L
//! ```
//!
//! Column "length" is measured along X and "width" along Y.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::mm_to_m;
use crate::validation;

/// Plan axis of the footing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along the footing length
    X,
    /// Along the footing width
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// The other plan axis
    pub fn orthogonal(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Axis::X => "X direction",
            Axis::Y => "Y direction",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Footing plan dimensions in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingGeometry {
    /// Length along X (m)
    pub length: f64,
    /// Width along Y (m)
    pub width: f64,
}

impl FootingGeometry {
    /// Smallest accepted plan dimension
    pub const MIN_PLAN_DIMENSION_MM: f64 = 800.0;

    /// Build from millimetre dimensions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use footing_core::geometry::FootingGeometry;
    ///
    /// let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
    /// assert!((footing.area() - 10.8).abs() < 1e-9);
    /// assert!(FootingGeometry::from_mm(700.0, 3000.0).is_err());
    /// ```
    pub fn from_mm(length_mm: f64, width_mm: f64) -> CalcResult<Self> {
        validation::at_least("foundation_length", length_mm, Self::MIN_PLAN_DIMENSION_MM)?;
        validation::at_least("foundation_width", width_mm, Self::MIN_PLAN_DIMENSION_MM)?;
        Ok(FootingGeometry {
            length: mm_to_m(length_mm),
            width: mm_to_m(width_mm),
        })
    }

    /// Plan area (m²)
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Dimension along an axis (m)
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
        }
    }
}

/// A column footprint and its centroid position on the footing, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    /// Dimension along X (m)
    pub length: f64,
    /// Dimension along Y (m)
    pub width: f64,
    /// Centroid X position (m)
    pub x: f64,
    /// Centroid Y position (m)
    pub y: f64,
}

impl ColumnGeometry {
    /// Smallest accepted column dimension
    pub const MIN_DIMENSION_MM: f64 = 100.0;

    /// Build from millimetre inputs, checking that the centroid lies on the footing.
    pub fn from_mm(
        length_mm: f64,
        width_mm: f64,
        x_mm: f64,
        y_mm: f64,
        footing: &FootingGeometry,
    ) -> CalcResult<Self> {
        validation::at_least("column_length", length_mm, Self::MIN_DIMENSION_MM)?;
        validation::at_least("column_width", width_mm, Self::MIN_DIMENSION_MM)?;
        validation::non_negative("col_pos_xdir", x_mm)?;
        validation::non_negative("col_pos_ydir", y_mm)?;
        validation::at_most("col_pos_xdir", x_mm, footing.length * 1000.0)?;
        validation::at_most("col_pos_ydir", y_mm, footing.width * 1000.0)?;
        Ok(ColumnGeometry {
            length: mm_to_m(length_mm),
            width: mm_to_m(width_mm),
            x: mm_to_m(x_mm),
            y: mm_to_m(y_mm),
        })
    }

    /// Centroid coordinate along an axis
    pub fn position(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Footprint dimension along an axis
    pub fn dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
        }
    }

    /// Coordinates of the two faces normal to an axis
    pub fn faces(&self, axis: Axis) -> (f64, f64) {
        let centre = self.position(axis);
        let half = self.dimension(axis) / 2.0;
        (centre - half, centre + half)
    }

    /// Perimeter of the footprint (m)
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }

    /// Length over width, used by the punching k table
    pub fn aspect_ratio(&self) -> f64 {
        self.length / self.width
    }

    /// Same column moved to a new centroid
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        ColumnGeometry { x, y, ..*self }
    }
}
