//! The polygon data model and contour predicates.
//!
//! # Example
//!
//! ```
//! use fractum::polygon::Polygon;
//! use fractum::Point2;
//!
//! // A square with a square hole, both given counter-clockwise.
//! let frame = Polygon::with_holes(
//!     vec![
//!         Point2::new(-2.0, -2.0),
//!         Point2::new(2.0, -2.0),
//!         Point2::new(2.0, 2.0),
//!         Point2::new(-2.0, 2.0),
//!     ],
//!     vec![vec![
//!         Point2::new(-1.0, -1.0),
//!         Point2::new(1.0, -1.0),
//!         Point2::new(1.0, 1.0),
//!         Point2::new(-1.0, 1.0),
//!     ]],
//! );
//!
//! assert_eq!(frame.area(), 12.0);
//! assert!(!frame.contains(Point2::new(0.0, 0.0)));
//! ```

mod contour;
mod core;

pub use contour::{
    contour_bounding_box, contour_inside, contour_signed_area, contours_match, oriented,
    point_in_contour, point_on_contour,
};
pub use core::Polygon;
