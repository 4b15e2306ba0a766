//! # Catenary Geometry
//!
//! Closed-form geometry of a cable hanging between two supports at different
//! heights. Support A is the lower one and sits at the origin; support B is
//! `span` metres away horizontally and `rise` metres higher.
//!
//! ```text
//!                                         B
//!     A                              .--'  ^
//!     |'.                        .-'       | rise
//!     |   '-.                .-'           |
//!     |      '--..____..--'               |
//!     |<---- x0 ---->|                     v
//!     |<----------------- span ----------->|
//! ```
//!
//! With `c` the catenary parameter (T0 / w) and `x0` the abscissa of the
//! lowest point, the curve is `y(x) = c·(cosh((x - x0)/c) - 1)`. Writing
//! `u = span / 2c`, the support conditions give
//!
//! ```text
//! x0 = span/2 - c·asinh(rise / (2c·sinh u))
//! S  = sqrt(rise² + (2c·sinh u)²)              (arc length)
//! F1 = c·cosh(m/c)·(cosh u - 1),  m = span/2 - x0
//! ```
//!
//! `cosh z - 1` is evaluated as `2·sinh²(z/2)` to keep precision on taut
//! spans.

/// Catenary hung over one span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catenary {
    /// Catenary parameter c = T0 / w (m)
    pub c: f64,
    /// Horizontal span (m)
    pub span: f64,
    /// Height of B above A (m), never negative
    pub rise: f64,
    /// Abscissa of the vertex measured from A (m), negative when the
    /// vertex falls before A
    pub x0: f64,
}

impl Catenary {
    /// Hang a catenary of parameter `c` over `span` with `rise` ≥ 0.
    pub fn new(c: f64, span: f64, rise: f64) -> Self {
        let u = span / (2.0 * c);
        let half_chord_term = 2.0 * c * u.sinh();
        let m = c * (rise / half_chord_term).asinh();
        Catenary {
            c,
            span,
            rise,
            x0: span / 2.0 - m,
        }
    }

    /// Height of the curve above its vertex at abscissa `x` (m)
    pub fn height(&self, x: f64) -> f64 {
        cosh_minus_one((x - self.x0) / self.c) * self.c
    }

    /// Vertex offset from the mid-span abscissa, m = span/2 - x0 (m)
    pub fn mid_offset(&self) -> f64 {
        self.span / 2.0 - self.x0
    }

    /// True when the vertex lies strictly between the supports
    pub fn low_point_inside(&self) -> bool {
        self.x0 > 0.0 && self.x0 < self.span
    }

    /// Cable length between the supports (m)
    pub fn arc_length(&self) -> f64 {
        let g = 2.0 * self.c * (self.span / (2.0 * self.c)).sinh();
        self.rise.hypot(g)
    }

    /// Derivative of the arc length with respect to `c` at fixed span and rise
    pub fn arc_length_slope(&self) -> f64 {
        let u = self.span / (2.0 * self.c);
        let g = 2.0 * self.c * u.sinh();
        let dg = 2.0 * u.sinh() - (self.span / self.c) * u.cosh();
        g * dg / self.arc_length()
    }

    /// Sag at mid-span: chord minus curve at span/2 (m)
    pub fn mid_span_sag(&self) -> f64 {
        let u = self.span / (2.0 * self.c);
        self.c * (self.mid_offset() / self.c).cosh() * cosh_minus_one(u)
    }

    /// Chord minus curve at the vertex abscissa (m).
    ///
    /// Negative when the vertex lies outside the span: beyond the supports a
    /// convex curve runs above its chord.
    pub fn vertex_sag(&self) -> f64 {
        self.height(0.0) + self.rise * self.x0 / self.span
    }

    /// Drop from B to the lowest point reached on the span (m)
    pub fn drop_from_high_support(&self) -> f64 {
        if self.x0 > 0.0 {
            self.height(self.span)
        } else {
            self.rise
        }
    }

    /// T / T0 at support A
    pub fn tension_factor_a(&self) -> f64 {
        (self.x0 / self.c).cosh()
    }

    /// T / T0 at support B
    pub fn tension_factor_b(&self) -> f64 {
        ((self.span - self.x0) / self.c).cosh()
    }

    /// Downward pull on A divided by T0 (negative means uplift)
    pub fn vertical_factor_a(&self) -> f64 {
        (self.x0 / self.c).sinh()
    }

    /// Downward pull on B divided by T0
    pub fn vertical_factor_b(&self) -> f64 {
        ((self.span - self.x0) / self.c).sinh()
    }
}

fn cosh_minus_one(z: f64) -> f64 {
    2.0 * (z / 2.0).sinh().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_level_span_is_symmetric() {
        let cat = Catenary::new(2000.0, 400.0, 0.0);
        assert_eq!(cat.x0, 200.0);
        assert!(cat.low_point_inside());
        assert_relative_eq!(cat.tension_factor_a(), cat.tension_factor_b());
        assert_relative_eq!(cat.mid_span_sag(), cat.vertex_sag(), max_relative = 1e-12);
        assert_relative_eq!(cat.drop_from_high_support(), cat.mid_span_sag(), max_relative = 1e-12);
    }

    #[test]
    fn test_level_span_close_to_parabola() {
        // F ≈ a² / 8ρ for a taut span
        let cat = Catenary::new(2000.0, 100.0, 0.0);
        assert_abs_diff_eq!(cat.mid_span_sag(), 0.625, epsilon = 1e-3);
    }

    #[test]
    fn test_supports_lie_on_curve() {
        let cat = Catenary::new(1500.0, 500.0, 25.0);
        assert_abs_diff_eq!(cat.height(cat.span) - cat.height(0.0), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_length_exceeds_chord() {
        let cat = Catenary::new(1200.0, 600.0, 40.0);
        let chord = (600.0_f64.powi(2) + 40.0_f64.powi(2)).sqrt();
        assert!(cat.arc_length() > chord);
    }

    #[test]
    fn test_arc_length_slope_matches_finite_difference() {
        let c = 1800.0;
        let dc = 1e-3;
        let s = |c: f64| Catenary::new(c, 450.0, 30.0).arc_length();
        let numeric = (s(c + dc) - s(c - dc)) / (2.0 * dc);
        let analytic = Catenary::new(c, 450.0, 30.0).arc_length_slope();
        assert!(analytic < 0.0);
        assert_relative_eq!(analytic, numeric, max_relative = 1e-5);
    }

    #[test]
    fn test_parabolic_vertex_sag_formula() {
        // F2 ≈ F1 (1 - (h / 4F1)²) for a taut span
        let cat = Catenary::new(2000.0, 500.0, 10.0);
        let f1 = cat.mid_span_sag();
        let expected = f1 * (1.0 - (10.0 / (4.0 * f1)).powi(2));
        assert_relative_eq!(cat.vertex_sag(), expected, max_relative = 1e-3);
    }

    #[test]
    fn test_vertex_outside_steep_span() {
        let cat = Catenary::new(3000.0, 200.0, 80.0);
        assert!(!cat.low_point_inside());
        assert!(cat.vertex_sag() < 0.0);
        assert!(cat.vertical_factor_a() < 0.0);
        assert_eq!(cat.drop_from_high_support(), 80.0);
    }

    #[test]
    fn test_tension_ordering() {
        let cat = Catenary::new(900.0, 700.0, 60.0);
        assert!(cat.tension_factor_b() >= cat.tension_factor_a());
        assert!(cat.tension_factor_a() >= 1.0);
    }
}
