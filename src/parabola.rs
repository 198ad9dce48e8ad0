use std::ops::{Mul, Sub};

use crate::geometry::Point;

/// A parabola described as a focus and a directrix.
///
/// The parabola is the set of points where the distance to the focus and
/// the distance to the directrix are the same. During the sweep the
/// directrix is the sweep line, which lies below every focus it is used
/// with. A focus lying on the directrix is allowed; that parabola has
/// degenerated into a vertical ray above the focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusDirectrixParabola {
    focus: Point,
    /// y = directrix
    directrix: f64,
}

impl FocusDirectrixParabola {
    pub fn new(focus: Point, directrix: f64) -> FocusDirectrixParabola {
        FocusDirectrixParabola { focus, directrix }
    }

    /// Signed height of the focus above the directrix.
    fn focal_height(&self) -> f64 {
        self.focus.y - self.directrix
    }

    /// The parabola as `2 * focal_height * y = numerator(x)`.
    ///
    /// For a point (x, y) on the parabola
    ///
    /// (y - d)^2 = (x - fx)^2 + (y - fy)^2
    ///
    /// and after cancelling y^2 and collecting y on the left:
    ///
    /// 2 * (fy - d) * y = x^2 - 2 * fx * x + fx^2 + fy^2 - d^2
    ///
    /// Keeping the factor on the left avoids dividing by a zero focal height.
    fn numerator(&self) -> QuadraticParabola {
        let Point { x: fx, y: fy } = self.focus;
        let d = self.directrix;

        QuadraticParabola {
            a: 1.0,
            b: -2.0 * fx,
            c: fx * fx + fy * fy - d * d,
        }
    }

    /// The `x` coordinates where both parabolas cross, smallest first.
    ///
    /// Equating `numerator_1(x) / (2 * h1)` and `numerator_2(x) / (2 * h2)`
    /// gives `h2 * numerator_1(x) - h1 * numerator_2(x) = 0`, which also
    /// holds when one of the parabolas is degenerate. Returns `None` when the
    /// parabolas coincide or never cross.
    pub fn crossings(&self, other: &FocusDirectrixParabola) -> Option<(f64, f64)> {
        let difference = &(self.numerator() * other.focal_height()) - &(other.numerator() * self.focal_height());

        difference.roots()
    }
}

/// A parabola described by the equation `y = ax^2 + bx + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticParabola {
    a: f64,
    b: f64,
    c: f64,
}

impl QuadraticParabola {
    /// Real zeros of the polynomial, smallest first.
    ///
    /// A linear polynomial reports its single zero twice. A slightly
    /// negative discriminant is rounding error and is read as zero.
    pub fn roots(&self) -> Option<(f64, f64)> {
        let QuadraticParabola { a, b, c } = *self;

        if a == 0.0 {
            if b == 0.0 {
                return None;
            }
            let root = -c / b;
            return Some((root, root));
        }

        let discriminant = (b * b - 4.0 * a * c).max(0.0);

        // Citardauq form: never subtract two numbers of similar size.
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        if q == 0.0 {
            return Some((0.0, 0.0));
        }

        let (r1, r2) = (q / a, c / q);
        Some((r1.min(r2), r1.max(r2)))
    }
}

impl Mul<f64> for QuadraticParabola {
    type Output = QuadraticParabola;

    fn mul(self, scalar: f64) -> QuadraticParabola {
        QuadraticParabola {
            a: self.a * scalar,
            b: self.b * scalar,
            c: self.c * scalar,
        }
    }
}

impl<'p> Sub for &'p QuadraticParabola {
    type Output = QuadraticParabola;

    fn sub(self, other: &'p QuadraticParabola) -> QuadraticParabola {
        QuadraticParabola {
            a: self.a - other.a,
            b: self.b - other.b,
            c: self.c - other.c,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn roots_of_quadratic() {
        // (x - 1)(x + 3) = x^2 + 2x - 3
        let p = QuadraticParabola { a: 1.0, b: 2.0, c: -3.0 };

        let (low, high) = p.roots().unwrap();
        assert_relative_eq!(low, -3.0);
        assert_relative_eq!(high, 1.0);
    }

    #[test]
    fn roots_of_linear() {
        let p = QuadraticParabola { a: 0.0, b: 2.0, c: -6.0 };

        assert_eq!(p.roots(), Some((3.0, 3.0)));
    }

    #[test]
    fn constant_has_no_roots() {
        assert_eq!(QuadraticParabola { a: 0.0, b: 0.0, c: 1.0 }.roots(), None);
    }

    #[test]
    fn double_root_at_zero() {
        assert_eq!(QuadraticParabola { a: 3.0, b: 0.0, c: 0.0 }.roots(), Some((0.0, 0.0)));
    }

    #[test]
    fn crossings_of_nested_parabolas() {
        // y = (x^2 + 100) / 20 and y = (x^2 + 4) / 4 meet at x = +-sqrt(20).
        let wide = FocusDirectrixParabola::new(Point::new(0.0, 10.0), 0.0);
        let narrow = FocusDirectrixParabola::new(Point::new(0.0, 2.0), 0.0);

        let (low, high) = wide.crossings(&narrow).unwrap();
        assert_relative_eq!(low, -(20f64.sqrt()), epsilon = 1e-12);
        assert_relative_eq!(high, 20f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn crossings_with_degenerate_parabola() {
        let arc = FocusDirectrixParabola::new(Point::new(5.0, 10.0), 0.0);
        let ray = FocusDirectrixParabola::new(Point::new(-3.0, 0.0), 0.0);

        let (low, high) = arc.crossings(&ray).unwrap();
        assert_relative_eq!(low, -3.0, epsilon = 1e-9);
        assert_relative_eq!(high, -3.0, epsilon = 1e-9);
    }
}
