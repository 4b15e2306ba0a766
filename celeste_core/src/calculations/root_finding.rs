//! # Bracketed Root Finding
//!
//! Safeguarded Newton iteration for scalar equations on a positive domain.
//! A sign-changing bracket is kept at every step; the Newton step is taken
//! only when it lands inside the bracket, otherwise the bracket is bisected.
//! This keeps the solve from diverging on near-degenerate spans where plain
//! Newton overshoots into `c ≤ 0` or into overflow.

use thiserror::Error;

/// Iteration controls for [`solve_bracketed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Relative step tolerance on x
    pub rel_tol: f64,
    /// Maximum iteration count
    pub max_iters: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-6,
            max_iters: 100,
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Root location
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Iterations performed
    pub iters: usize,
}

/// Errors raised by the root finder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    /// The function has the same sign at both ends of the interval.
    #[error("no sign change between {lo} and {hi}")]
    NoBracket {
        /// Lower end of the last interval tried
        lo: f64,
        /// Upper end of the last interval tried
        hi: f64,
    },

    /// The iteration limit was reached before the tolerance.
    #[error("iteration limit reached after {iters} iterations: best x={best}, residual={residual}")]
    MaxIters {
        /// Abscissa with the smallest residual seen
        best: f64,
        /// Smallest absolute residual seen
        residual: f64,
        /// Iteration count performed
        iters: usize,
    },

    /// The function returned NaN or an infinity.
    #[error("non-finite residual at x={x}")]
    NonFinite {
        /// Abscissa where evaluation failed
        x: f64,
    },
}

/// Search geometrically around `guess > 0` for an interval where `f`
/// changes sign. The lower end is halved and the upper end doubled at each
/// step; a lower end whose residual is not finite stops shrinking.
pub fn expand_bracket<F>(mut f: F, guess: f64, max_steps: usize) -> Result<(f64, f64), RootError>
where
    F: FnMut(f64) -> f64,
{
    let f0 = f(guess);
    if !f0.is_finite() {
        return Err(RootError::NonFinite { x: guess });
    }
    if f0 == 0.0 {
        return Ok((guess, guess));
    }

    let changes_sign = |value: f64| value == 0.0 || value.signum() != f0.signum();

    let mut lo = guess;
    let mut hi = guess;
    let mut lo_open = true;

    for _ in 0..max_steps {
        if lo_open {
            let next = lo * 0.5;
            let f_next = f(next);
            if f_next.is_finite() {
                if changes_sign(f_next) {
                    return Ok((next, lo));
                }
                lo = next;
            } else {
                lo_open = false;
            }
        }

        let next = hi * 2.0;
        let f_next = f(next);
        if f_next.is_finite() && changes_sign(f_next) {
            return Ok((hi, next));
        }
        hi = next;
    }

    Err(RootError::NoBracket { lo, hi })
}

/// Solve `f(x) = 0` on `[lo, hi]`, where `f_df` returns the residual and
/// its derivative.
pub fn solve_bracketed<F>(mut f_df: F, lo: f64, hi: f64, config: RootConfig) -> Result<Root, RootError>
where
    F: FnMut(f64) -> (f64, f64),
{
    let (mut a, mut b) = (lo.min(hi), lo.max(hi));
    let (mut fa, _) = f_df(a);
    let (fb, _) = f_df(b);

    if !fa.is_finite() {
        return Err(RootError::NonFinite { x: a });
    }
    if !fb.is_finite() {
        return Err(RootError::NonFinite { x: b });
    }
    if fa == 0.0 {
        return Ok(Root { x: a, residual: 0.0, iters: 0 });
    }
    if fb == 0.0 {
        return Ok(Root { x: b, residual: 0.0, iters: 0 });
    }
    if fa.signum() == fb.signum() {
        return Err(RootError::NoBracket { lo: a, hi: b });
    }

    let mut x = 0.5 * (a + b);
    let mut best = (x, f64::INFINITY);

    for iter in 1..=config.max_iters {
        let (fx, dfx) = f_df(x);
        if !fx.is_finite() {
            return Err(RootError::NonFinite { x });
        }
        if fx.abs() < best.1 {
            best = (x, fx.abs());
        }
        if fx == 0.0 {
            return Ok(Root { x, residual: 0.0, iters: iter });
        }

        if fx.signum() == fa.signum() {
            a = x;
            fa = fx;
        } else {
            b = x;
        }

        let newton = x - fx / dfx;
        let next = if newton.is_finite() && newton > a && newton < b {
            newton
        } else {
            0.5 * (a + b)
        };

        if (next - x).abs() <= config.rel_tol * next.abs() {
            let (residual, _) = f_df(next);
            return Ok(Root { x: next, residual, iters: iter });
        }
        x = next;
    }

    Err(RootError::MaxIters {
        best: best.0,
        residual: best.1,
        iters: config.max_iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sqrt_two(x: f64) -> (f64, f64) {
        (x * x - 2.0, 2.0 * x)
    }

    #[test]
    fn test_solves_square_root() {
        let root = solve_bracketed(sqrt_two, 1.0, 2.0, RootConfig::default()).unwrap();
        assert_relative_eq!(root.x, 2.0_f64.sqrt(), max_relative = 1e-9);
        assert!(root.iters < 10);
    }

    #[test]
    fn test_bisects_without_derivative() {
        // A zero derivative forces bisection on every step
        let root = solve_bracketed(|x| (x * x - 2.0, 0.0), 1.0, 2.0, RootConfig::default()).unwrap();
        assert_relative_eq!(root.x, 2.0_f64.sqrt(), max_relative = 1e-5);
        assert!(root.iters > 10);
    }

    #[test]
    fn test_no_bracket() {
        let err = solve_bracketed(sqrt_two, 2.0, 3.0, RootConfig::default()).unwrap_err();
        assert!(matches!(err, RootError::NoBracket { .. }));
    }

    #[test]
    fn test_iteration_limit() {
        let config = RootConfig { rel_tol: 1e-12, max_iters: 2 };
        let err = solve_bracketed(|x| (x * x - 2.0, 0.0), 1.0, 2.0, config).unwrap_err();
        assert!(matches!(err, RootError::MaxIters { iters: 2, .. }));
    }

    #[test]
    fn test_expand_bracket_downwards() {
        // Decreasing function with root at 3
        let (lo, hi) = expand_bracket(|x| 3.0 - x, 100.0, 20).unwrap();
        assert!(lo <= 3.0 && 3.0 <= hi);
    }

    #[test]
    fn test_expand_bracket_upwards() {
        let (lo, hi) = expand_bracket(|x| x - 900.0, 10.0, 20).unwrap();
        assert!(lo <= 900.0 && 900.0 <= hi);
    }

    #[test]
    fn test_expand_bracket_skips_overflow() {
        // Overflows for small x; root at 50
        let f = |x: f64| if x < 10.0 { f64::INFINITY } else { x - 50.0 };
        let (lo, hi) = expand_bracket(f, 20.0, 20).unwrap();
        assert!(lo <= 50.0 && 50.0 <= hi);
    }

    #[test]
    fn test_expand_bracket_gives_up() {
        let err = expand_bracket(|x| x + 1.0, 1.0, 5).unwrap_err();
        assert!(matches!(err, RootError::NoBracket { .. }));
    }
}
