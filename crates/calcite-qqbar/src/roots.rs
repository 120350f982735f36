//! Numerical root finding for integer polynomials.
//!
//! Durand–Kerner iteration finds all roots simultaneously; Newton steps
//! then polish each root against the original coefficients.

use calcite_ball::Complex64;
use calcite_poly::dense::DensePoly;
use calcite_rings::{Qi, Q};

const MAX_ITERATIONS: usize = 2000;

/// Converts the coefficients to `Complex64`, lowest degree first.
#[must_use]
pub fn complex_coeffs(p: &DensePoly<Q>) -> Vec<Complex64> {
    p.coeffs()
        .iter()
        .map(|c| Complex64::new(c.to_f64(), 0.0))
        .collect()
}

/// Converts Gaussian-rational coefficients to `Complex64`.
#[must_use]
pub fn complex_coeffs_qi(p: &DensePoly<Qi>) -> Vec<Complex64> {
    p.coeffs()
        .iter()
        .map(|c| {
            let (re, im) = c.to_f64_pair();
            Complex64::new(re, im)
        })
        .collect()
}

/// Horner evaluation.
#[must_use]
pub fn eval(coeffs: &[Complex64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}

/// Evaluates the polynomial and its derivative.
fn eval_with_derivative(coeffs: &[Complex64], z: Complex64) -> (Complex64, Complex64) {
    let mut p = Complex64::new(0.0, 0.0);
    let mut dp = Complex64::new(0.0, 0.0);
    for &c in coeffs.iter().rev() {
        dp = dp * z + p;
        p = p * z + c;
    }
    (p, dp)
}

/// A few Newton steps from `z`.
#[must_use]
pub fn newton_refine(coeffs: &[Complex64], mut z: Complex64, steps: usize) -> Complex64 {
    for _ in 0..steps {
        let (p, dp) = eval_with_derivative(coeffs, z);
        if dp.norm() == 0.0 {
            break;
        }
        let step = p / dp;
        z -= step;
        if step.norm() <= f64::EPSILON * z.norm() {
            break;
        }
    }
    z
}

/// All complex roots of a squarefree polynomial of positive degree.
#[must_use]
pub fn polynomial_roots(p: &DensePoly<Q>) -> Vec<Complex64> {
    let coeffs = complex_coeffs(p);
    let n = coeffs.len() - 1;
    if n == 0 {
        return Vec::new();
    }

    let lead = coeffs[n];
    let monic: Vec<Complex64> = coeffs.iter().map(|&c| c / lead).collect();
    if n == 1 {
        return vec![-monic[0]];
    }

    // Cauchy bound on the root moduli
    let bound = 1.0 + monic[..n].iter().map(|c| c.norm()).fold(0.0, f64::max);
    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..n)
        .map(|k| seed.powu(u32::try_from(k).unwrap_or(0)) * (bound / 2.0))
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut max_step: f64 = 0.0;
        for k in 0..n {
            let zk = roots[k];
            let mut denom = Complex64::new(1.0, 0.0);
            for (j, &zj) in roots.iter().enumerate() {
                if j != k {
                    denom *= zk - zj;
                }
            }
            if denom.norm() == 0.0 {
                denom = Complex64::new(f64::EPSILON, 0.0);
            }
            let step = eval(&monic, zk) / denom;
            roots[k] = zk - step;
            max_step = max_step.max(step.norm() / (1.0 + zk.norm()));
        }
        if max_step < 1e-15 {
            break;
        }
    }

    roots
        .into_iter()
        .map(|z| newton_refine(&coeffs, z, 4))
        .collect()
}

/// Smallest distance between two of the roots (infinity for fewer than two).
#[must_use]
pub fn root_separation(roots: &[Complex64]) -> f64 {
    let mut sep = f64::INFINITY;
    for (i, a) in roots.iter().enumerate() {
        for b in &roots[i + 1..] {
            sep = sep.min((a - b).norm());
        }
    }
    sep
}

/// Index of the root closest to `z`.
#[must_use]
pub fn nearest_root(roots: &[Complex64], z: Complex64) -> Option<usize> {
    roots
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - z).norm().total_cmp(&(*b - z).norm()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_roots() {
        let p = DensePoly::<Q>::from_i64s(&[-2, 0, 1]);
        let mut roots: Vec<f64> = polynomial_roots(&p).iter().map(|z| z.re).collect();
        roots.sort_by(f64::total_cmp);
        assert!((roots[0] + 2f64.sqrt()).abs() < 1e-12);
        assert!((roots[1] - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_cyclotomic_roots() {
        // x^4 + x^3 + x^2 + x + 1
        let p = DensePoly::<Q>::from_i64s(&[1, 1, 1, 1, 1]);
        let roots = polynomial_roots(&p);
        assert_eq!(roots.len(), 4);
        for z in &roots {
            assert!((z.norm() - 1.0).abs() < 1e-12);
            assert!((z.powu(5) - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        }
        let sep = root_separation(&roots);
        assert!((sep - 2.0 * (std::f64::consts::PI / 5.0).sin()).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_root() {
        let roots = vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)];
        assert_eq!(nearest_root(&roots, Complex64::new(-0.9, 0.1)), Some(1));
    }
}
