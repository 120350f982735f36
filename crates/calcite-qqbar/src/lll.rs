//! LLL (Lenstra-Lenstra-Lovász) lattice reduction in exact arithmetic.
//!
//! Used to search for integer relations between the numeric value of an
//! algebraic number and the power basis of a cyclotomic field. This is the
//! integral variant: for an integer basis the Gram-Schmidt data is kept as
//! the integers `d_i = Π_{j<i} ||b*_j||^2` and `λ_ij = d_{j+1} μ_ij`, and
//! every division performed is exact. Short vectors are never lost to
//! rounding however large the scaled entries are.

use calcite_ball::Complex64;
use calcite_integers::Integer;
use calcite_rings::Q;

/// Result of LLL reduction.
#[derive(Clone, Debug)]
pub struct LllResult {
    /// The reduced basis (rows are basis vectors).
    pub basis: Vec<Vec<Integer>>,
    /// Number of LLL iterations performed.
    pub iterations: usize,
}

/// Integral Gram-Schmidt data.
struct GramSchmidt {
    /// `d[0] = 1`, `d[i + 1] = d[i] · ||b*_i||^2`
    d: Vec<Integer>,
    /// λ[i][j] = d[j + 1] · μ[i][j] for j < i
    lambda: Vec<Vec<Integer>>,
    /// Rows whose data has been computed.
    known: usize,
}

/// Performs LLL reduction on a lattice basis.
///
/// # Arguments
///
/// * `basis` - Rows are the original basis vectors, linearly independent
/// * `delta` - Reduction parameter, in (1/4, 1)
#[must_use]
pub fn lll_reduce(basis: &[Vec<Integer>], delta: &Q) -> LllResult {
    let n = basis.len();
    let mut b = basis.to_vec();
    if n < 2 {
        return LllResult { basis: b, iterations: 0 };
    }

    let mut gs = GramSchmidt {
        d: vec![Integer::new(1); n + 1],
        lambda: vec![vec![Integer::new(0); n]; n],
        known: 1,
    };
    gs.d[1] = dot(&b[0], &b[0]);
    let (p, q) = (delta.numerator(), delta.denominator());
    let mut iterations = 0;

    let mut k = 1;
    while k < n {
        iterations += 1;
        if k >= gs.known {
            extend_gram_schmidt(&b, &mut gs, k);
        }
        size_reduce(&mut b, &mut gs, k, k - 1);

        if satisfies_lovasz(&gs, k, &p, &q) {
            for l in (0..k - 1).rev() {
                size_reduce(&mut b, &mut gs, k, l);
            }
            k += 1;
        } else {
            swap_rows(&mut b, &mut gs, k);
            k = (k - 1).max(1);
        }
    }

    LllResult { basis: b, iterations }
}

fn dot(a: &[Integer], b: &[Integer]) -> Integer {
    a.iter().zip(b).fold(Integer::new(0), |acc, (x, y)| acc + x * y)
}

/// Computes `λ[k][·]` and `d[k + 1]` from the rows before `k`.
fn extend_gram_schmidt(b: &[Vec<Integer>], gs: &mut GramSchmidt, k: usize) {
    for j in 0..=k {
        let mut u = dot(&b[k], &b[j]);
        for i in 0..j {
            u = (&gs.d[i + 1] * &u - &gs.lambda[k][i] * &gs.lambda[j][i]) / &gs.d[i];
        }
        if j < k {
            gs.lambda[k][j] = u;
        } else {
            gs.d[k + 1] = u;
        }
    }
    gs.known = k + 1;
}

/// The integer nearest to `a / b` for `b > 0`, halves rounded up.
fn nearest_quotient(a: &Integer, b: &Integer) -> Integer {
    let two = Integer::new(2);
    let num = a * &two + b;
    let den = b * &two;
    let q = &num / &den;
    if (&num % &den).is_negative() {
        q - Integer::new(1)
    } else {
        q
    }
}

/// b[k] -= round(μ[k][l]) * b[l], keeping λ consistent.
fn size_reduce(b: &mut [Vec<Integer>], gs: &mut GramSchmidt, k: usize, l: usize) {
    let two_lambda = (&gs.lambda[k][l] * &Integer::new(2)).abs();
    if two_lambda <= gs.d[l + 1] {
        return;
    }
    let r = nearest_quotient(&gs.lambda[k][l], &gs.d[l + 1]);

    let (head, tail) = b.split_at_mut(k);
    for (x, y) in tail[0].iter_mut().zip(&head[l]) {
        *x = &*x - &(&r * y);
    }

    gs.lambda[k][l] = &gs.lambda[k][l] - &(&r * &gs.d[l + 1]);
    for i in 0..l {
        gs.lambda[k][i] = &gs.lambda[k][i] - &(&r * &gs.lambda[l][i]);
    }
}

/// The Lovász condition ||b*_k||^2 >= (delta - μ[k][k-1]^2) ||b*_{k-1}||^2
/// with `delta = p / q`, cleared of denominators.
fn satisfies_lovasz(gs: &GramSchmidt, k: usize, p: &Integer, q: &Integer) -> bool {
    let lambda = &gs.lambda[k][k - 1];
    let lhs = q * &(&gs.d[k + 1] * &gs.d[k - 1]);
    let rhs = p * &(&gs.d[k] * &gs.d[k]) - q * &(lambda * lambda);
    lhs >= rhs
}

/// Swaps rows k-1 and k and updates the Gram-Schmidt data.
fn swap_rows(b: &mut [Vec<Integer>], gs: &mut GramSchmidt, k: usize) {
    b.swap(k - 1, k);
    gs.lambda.swap(k - 1, k);
    // the swap above also moved the λ entries at columns k-1 and beyond
    let lambda = gs.lambda[k - 1][k - 1].clone();
    gs.lambda[k][k - 1] = lambda.clone();
    gs.lambda[k - 1][k - 1] = Integer::new(0);
    gs.lambda[k][k] = Integer::new(0);

    let big_b = (&gs.d[k - 1] * &gs.d[k + 1] + &lambda * &lambda) / &gs.d[k];
    for i in k + 1..gs.known {
        let t = gs.lambda[i][k].clone();
        gs.lambda[i][k] = (&gs.d[k + 1] * &gs.lambda[i][k - 1] - &lambda * &t) / &gs.d[k];
        gs.lambda[i][k - 1] = (&big_b * &t + &lambda * &gs.lambda[i][k]) / &gs.d[k + 1];
    }
    gs.d[k] = big_b;
}

/// `round(x · scale)` as an integer, if it fits in an `i64`.
#[allow(clippy::cast_possible_truncation)]
fn scaled(x: f64, scale: f64) -> Option<Integer> {
    let y = (x * scale).round();
    (y.is_finite() && y.abs() < 9.0e18).then(|| Integer::new(y as i64))
}

/// Searches for a small integer vector `m` with `Σ m_j v_j ≈ 0`.
///
/// Builds the lattice with rows `[e_j, round(S·re v_j), round(S·im v_j)]`
/// where `S = 2^scale_bits`, reduces it, and returns the first reduced row
/// whose coefficients give a residual below `1e-12 · (1 + Σ|m_j|) · max|v_j|`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn find_integer_relation(values: &[Complex64], scale_bits: u32) -> Option<Vec<i64>> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let scale = 2f64.powi(i32::try_from(scale_bits).ok()?);

    let mut basis = Vec::with_capacity(n);
    for (j, v) in values.iter().enumerate() {
        let mut row = vec![Integer::new(0); n + 2];
        row[j] = Integer::new(1);
        row[n] = scaled(v.re, scale)?;
        row[n + 1] = scaled(v.im, scale)?;
        basis.push(row);
    }

    let magnitude = values.iter().map(|v| v.norm()).fold(1.0, f64::max);
    let reduced = lll_reduce(&basis, &Q::new(3, 4));
    tracing::trace!(dimension = n, iterations = reduced.iterations, "lll finished");

    reduced.basis.iter().find_map(|row| {
        let m: Vec<i64> = row[..n].iter().map(Integer::to_i64).collect::<Option<_>>()?;
        if m.iter().all(|&c| c == 0) {
            return None;
        }
        let residual: Complex64 = m
            .iter()
            .zip(values)
            .map(|(&c, v)| *v * (c as f64))
            .sum();
        let weight: f64 = m.iter().map(|c| c.unsigned_abs() as f64).sum();
        (residual.norm() < 1e-12 * (1.0 + weight) * magnitude).then_some(m)
    })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn lattice(rows: &[&[i64]]) -> Vec<Vec<Integer>> {
        rows.iter()
            .map(|r| r.iter().map(|&x| Integer::new(x)).collect())
            .collect()
    }

    fn norm_squared(v: &[Integer]) -> Integer {
        dot(v, v)
    }

    fn normalized(m: &[i64]) -> Vec<i64> {
        let sign = m.iter().find(|&&c| c != 0).map_or(1, |c| c.signum());
        m.iter().map(|c| c * sign).collect()
    }

    #[test]
    fn test_lll_identity() {
        let basis = lattice(&[&[1, 0], &[0, 1]]);
        let result = lll_reduce(&basis, &Q::new(3, 4));
        assert_eq!(result.basis, basis);
    }

    #[test]
    fn test_lll_reduces_basis() {
        let basis = lattice(&[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]]);
        let result = lll_reduce(&basis, &Q::new(99, 100));

        assert_eq!(result.basis.len(), 3);
        // The lattice has determinant 3, so the reduced rows are short.
        let shortest = result.basis.iter().map(|v| norm_squared(v)).min().unwrap();
        assert!(shortest <= Integer::new(3));
    }

    #[test]
    fn test_size_reduction() {
        let basis = lattice(&[&[1, 0], &[7, 1]]);
        let result = lll_reduce(&basis, &Q::new(3, 4));
        assert_eq!(result.basis[1], vec![Integer::new(0), Integer::new(1)]);
    }

    #[test]
    fn test_nearest_quotient() {
        let q = |a: i64, b: i64| nearest_quotient(&Integer::new(a), &Integer::new(b));
        assert_eq!(q(7, 2), Integer::new(4));
        assert_eq!(q(-7, 2), Integer::new(-3));
        assert_eq!(q(-5, 3), Integer::new(-2));
        assert_eq!(q(5, 3), Integer::new(2));
        assert_eq!(q(-12, 3), Integer::new(-4));
    }

    #[test]
    fn test_reduced_basis_is_short() {
        let basis = lattice(&[&[1, 0, 0, 31_415], &[0, 1, 0, 27_182], &[0, 0, 1, 14_142]]);
        let result = lll_reduce(&basis, &Q::new(3, 4));
        // unimodular steps keep the rows independent
        assert!(result.basis.iter().all(|v| norm_squared(v) > Integer::new(0)));
        let first = norm_squared(&result.basis[0]);
        assert!(first < norm_squared(&basis[2]));
    }

    #[test]
    fn test_relation_golden_ratio() {
        // φ^2 - φ - 1 = 0
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        let values = [
            Complex64::new(phi * phi, 0.0),
            Complex64::new(phi, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        let m = find_integer_relation(&values, 36).unwrap();
        assert_eq!(normalized(&m), vec![1, -1, -1]);
    }

    #[test]
    fn test_relation_complex() {
        // (1 + i)^2 = 2i
        let values = [
            Complex64::new(0.0, 2.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
        ];
        let m = find_integer_relation(&values, 30).unwrap();
        assert_eq!(normalized(&m), vec![1, 0, -2]);
    }

    #[test]
    fn test_relation_sqrt2_in_eighth_roots() {
        // √2 = ζ8 - ζ8^3
        let zeta = Complex64::from_polar(1.0, PI / 4.0);
        let mut values = vec![Complex64::new(2f64.sqrt(), 0.0)];
        values.extend((0..4).map(|k| zeta.powu(k)));
        let m = find_integer_relation(&values, 36).unwrap();
        assert_eq!(normalized(&m), vec![1, 0, -1, 0, 1]);
    }

    #[test]
    fn test_no_relation_for_single_value() {
        assert!(find_integer_relation(&[Complex64::new(1.0, 0.0)], 20).is_none());
    }
}
