//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd, poly_inv_mod};
    use crate::dense::DensePoly;
    use crate::monomial::Monomial;
    use crate::sparse::SparsePoly;
    use calcite_rings::rationals::Q;
    use calcite_rings::traits::Ring;

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Q> {
        (-20i64..20i64).prop_map(Q::from_integer)
    }

    // Strategy for generating small polynomials (degree 0-4)
    fn small_poly() -> impl Strategy<Value = DensePoly<Q>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    // Strategy for generating non-zero polynomials
    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Q>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    // Sparse polynomials in three variables with exponents below 3
    fn sparse_poly() -> impl Strategy<Value = SparsePoly<Q>> {
        proptest::collection::vec(
            ((0u32..3, 0u32..3, 0u32..3), -5i64..5i64),
            0..5,
        )
        .prop_map(|terms| {
            let terms = terms
                .into_iter()
                .map(|((a, b, c), k)| (Monomial::from_exponents(&[a, b, c]), Q::from_integer(k)))
                .collect();
            SparsePoly::new(terms, 3)
        })
    }

    proptest! {
        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            // a * (b + c) = a * b + a * c
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_mul_degree(a in nonzero_poly(), b in nonzero_poly()) {
            // deg(a * b) = deg(a) + deg(b) for non-zero polynomials
            prop_assert_eq!(a.mul(&b).degree(), a.degree() + b.degree());
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in small_coeff()) {
            // (a * b)(x) = a(x) * b(x)
            let product = a.mul(&b);
            prop_assert_eq!(product.eval(&x), a.eval(&x) * b.eval(&x));
        }

        #[test]
        fn poly_division_identity(a in small_poly(), b in nonzero_poly()) {
            // a = q * b + r with deg r < deg b
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b);
            prop_assert!(poly_div_rem(&a, &g).1.is_zero());
            prop_assert!(poly_div_rem(&b, &g).1.is_zero());
        }

        #[test]
        fn inv_mod_is_inverse(a in nonzero_poly()) {
            // x^3 - 2 is irreducible over Q
            let m = DensePoly::<Q>::from_i64s(&[-2, 0, 0, 1]);
            if let Some(inv) = poly_inv_mod(&a, &m) {
                prop_assert_eq!(poly_div_rem(&a.mul(&inv), &m).1, DensePoly::one());
            } else {
                prop_assert!(poly_div_rem(&a, &m).1.is_zero());
            }
        }

        #[test]
        fn rem_monic_matches_div_rem(a in small_poly()) {
            let m = DensePoly::<Q>::from_i64s(&[1, -1, 0, 1]);
            prop_assert_eq!(a.rem_monic(&m), poly_div_rem(&a, &m).1);
        }

        #[test]
        fn sparse_mul_commutative(a in sparse_poly(), b in sparse_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn sparse_div_exact_recovers_factor(a in sparse_poly(), b in sparse_poly()) {
            prop_assume!(!b.is_zero());
            let prod = a.mul(&b);
            prop_assert_eq!(prod.div_exact(&b), Some(a));
        }

        #[test]
        fn sparse_reduce_var_is_congruent(a in sparse_poly()) {
            // Reducing x0 modulo x0^2 + 1 leaves the difference divisible
            // by x0^2 + 1
            let m = DensePoly::<Q>::from_i64s(&[1, 0, 1]);
            let reduced = a.reduce_var(0, &m);
            prop_assert!(reduced.degree_in(0) < 2);
            let m_sparse = SparsePoly::from_univariate(&m, 0, 3);
            prop_assert!(a.sub(&reduced).div_exact(&m_sparse).is_some());
        }

        #[test]
        fn sparse_content_divides(a in sparse_poly()) {
            let content = a.monomial_content();
            let stripped = a.div_monomial(&content);
            let restored = stripped.mul_term(&content, &Q::one());
            prop_assert_eq!(restored, a);
        }
    }
}
