//! Property-based tests for algebraic numbers.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::qqbar::{primitive_part, Qqbar};
    use calcite_poly::dense::DensePoly;
    use calcite_rings::rationals::Q;
    use calcite_rings::traits::Ring;
    use calcite_rings::Qi;

    fn small_rational() -> impl Strategy<Value = Q> {
        (-30i64..30i64, 1i64..12i64).prop_map(|(n, d)| Q::new(n, d))
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Q>> {
        proptest::collection::vec(small_rational(), 1..=5)
            .prop_map(DensePoly::new)
            .prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn primitive_part_is_scale_invariant(p in nonzero_poly(), n in 1i64..9, d in 1i64..9) {
            let scaled = p.scale(&Q::new(-n, d));
            prop_assert_eq!(primitive_part(&scaled), primitive_part(&p));
        }

        #[test]
        fn primitive_part_is_idempotent(p in nonzero_poly()) {
            let once = primitive_part(&p);
            prop_assert_eq!(primitive_part(&once), once.clone());
            prop_assert!(once.leading_coeff().signum() > 0);
        }

        #[test]
        fn root_of_unity_order_round_trips(p in -40i64..40, q in 3u32..40) {
            let z = Qqbar::root_of_unity(p, q);
            if let Some((p2, q2)) = z.root_of_unity_order() {
                prop_assert_eq!(Qqbar::root_of_unity(p2, q2), z);
            } else {
                // exp(2πi p/q) reduced to order 1 or 2
                prop_assert!(z.is_rational());
            }
        }

        #[test]
        fn sqrt_rational_squares_back(r in small_rational()) {
            let s = Qqbar::sqrt_rational(&r);
            let z = s.approx();
            let sq = z * z;
            prop_assert!((sq.re - r.to_f64()).abs() < 1e-9);
            prop_assert!(sq.im.abs() < 1e-9);
            prop_assert!(z.re >= 0.0);
        }

        #[test]
        fn sqrt_gaussian_principal(a in -20i64..20, b in -20i64..20) {
            let z = Qi::new(Q::from_integer(a), Q::from_integer(b));
            let s = Qqbar::sqrt_gaussian(&z);
            let w = s.approx();
            let sq = w * w;
            prop_assert!((sq.re - a as f64).abs() < 1e-9);
            prop_assert!((sq.im - b as f64).abs() < 1e-9);
            if let Some(g) = s.as_gaussian_rational() {
                prop_assert_eq!(g.clone() * g, z);
            }
        }

        #[test]
        fn conj_is_involution(p in -20i64..20, q in 3u32..20) {
            let z = Qqbar::root_of_unity(p, q);
            prop_assert_eq!(z.conj().conj(), z.clone());
            prop_assert_eq!(z.conj().is_real(), z.is_real());
        }
    }
}
