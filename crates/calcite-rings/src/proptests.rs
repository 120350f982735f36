//! Property-based tests for the Gaussian rationals.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Field, Qi, Ring, Q};

    fn small_q() -> impl Strategy<Value = Q> {
        (-50i64..50i64, 1i64..20i64).prop_map(|(n, d)| Q::new(n, d))
    }

    fn small_qi() -> impl Strategy<Value = Qi> {
        (small_q(), small_q()).prop_map(|(re, im)| Qi::new(re, im))
    }

    proptest! {
        #[test]
        fn qi_mul_commutative(a in small_qi(), b in small_qi()) {
            prop_assert_eq!(a.clone() * b.clone(), b * a);
        }

        #[test]
        fn qi_distributive(a in small_qi(), b in small_qi(), c in small_qi()) {
            let left = a.clone() * (b.clone() + c.clone());
            let right = a.clone() * b + a * c;
            prop_assert_eq!(left, right);
        }

        #[test]
        fn qi_inverse(a in small_qi()) {
            prop_assume!(!a.is_zero());
            let inv = a.inv().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn qi_conj_is_multiplicative(a in small_qi(), b in small_qi()) {
            prop_assert_eq!((a.clone() * b.clone()).conj(), a.conj() * b.conj());
        }

        #[test]
        fn qi_norm_is_product_with_conj(a in small_qi()) {
            prop_assert_eq!(a.clone() * a.conj(), Qi::from_q(a.norm()));
        }
    }
}
