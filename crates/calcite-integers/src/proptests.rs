//! Property-based tests for the exact scalar types.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn isqrt_brackets_value(n in 0i64..10_000_000i64) {
            let r = Integer::new(n).isqrt();
            let r1 = &r + &Integer::new(1);
            prop_assert!(&r * &r <= Integer::new(n));
            prop_assert!(&r1 * &r1 > Integer::new(n));
        }

        #[test]
        fn sqrt_exact_of_square(n in small_int()) {
            let sq = Integer::new(n * n);
            prop_assert_eq!(sq.sqrt_exact(), Some(Integer::new(n.abs())));
        }

        #[test]
        fn rational_sqrt_exact_of_square(a in small_int(), b in non_zero_int()) {
            let r = Rational::from_i64(a, b);
            let sq = &r * &r;
            prop_assert_eq!(sq.sqrt_exact(), Some(r.abs()));
        }

        #[test]
        fn rational_add_inverse(a in small_int(), b in non_zero_int()) {
            let r = Rational::from_i64(a, b);
            prop_assert!((r.clone() + (-r)).is_zero());
        }

        #[test]
        fn rational_mul_recip(a in non_zero_int(), b in non_zero_int()) {
            let r = Rational::from_i64(a, b);
            prop_assert_eq!(&r * &r.recip(), Rational::from(1));
        }

        #[test]
        fn rational_to_f64_close(a in small_int(), b in non_zero_int()) {
            let r = Rational::from_i64(a, b);
            let expected = a as f64 / b as f64;
            prop_assert!((r.to_f64() - expected).abs() < 1e-12);
        }
    }
}
