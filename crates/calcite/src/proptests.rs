//! Property-based tests for the rewriter, extensions and vectors.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Ca, CaCtx, CaExt, CaExtHead, CaVec, Truth};

    /// A recipe for an exact number, built inside a context.
    #[derive(Clone, Debug)]
    enum Atom {
        Rational(i64, i64),
        Gaussian(i64, i64),
        Pi,
        Exp(i64),
        Sqrt(i64),
        RootOfUnity(i64, u32),
        Formal(CaExtHead, i64, i64),
    }

    fn small_rational() -> impl Strategy<Value = (i64, i64)> {
        (-12i64..12, 1i64..6)
    }

    fn measured_head() -> impl Strategy<Value = CaExtHead> {
        prop_oneof![
            Just(CaExtHead::Re),
            Just(CaExtHead::Im),
            Just(CaExtHead::Abs),
            Just(CaExtHead::Conjugate),
            Just(CaExtHead::Sin),
            Just(CaExtHead::Cos),
            Just(CaExtHead::Atan),
        ]
    }

    fn atom() -> impl Strategy<Value = Atom> {
        prop_oneof![
            small_rational().prop_map(|(n, d)| Atom::Rational(n, d)),
            (-5i64..5, -5i64..5).prop_map(|(a, b)| Atom::Gaussian(a, b)),
            Just(Atom::Pi),
            (-3i64..3).prop_map(Atom::Exp),
            (2i64..7).prop_map(Atom::Sqrt),
            (-6i64..6, 3u32..9).prop_map(|(p, q)| Atom::RootOfUnity(p, q)),
            (measured_head(), small_rational())
                .prop_map(|(h, (n, d))| Atom::Formal(h, n, d)),
        ]
    }

    fn build(ctx: &mut CaCtx, atom: &Atom) -> Ca {
        match *atom {
            Atom::Rational(n, d) => Ca::from_ratio(n, d),
            Atom::Gaussian(a, b) => Ca::gaussian(a, b),
            Atom::Pi => ctx.pi(),
            Atom::Exp(n) => ctx.exp(&Ca::from(n)),
            Atom::Sqrt(n) => ctx.sqrt(&Ca::from(n)),
            Atom::RootOfUnity(p, q) => ctx.root_of_unity(p, q),
            Atom::Formal(head, n, d) => ctx.formal(head, &[Ca::from_ratio(n, d)]),
        }
    }

    /// `a0 + a1·a2 + …`, alternating sums and products.
    fn combine(ctx: &mut CaCtx, atoms: &[Atom]) -> Ca {
        let mut acc = Ca::zero();
        for (k, pair) in atoms.chunks(2).enumerate() {
            let mut term = build(ctx, &pair[0]);
            if let Some(b) = pair.get(1) {
                let b = build(ctx, b);
                term = if k % 2 == 0 { ctx.mul(&term, &b) } else { ctx.add(&term, &b) };
            }
            acc = ctx.add(&acc, &term);
        }
        acc
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn rewrite_is_idempotent(atoms in proptest::collection::vec(atom(), 1..4), deep in any::<bool>()) {
            let mut ctx = CaCtx::new();
            let x = combine(&mut ctx, &atoms);
            let once = ctx.rewrite_complex_normal_form(&x, deep);
            let twice = ctx.rewrite_complex_normal_form(&once, deep);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn rewrite_preserves_value(atoms in proptest::collection::vec(atom(), 1..4)) {
            let mut ctx = CaCtx::new();
            let x = combine(&mut ctx, &atoms);
            let r = ctx.rewrite_complex_normal_form(&x, true);
            prop_assert_ne!(ctx.check_equal(&x, &r), Truth::False);
            prop_assert!(ctx.enclosure(&x).overlaps(&ctx.enclosure(&r)));
        }

        #[test]
        fn root_of_unity_is_fixpoint(p in -20i64..20, q in 3u32..13, deep in any::<bool>()) {
            let mut ctx = CaCtx::new();
            let z = ctx.root_of_unity(p, q);
            prop_assert_eq!(ctx.rewrite_complex_normal_form(&z, deep), z);
        }

        #[test]
        fn extension_hash_is_stable(head in measured_head(), (n, d) in small_rational()) {
            let mut ctx = CaCtx::new();
            let x = Ca::from_ratio(n, d);
            let a = CaExt::new_fx1(&ctx, head, &x);
            let b = CaExt::new_fx1(&ctx, head, &x);
            prop_assert_eq!(a.hash_value(), b.hash_value());

            let ha = ctx.intern_ext(a);
            let hb = ctx.intern_ext(b);
            prop_assert_eq!(ha, hb);
        }

        #[test]
        fn vector_lifecycle(n in 0usize..40, extra in 0usize..40) {
            let mut v = CaVec::with_len(n);
            v.clear();
            prop_assert!(v.is_empty());

            let mut w = CaVec::with_len(n);
            w.set_length(n + extra);
            w.set_length(n);
            prop_assert_eq!(w, CaVec::with_len(n));
        }
    }
}
