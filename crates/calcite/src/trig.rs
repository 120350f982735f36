//! Circular functions and their inverses, in exponential and logarithmic
//! form.
//!
//! `sin`, `cos` and `tan` are written in terms of `e = exp(i·x)` so that
//! all circular functions of one angle share a single generator. The
//! inverse functions are written with `log` and `sqrt`.

use calcite_rings::{Qi, Ring, Q};

use crate::ca::{Ca, Special};
use crate::ctx::CaCtx;

impl CaCtx {
    /// `(exp(ix), exp(-ix))`.
    fn exp_i_pair(&mut self, x: &Ca) -> (Ca, Ca) {
        let ix = self.mul(x, &Self::i());
        let e = self.exp(&ix);
        let e_inv = self.inv_unchecked(&e);
        (e, e_inv)
    }

    /// Special arguments have no circular function values.
    fn trig_special(x: &Ca) -> Option<Ca> {
        match x {
            Ca::Special(Special::Unknown) => Some(Self::unknown()),
            Ca::Special(_) => Some(Self::undefined()),
            _ => None,
        }
    }

    /// `sin(x) = (e - 1/e) / 2i` with `e = exp(ix)`.
    pub fn sin(&mut self, x: &Ca) -> Ca {
        if let Some(s) = Self::trig_special(x) {
            return s;
        }
        let (e, e_inv) = self.exp_i_pair(x);
        let d = self.sub(&e, &e_inv);
        self.mul(&d, &Ca::Number(Qi::new(Q::zero(), Q::new(-1, 2))))
    }

    /// `cos(x) = (e + 1/e) / 2` with `e = exp(ix)`.
    pub fn cos(&mut self, x: &Ca) -> Ca {
        if let Some(s) = Self::trig_special(x) {
            return s;
        }
        let (e, e_inv) = self.exp_i_pair(x);
        let d = self.add(&e, &e_inv);
        self.mul(&d, &Ca::from_ratio(1, 2))
    }

    /// `tan(x) = (e - 1/e) / i(e + 1/e)` with `e = exp(ix)`.
    ///
    /// At a pole the result is complex infinity.
    pub fn tan(&mut self, x: &Ca) -> Ca {
        if let Some(s) = Self::trig_special(x) {
            return s;
        }
        let (e, e_inv) = self.exp_i_pair(x);
        let num = self.sub(&e, &e_inv);
        let sum = self.add(&e, &e_inv);
        let den = self.mul(&sum, &Self::i());
        self.div(&num, &den)
    }

    /// `atan(x) = (i/2)(log(1 - ix) - log(1 + ix))`.
    pub fn atan(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) if z.is_zero() => return Ca::zero(),
            Ca::Special(Special::SignedInf(d)) => {
                let sign = if **d == Ca::one() {
                    1
                } else if **d == Ca::from(-1) {
                    -1
                } else {
                    return Self::undefined();
                };
                let pi = self.pi();
                return self.mul(&pi, &Ca::from_ratio(sign, 2));
            }
            Ca::Special(_) => return Self::trig_special(x).unwrap_or_else(Self::undefined),
            _ => {}
        }
        let ix = self.mul(x, &Self::i());
        let a = self.sub(&Ca::one(), &ix);
        let b = self.add(&Ca::one(), &ix);
        let la = self.log(&a);
        let lb = self.log(&b);
        let d = self.sub(&la, &lb);
        self.mul(&d, &Ca::Number(Qi::new(Q::zero(), Q::new(1, 2))))
    }

    /// `asin(x) = -i·log(ix + sqrt(1 - x²))`.
    pub fn asin(&mut self, x: &Ca) -> Ca {
        if let Some(s) = Self::trig_special(x) {
            return s;
        }
        let ix = self.mul(x, &Self::i());
        let root = self.sqrt_one_minus_square(x);
        let w = self.add(&ix, &root);
        let l = self.log(&w);
        self.mul(&l, &Ca::gaussian(0, -1))
    }

    /// `acos(x) = -i·log(x + i·sqrt(1 - x²))`.
    pub fn acos(&mut self, x: &Ca) -> Ca {
        if let Some(s) = Self::trig_special(x) {
            return s;
        }
        let root = self.sqrt_one_minus_square(x);
        let iroot = self.mul(&root, &Self::i());
        let w = self.add(x, &iroot);
        let l = self.log(&w);
        self.mul(&l, &Ca::gaussian(0, -1))
    }

    fn sqrt_one_minus_square(&mut self, x: &Ca) -> Ca {
        let sq = self.sqr(x);
        let d = self.sub(&Ca::one(), &sq);
        self.sqrt(&d)
    }
}
