//! Human-readable rendering of exact numbers.

use std::fmt::Write as _;

use calcite_rings::{Qi, Ring};

use crate::ca::{Ca, Special};
use crate::ctx::CaCtx;
use crate::ext::{CaExtHead, ExtHandle};

impl CaCtx {
    /// Renders `x` with its generators spelled out.
    ///
    /// Roots of unity `exp(2πi/q)` print as `ζq`, π as `Pi`, and function
    /// generators in prefix form such as `Exp(2)`.
    #[must_use]
    pub fn display(&self, x: &Ca) -> String {
        match x {
            Ca::Number(z) => z.to_string(),
            Ca::Element(elem) => {
                let names: Vec<String> = self
                    .field(elem.field)
                    .generators()
                    .iter()
                    .map(|&h| self.ext_name(h))
                    .collect();
                elem.value.to_string_with(&names)
            }
            Ca::Special(Special::SignedInf(d)) => match d.as_number() {
                Some(z) if z.is_one() => "+Infinity".to_string(),
                Some(z) if *z == -Qi::one() => "-Infinity".to_string(),
                _ => format!("Infinity({})", self.display(d)),
            },
            Ca::Special(Special::UnsignedInf) => "UnsignedInfinity".to_string(),
            Ca::Special(Special::Undefined) => "Undefined".to_string(),
            Ca::Special(Special::Unknown) => "Unknown".to_string(),
        }
    }

    fn ext_name(&self, h: ExtHandle) -> String {
        let ext = self.ext(h);
        if let Some(value) = ext.qqbar() {
            return match value.root_of_unity_order() {
                Some((1, q)) => format!("ζ{q}"),
                _ => value.to_string(),
            };
        }
        if ext.head() == CaExtHead::Pi {
            return "Pi".to_string();
        }
        let mut out = String::from(ext.head().name());
        out.push('(');
        for (k, arg) in ext.args().iter().enumerate() {
            if k > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", self.display(arg));
        }
        out.push(')');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers_and_specials() {
        let ctx = CaCtx::new();
        assert_eq!(ctx.display(&Ca::from_ratio(3, 4)), "3/4");
        assert_eq!(ctx.display(&CaCtx::pos_inf()), "+Infinity");
        assert_eq!(ctx.display(&CaCtx::neg_inf()), "-Infinity");
        assert_eq!(ctx.display(&CaCtx::uinf()), "UnsignedInfinity");
        assert_eq!(ctx.display(&CaCtx::undefined()), "Undefined");
    }

    #[test]
    fn test_display_generators() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        assert_eq!(ctx.display(&pi), "Pi");

        let z = ctx.root_of_unity(1, 5);
        assert_eq!(ctx.display(&z), "ζ5");

        let e = ctx.exp(&Ca::from(2));
        assert_eq!(ctx.display(&e), "Exp(2)");
    }
}
