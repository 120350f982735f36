//! Exact numbers.

use calcite_rational_func::RationalFunction;
use calcite_rings::{Qi, Ring, Q};

use crate::field::FieldHandle;

/// Values outside the complex numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Special {
    /// Infinity in a direction, a finite number of modulus one.
    SignedInf(Box<Ca>),
    /// Complex infinity, with no direction.
    UnsignedInf,
    /// The result of an operation such as `0/0`.
    Undefined,
    /// A value that could not be determined.
    Unknown,
}

/// An element of a field of the context.
///
/// The rational function uses every generator of the field, one variable
/// per generator in the field's order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElem {
    pub(crate) field: FieldHandle,
    pub(crate) value: RationalFunction<Qi>,
}

impl FieldElem {
    /// The field holding this element.
    #[must_use]
    pub fn field(&self) -> FieldHandle {
        self.field
    }

    /// The element as a rational function of the field's generators.
    #[must_use]
    pub fn value(&self) -> &RationalFunction<Qi> {
        &self.value
    }
}

/// An exact real or complex number.
///
/// Numbers in `Q(i)` are stored directly; everything else is an element
/// of a field generated by extensions of a [`CaCtx`](crate::CaCtx), whose
/// arena the value refers to by handle. Values built by the context are
/// kept in a canonical form, so equal representations compare equal with
/// `==`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ca {
    /// A Gaussian rational `a + b·i` (a rational when `b = 0`).
    Number(Qi),
    /// An element of a field with at least one generator.
    Element(FieldElem),
    /// Infinities, undefined and unknown values.
    Special(Special),
}

impl Default for Ca {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ca {
    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::Number(Qi::zero())
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self::Number(Qi::one())
    }

    /// The rational `num / den`.
    #[must_use]
    pub fn from_ratio(num: i64, den: i64) -> Self {
        Self::Number(Qi::from_ratio(num, den))
    }

    /// The Gaussian integer `re + im·i`.
    #[must_use]
    pub fn gaussian(re: i64, im: i64) -> Self {
        Self::Number(Qi::new(Q::from_integer(re), Q::from_integer(im)))
    }

    /// Returns true for a number in `Q(i)`.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// The value as a Gaussian rational, if it is stored as one.
    #[must_use]
    pub fn as_number(&self) -> Option<&Qi> {
        match self {
            Self::Number(z) => Some(z),
            _ => None,
        }
    }

    /// Returns true for a rational number.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        matches!(self, Self::Number(z) if z.is_real())
    }

    /// Returns true for a Gaussian rational.
    #[must_use]
    pub fn is_gaussian_rational(&self) -> bool {
        self.is_number()
    }

    /// Returns true for a literal zero.
    #[must_use]
    pub fn is_zero_number(&self) -> bool {
        matches!(self, Self::Number(z) if z.is_zero())
    }

    /// Returns true for infinities, undefined and unknown.
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special(_))
    }

    /// Returns true for [`Special::Unknown`].
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Special(Special::Unknown))
    }

    /// Returns true for [`Special::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Special(Special::Undefined))
    }

    /// Returns true for a signed or unsigned infinity.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            Self::Special(Special::SignedInf(_) | Special::UnsignedInf)
        )
    }

    /// The direction of a signed infinity.
    #[must_use]
    pub fn inf_direction(&self) -> Option<&Ca> {
        match self {
            Self::Special(Special::SignedInf(dir)) => Some(dir),
            _ => None,
        }
    }

    /// The field element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&FieldElem> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// The field of a field element.
    #[must_use]
    pub fn field(&self) -> Option<FieldHandle> {
        self.as_element().map(FieldElem::field)
    }
}

impl From<i64> for Ca {
    fn from(n: i64) -> Self {
        Self::Number(Qi::from_i64(n))
    }
}

impl From<Q> for Ca {
    fn from(q: Q) -> Self {
        Self::Number(Qi::from_q(q))
    }
}

impl From<Qi> for Ca {
    fn from(z: Qi) -> Self {
        Self::Number(z)
    }
}
