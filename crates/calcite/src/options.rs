//! Context configuration.

/// Limits used by a [`CaCtx`](crate::CaCtx).
///
/// # Example
///
/// ```
/// use calcite::CaOptions;
///
/// let opts = CaOptions::default()
///     .with_cyclotomic_degree_limit(8)
///     .with_rewrite_depth_limit(Some(32));
/// assert_eq!(opts.cyclotomic_degree_limit, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaOptions {
    /// Largest `φ(q)` tried when searching for a cyclotomic form.
    pub cyclotomic_degree_limit: u32,
    /// Largest degree of an algebraic value created automatically.
    ///
    /// Above it, `exp(r·π·i)` stays a formal exponential.
    pub qqbar_degree_limit: usize,
    /// Scaling, in bits, of the integer relation lattice.
    pub lll_scale_bits: u32,
    /// Nesting level at which the rewriter stops and copies nodes.
    ///
    /// `None` means no limit.
    pub rewrite_depth_limit: Option<usize>,
}

impl Default for CaOptions {
    fn default() -> Self {
        Self {
            cyclotomic_degree_limit: 24,
            qqbar_degree_limit: 16,
            lll_scale_bits: 36,
            rewrite_depth_limit: None,
        }
    }
}

impl CaOptions {
    /// Sets the cyclotomic search limit.
    #[must_use]
    pub fn with_cyclotomic_degree_limit(mut self, limit: u32) -> Self {
        self.cyclotomic_degree_limit = limit;
        self
    }

    /// Sets the degree limit for automatic algebraic values.
    #[must_use]
    pub fn with_qqbar_degree_limit(mut self, limit: usize) -> Self {
        self.qqbar_degree_limit = limit;
        self
    }

    /// Sets the lattice scaling.
    #[must_use]
    pub fn with_lll_scale_bits(mut self, bits: u32) -> Self {
        self.lll_scale_bits = bits;
        self
    }

    /// Sets the rewriter nesting limit.
    #[must_use]
    pub fn with_rewrite_depth_limit(mut self, limit: Option<usize>) -> Self {
        self.rewrite_depth_limit = limit;
        self
    }
}
