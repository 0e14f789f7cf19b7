//! Compilation options.

/// Which conversions the compiler may insert between a member's declared
/// type and the caller's requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionPolicy {
    /// Identity plus every numeric conversion, with `as` cast semantics.
    #[default]
    Numeric,
    /// Identity plus conversions that preserve every value.
    Lossless,
    /// The requested type must be the declared type.
    Exact,
}

/// Options shared by every compilation a facade performs.
///
/// ```
/// use reflector_compiler::{CompileOptions, ConversionPolicy};
///
/// let options = CompileOptions::default().with_policy(ConversionPolicy::Lossless);
/// assert_eq!(options.policy, ConversionPolicy::Lossless);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CompileOptions {
    pub policy: ConversionPolicy,
}

impl CompileOptions {
    pub fn with_policy(mut self, policy: ConversionPolicy) -> Self {
        self.policy = policy;
        self
    }
}
