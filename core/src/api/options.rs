//! Configuration options for the Sieve engine.

/// Grammar configuration, fixed when the engine (and its parser) is built.
///
/// Optional operators are switched on individually. Disabling an operator
/// turns its syntax into a parse error instead of silently ignoring it.
///
/// # Example
///
/// ```
/// use sieve_core::api::GrammarConfig;
///
/// let grammar = GrammarConfig {
///     fndef: true,
///     ..GrammarConfig::default()
/// };
/// assert!(grammar.assignment);
/// assert!(!grammar.in_operator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConfig {
    /// Local function definitions, `f(x) = expr`.
    ///
    /// Default: false
    pub fndef: bool,

    /// Assignment into local scope, `x = expr`.
    ///
    /// Default: true
    pub assignment: bool,

    /// Array membership, `x in [1, 2, 3]`.
    ///
    /// Default: false
    pub in_operator: bool,

    /// Maximum nesting depth accepted by the parser. Every level of the
    /// resulting tree counts, including left-associative operator chains and
    /// postfix chains such as `a.b.c` or `f()()`.
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            fndef: false,
            assignment: true,
            in_operator: false,
            max_depth: 256,
        }
    }
}

/// Configuration options for expression execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use sieve_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_depth: 64 };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum evaluation depth (nested nodes plus local function calls).
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Configuration options for the Sieve engine.
///
/// # Example
///
/// ```
/// use sieve_core::api::{EngineOptions, ExecutionOptions, GrammarConfig};
///
/// let options = EngineOptions {
///     grammar: GrammarConfig {
///         fndef: true,
///         ..GrammarConfig::default()
///     },
///     execution: ExecutionOptions { max_depth: 500 },
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Grammar used by every expression compiled with the engine.
    pub grammar: GrammarConfig,

    /// Default options for execution.
    ///
    /// These can be overridden with `CompiledExpression::run_with_options()`.
    pub execution: ExecutionOptions,
}

impl EngineOptions {
    /// Default options with the `fndef` extension switched on.
    pub fn with_fndef() -> Self {
        Self {
            grammar: GrammarConfig {
                fndef: true,
                ..GrammarConfig::default()
            },
            ..Self::default()
        }
    }
}
