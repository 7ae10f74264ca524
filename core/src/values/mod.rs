//! Runtime values.
//!
//! [`Value`] is the closed set of things an expression can produce or read
//! from its context. Objects only expose guarded member reads, and
//! callables carry the identity the trust checks are keyed on.

pub mod function;
mod lambda;
mod object;
mod value;

pub use function::{Arity, Callable, FunctionId, NativeFn, NativeFunction};
pub(crate) use lambda::LambdaFunction;
pub use object::Object;
pub use value::Value;
