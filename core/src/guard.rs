//! Security guard consulted inline by the evaluator.
//!
//! The guard has exactly two checks:
//!
//! - [`check_member`] refuses prototype-chain member names. It runs before
//!   every member read and every string-keyed index, at any depth, including
//!   in assignment targets.
//! - [`check_call`] refuses to invoke a callable whose identity is neither in
//!   the engine's [`TrustedRegistry`] nor among the closures created by the
//!   running evaluation. Names and access paths are never consulted.
//!
//! The guard does not protect the host from a dangerous function the host
//! itself registers.

use hashbrown::HashSet;
use tracing::warn;

use crate::evaluator::EvalErrorKind;
use crate::registry::TrustedRegistry;
use crate::values::{Callable, FunctionId};

/// Member names that can never be read or assigned.
pub const DENIED_MEMBERS: [&str; 3] = ["__proto__", "constructor", "prototype"];

pub fn is_denied_member(name: &str) -> bool {
    DENIED_MEMBERS.contains(&name)
}

pub fn check_member(name: &str) -> Result<(), EvalErrorKind> {
    if is_denied_member(name) {
        warn!(member = name, "denied access to prototype member");
        return Err(EvalErrorKind::ProtoAccessDenied {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// `callee` is only used for reporting; the decision is made on identity.
pub fn check_call(
    callee: &str,
    callable: &Callable,
    registry: &TrustedRegistry,
    closures: &HashSet<FunctionId>,
) -> Result<(), EvalErrorKind> {
    let id = callable.id();
    if registry.contains(id) || closures.contains(&id) {
        return Ok(());
    }

    warn!(
        callee,
        function = callable.name(),
        id = %id,
        "denied call to untrusted function"
    );
    Err(EvalErrorKind::CallNotAllowed {
        callee: callee.to_string(),
    })
}
