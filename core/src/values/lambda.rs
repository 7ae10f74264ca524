//! Closures produced by local function definitions.

use std::sync::Arc;

use super::Value;
use crate::parser::{Expr, FunctionDef};
use crate::scope_stack::CompleteScope;

/// A closure value created by `name(params) = body`.
///
/// The closure owns a snapshot of every local binding visible where it was
/// defined. The snapshot is immutable, so later assignments in the defining
/// scope are not observed by the closure. The host context is not part of
/// the snapshot; it is read live at call time like any other lookup.
pub(crate) struct LambdaFunction {
    def: Arc<FunctionDef>,
    captures: CompleteScope<Value>,
}

impl LambdaFunction {
    pub(crate) fn new(def: Arc<FunctionDef>, captures: CompleteScope<Value>) -> Self {
        Self { def, captures }
    }

    pub(crate) fn name(&self) -> &str {
        &self.def.name
    }

    pub(crate) fn params(&self) -> &[String] {
        &self.def.params
    }

    pub(crate) fn body(&self) -> &Expr {
        &self.def.body
    }

    pub(crate) fn captures(&self) -> &CompleteScope<Value> {
        &self.captures
    }
}
