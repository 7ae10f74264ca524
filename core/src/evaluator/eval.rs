//! Core evaluation logic.

use std::sync::Arc;

use hashbrown::HashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    api::{Context, ExecutionOptions},
    evaluator::{EvalError, EvalErrorKind, operators},
    guard,
    parser::{BinaryOp, Expr, ExprKind, Literal, Span},
    registry::TrustedRegistry,
    scope_stack::{LocalScope, ScopeStack},
    stack::ensure_sufficient_stack,
    stdlib,
    values::{Callable, FunctionId, LambdaFunction, Value, function::FunctionKind},
};

/// Arguments of a single call. Most calls take few arguments.
type Args = SmallVec<[Value; 4]>;

/// Tree-walking evaluator for one top-level evaluation.
///
/// Closures defined while evaluating are trusted for the lifetime of the
/// evaluator only; the set is dropped with it.
pub struct Evaluator<'a> {
    options: &'a ExecutionOptions,
    registry: &'a TrustedRegistry,
    context: &'a Context,
    closures: HashSet<FunctionId>,
    scope_stack: ScopeStack<Value>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        options: &'a ExecutionOptions,
        registry: &'a TrustedRegistry,
        context: &'a Context,
    ) -> Self {
        let mut scope_stack = ScopeStack::new();
        scope_stack.push(LocalScope::new());

        Self {
            options,
            registry,
            context,
            closures: HashSet::new(),
            scope_stack,
            depth: 0,
        }
    }

    /// Evaluate an expression tree.
    pub fn eval(mut self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr)
    }

    /// Evaluate an expression node.
    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(error_at(
                expr,
                EvalErrorKind::DepthExceeded {
                    depth: self.depth + 1,
                    max_depth: self.options.max_depth,
                },
            ));
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_expr_inner(expr));
        self.depth -= 1;

        result
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(match literal {
                Literal::Number(n) => Value::Number(*n),
                Literal::Str(s) => Value::from(s.as_str()),
                Literal::Bool(b) => Value::Boolean(*b),
            }),

            ExprKind::Ident(name) => self.lookup(name).ok_or_else(|| {
                error_at(
                    expr,
                    EvalErrorKind::UnknownIdentifier { name: name.clone() },
                )
            }),

            ExprKind::Unary { op, expr: operand } => {
                let value = self.eval_expr(operand)?;
                operators::eval_unary(*op, &value).map_err(|kind| error_at(expr, kind))
            }

            ExprKind::Binary { op, left, right } => {
                let left_val = self.eval_expr(left)?;

                // Short-circuit evaluation
                match op {
                    BinaryOp::And if !left_val.is_truthy() => return Ok(Value::Boolean(false)),
                    BinaryOp::Or if left_val.is_truthy() => return Ok(Value::Boolean(true)),
                    _ => {}
                }

                let right_val = self.eval_expr(right)?;
                operators::eval_binary(*op, &left_val, &right_val)
                    .map_err(|kind| error_at(expr, kind))
            }

            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                // Only the taken branch is evaluated
                if self.eval_expr(cond)?.is_truthy() {
                    self.eval_expr(then_branch)
                } else {
                    self.eval_expr(else_branch)
                }
            }

            ExprKind::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element)?);
                }
                Ok(Value::from(values))
            }

            ExprKind::Member { object, property } => {
                let object_val = self.eval_expr(object)?;
                object_val
                    .member(property)
                    .map_err(|kind| error_at(expr, kind))
            }

            ExprKind::Index { object, index } => {
                let object_val = self.eval_expr(object)?;
                let index_val = self.eval_expr(index)?;
                index_value(&object_val, &index_val).map_err(|kind| error_at(expr, kind))
            }

            ExprKind::Call { callee, args } => self.eval_call(expr, callee, args),

            ExprKind::FunctionDef(def) => {
                let captures = self.scope_stack.snapshot();
                let closure = Callable::lambda(LambdaFunction::new(Arc::clone(def), captures));
                trace!(
                    name = %def.name,
                    id = %closure.id(),
                    params = def.params.len(),
                    "defined closure"
                );

                self.closures.insert(closure.id());
                let value = Value::Callable(closure);
                self.bind(&def.name, value.clone(), &expr.span)?;
                Ok(value)
            }

            ExprKind::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.bind(name, value.clone(), &expr.span)?;
                Ok(value)
            }

            ExprKind::MemberAssign { target, .. } => self.eval_member_assign(target),

            ExprKind::Sequence(items) => {
                let Some((last, init)) = items.split_last() else {
                    return Err(error_at(
                        expr,
                        EvalErrorKind::type_mismatch("empty sequence"),
                    ));
                };
                for item in init {
                    self.eval_expr(item)?;
                }
                self.eval_expr(last)
            }
        }
    }

    /// Locals (innermost first), then the host context, then registered
    /// functions, then the standard constants.
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.scope_stack.lookup(name) {
            return Some(value.clone());
        }
        if let Some(value) = self.context.get(name) {
            return Some(value.clone());
        }
        if let Some(callable) = self.registry.lookup(name) {
            return Some(Value::Callable(callable.clone()));
        }
        stdlib::constant(name)
    }

    fn bind(&mut self, name: &str, value: Value, span: &Span) -> Result<(), EvalError> {
        self.scope_stack.bind_in_current(name, value).map_err(|_| {
            EvalError::new(
                EvalErrorKind::ReadOnly {
                    name: name.to_string(),
                },
                span.clone(),
            )
        })
    }

    fn eval_call(&mut self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Result<Value, EvalError> {
        let callable = match self.eval_expr(callee)? {
            Value::Callable(callable) => callable,
            other => {
                return Err(error_at(
                    callee,
                    EvalErrorKind::NotCallable {
                        callee: callee.describe(),
                        found: other.type_name(),
                    },
                ));
            }
        };

        let mut values = Args::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        let callee_name = callee.describe();
        guard::check_call(&callee_name, &callable, self.registry, &self.closures)
            .map_err(|kind| error_at(expr, kind))?;

        if !callable.arity().accepts(values.len()) {
            return Err(error_at(
                expr,
                EvalErrorKind::ArityMismatch {
                    callee: callee_name,
                    expected: callable.arity(),
                    found: values.len(),
                },
            ));
        }

        trace!(
            callee = %callee_name,
            id = %callable.id(),
            args = values.len(),
            "calling function"
        );
        match callable.kind() {
            FunctionKind::Native(native) => {
                native.call(&values).map_err(|kind| error_at(expr, kind))
            }
            FunctionKind::Lambda(lambda) => self.call_lambda(&callable, lambda, values),
        }
    }

    /// Run a closure body on a fresh scope stack: its captures, then one
    /// local scope holding its own name (for recursion) and its parameters.
    fn call_lambda(
        &mut self,
        callable: &Callable,
        lambda: &LambdaFunction,
        args: Args,
    ) -> Result<Value, EvalError> {
        let locals: LocalScope<Value> =
            core::iter::once((lambda.name().to_string(), Value::Callable(callable.clone())))
                .chain(lambda.params().iter().cloned().zip(args))
                .collect();

        let mut frames = ScopeStack::new();
        frames.push(lambda.captures().clone());
        frames.push(locals);

        let caller_frames = core::mem::replace(&mut self.scope_stack, frames);
        let result = self.eval_expr(lambda.body());
        self.scope_stack = caller_frames;
        result
    }

    /// Assignment into a member or index. Host values are never mutated, but
    /// the target path is evaluated and every member name on it checked
    /// first, so denied names are reported as such.
    fn eval_member_assign(&mut self, target: &Expr) -> Result<Value, EvalError> {
        let property = match &target.kind {
            ExprKind::Member { object, property } => {
                self.eval_expr(object)?;
                Some(property.clone())
            }
            ExprKind::Index { object, index } => {
                self.eval_expr(object)?;
                match self.eval_expr(index)? {
                    Value::String(key) => Some(key.to_string()),
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(property) = property {
            guard::check_member(&property).map_err(|kind| error_at(target, kind))?;
        }

        Err(error_at(
            target,
            EvalErrorKind::ReadOnly {
                name: target.describe(),
            },
        ))
    }
}

fn error_at(expr: &Expr, kind: EvalErrorKind) -> EvalError {
    EvalError::new(kind, expr.span.clone())
}

/// `object[index]`: integer positions into arrays, guarded string keys into
/// anything else.
fn index_value(object: &Value, index: &Value) -> Result<Value, EvalErrorKind> {
    match (object, index) {
        (Value::Array(items), Value::Number(n)) => {
            if n.fract() != 0.0 || n.is_nan() {
                return Err(EvalErrorKind::type_mismatch(format!(
                    "array index must be an integer, got {n}"
                )));
            }
            if *n < 0.0 || *n >= items.len() as f64 {
                return Err(EvalErrorKind::IndexOutOfBounds {
                    index: *n as i64,
                    len: items.len(),
                });
            }
            Ok(items[*n as usize].clone())
        }
        (object, Value::String(key)) => object.member(key),
        (object, index) => Err(EvalErrorKind::type_mismatch(format!(
            "cannot index a {} with a {}",
            object.type_name(),
            index.type_name()
        ))),
    }
}
