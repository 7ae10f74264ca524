//! Stack growth for the recursive parser and evaluator.
//!
//! The depth limits bound how far parsing and evaluation may recurse, but a
//! single level can use several kilobytes of stack in unoptimized builds.
//! Recursive steps run through [`ensure_sufficient_stack`] so that the
//! configured limit is reached before the thread's stack is exhausted, even
//! on small (2 MB) worker threads.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
