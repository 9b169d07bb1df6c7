// marl-parser - Stack growth for deep recursion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Stack safety for the recursive reader, printer and evaluator.
//!
//! Uses `stacker` to switch to a fresh heap-allocated stack segment when the
//! current one runs low, so nesting is bounded by the explicit depth limits
//! rather than by the host thread's stack size.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
