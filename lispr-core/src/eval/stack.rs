// lispr-core - Native stack growth for deep evaluation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Stack growth for recursive evaluation.
//!
//! Non-tail recursion in lisp code recurses natively through [`eval`],
//! the call helpers and builtins like `map`. The depth limit bounds how
//! far that goes, but the frames it allows can still outgrow a small
//! thread stack in debug builds. Growing the stack on demand keeps the
//! limit the only thing a program can hit.
//!
//! [`eval`]: super::eval

/// Run `f`, first moving to a fresh stack segment if less than the red
/// zone remains.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;
    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM has no stack switching; the depth limit is the only guard there.
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
