//! Pre-persist hook contract.
//!
//! # Responsibility
//! - Define the interception point a store runs before writing a document.
//! - Force every hook to signal completion exactly once.
//!
//! # Invariants
//! - `HookOutcome` can only be built by consuming a `Next`.
//! - A failed outcome stops the chain; later hooks do not run.

use crate::model::document::Document;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Interceptor invoked synchronously before a document is persisted.
///
/// Implementations may read and mutate the document, then must hand back the
/// outcome produced by `next`.
pub trait PrePersistHook: Send + Sync {
    /// Name used in logs and hook errors.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn pre_persist(&self, document: &mut Document, next: Next) -> HookOutcome;
}

impl<F> PrePersistHook for F
where
    F: Fn(&mut Document, Next) -> HookOutcome + Send + Sync,
{
    fn pre_persist(&self, document: &mut Document, next: Next) -> HookOutcome {
        self(document, next)
    }
}

/// Continuation handed to one hook invocation.
#[derive(Debug)]
#[must_use = "a hook must signal completion through `Next`"]
pub struct Next {
    _private: (),
}

impl Next {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Lets the persist operation continue.
    pub fn proceed(self) -> HookOutcome {
        HookOutcome(Ok(()))
    }

    /// Aborts the persist operation with `error`.
    pub fn fail(self, error: HookError) -> HookOutcome {
        HookOutcome(Err(error))
    }
}

/// Completion signal returned by a hook.
#[derive(Debug)]
#[must_use]
pub struct HookOutcome(Result<(), HookError>);

impl HookOutcome {
    pub fn is_proceed(&self) -> bool {
        self.0.is_ok()
    }

    pub fn into_result(self) -> Result<(), HookError> {
        self.0
    }
}

/// Failure reported by one hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    pub hook: String,
    pub message: String,
}

impl HookError {
    pub fn new(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            message: message.into(),
        }
    }
}

impl Display for HookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "pre-persist hook `{}` failed: {}", self.hook, self.message)
    }
}

impl Error for HookError {}

#[cfg(test)]
mod tests {
    use super::{HookError, Next, PrePersistHook};
    use crate::model::document::Document;

    #[test]
    fn closures_are_hooks() {
        let hook = |document: &mut Document, next: Next| {
            document.set("touched", true);
            next.proceed()
        };

        let mut document = Document::new();
        let outcome = hook.pre_persist(&mut document, Next::new());
        assert!(outcome.is_proceed());
        assert!(document.contains("touched"));
        assert_eq!(hook.name(), "anonymous");
    }

    #[test]
    fn fail_carries_the_error() {
        let error = Next::new()
            .fail(HookError::new("guard", "rejected"))
            .into_result()
            .expect_err("fail must produce an error");
        assert_eq!(error.hook, "guard");
        assert_eq!(error.to_string(), "pre-persist hook `guard` failed: rejected");
    }
}
