//! The user-confirmation capability consulted by guards.
//!
//! Guards never prompt the user themselves. The router owns one [`Confirm`]
//! implementation and hands it to every guard it runs, so a desktop shell can
//! plug in a modal dialog, a terminal app can read stdin, and tests can
//! script the answers.
//!
//! | Type | Answer |
//! |------|--------|
//! | [`AlwaysConfirm`] | always yes |
//! | [`NeverConfirm`] | always no |
//! | [`FnConfirm`] | whatever the closure returns (see [`confirm_fn`]) |
//! | [`ScriptedConfirm`] | queued answers, records every prompt |

use std::cell::RefCell;
use std::collections::VecDeque;

/// A synchronous yes/no question put to the user.
///
/// Implementations block until the user answers. Returning `true` means the
/// user agreed.
pub trait Confirm {
    /// Ask `message` and return the user's answer.
    fn confirm(&self, message: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for &C {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

impl<C: Confirm + ?Sized> Confirm for std::rc::Rc<C> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Answers yes to every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Answers no to every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

/// Create a [`Confirm`] from a closure.
///
/// ```
/// use guard_navigator::{confirm_fn, Confirm};
///
/// let confirm = confirm_fn(|message| message.starts_with("Are you"));
/// assert!(confirm.confirm("Are you logged in?"));
/// assert!(!confirm.confirm("Leave anyway?"));
/// ```
pub const fn confirm_fn<F>(f: F) -> FnConfirm<F>
where
    F: Fn(&str) -> bool,
{
    FnConfirm { f }
}

/// Confirmation backed by a closure, created by [`confirm_fn`].
pub struct FnConfirm<F> {
    f: F,
}

impl<F> Confirm for FnConfirm<F>
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        (self.f)(message)
    }
}

/// Deterministic test double: replays queued answers and records prompts.
///
/// When the queue runs dry the fallback answer is used (`false` unless set
/// with [`with_fallback`](Self::with_fallback)).
///
/// ```
/// use guard_navigator::{Confirm, ScriptedConfirm};
///
/// let confirm = ScriptedConfirm::new([true, false]);
/// assert!(confirm.confirm("first?"));
/// assert!(!confirm.confirm("second?"));
/// assert!(!confirm.confirm("third?"));
/// assert_eq!(confirm.prompts(), vec!["first?", "second?", "third?"]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    prompts: RefCell<Vec<String>>,
    fallback: bool,
}

impl ScriptedConfirm {
    /// Create a script that answers with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            prompts: RefCell::new(Vec::new()),
            fallback: false,
        }
    }

    /// Set the answer given once the queue is empty.
    pub fn with_fallback(mut self, answer: bool) -> Self {
        self.fallback = answer;
        self
    }

    /// Queue another answer.
    pub fn push_answer(&self, answer: bool) {
        self.answers.borrow_mut().push_back(answer);
    }

    /// All prompts asked so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Number of prompts asked so far.
    pub fn prompt_count(&self) -> usize {
        self.prompts.borrow().len()
    }

    /// Number of queued answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_constant_answers() {
        assert!(AlwaysConfirm.confirm("?"));
        assert!(!NeverConfirm.confirm("?"));
    }

    #[test]
    fn test_scripted_fallback() {
        let confirm = ScriptedConfirm::new([false]).with_fallback(true);
        assert!(!confirm.confirm("a"));
        assert!(confirm.confirm("b"));
        assert_eq!(confirm.prompt_count(), 2);
        assert_eq!(confirm.remaining(), 0);
    }

    #[test]
    fn test_scripted_push_answer() {
        let confirm = ScriptedConfirm::default();
        confirm.push_answer(true);
        assert_eq!(confirm.remaining(), 1);
        assert!(confirm.confirm("a"));
    }

    #[test]
    fn test_shared_through_rc() {
        let script = Rc::new(ScriptedConfirm::new([true]));
        let boxed: Box<dyn Confirm> = Box::new(Rc::clone(&script));
        assert!(boxed.confirm("shared?"));
        assert_eq!(script.prompts(), vec!["shared?"]);
    }
}
