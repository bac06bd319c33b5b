//! Shared handle for consumers that keep editing while a submit is pending

use std::cell::RefCell;
use std::rc::Rc;

use super::field::{FieldValue, FormValues};
use super::form_state::{FormState, SubmitOutcome};
use crate::error::FormError;
use crate::submit::SubmitHandler;

/// Single-threaded handle to a [`FormState`].
///
/// Borrows are held only for the duration of each operation, so while
/// [`SharedForm::submit`] awaits its handler the session can still be
/// edited. The handler works on the snapshot taken when it was called.
#[derive(Debug, Clone)]
pub struct SharedForm {
    inner: Rc<RefCell<FormState>>,
}

impl SharedForm {
    pub fn new(state: FormState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    /// Read the current state
    pub fn read<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn change_field(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.inner.borrow_mut().change_field(name, value)
    }

    pub fn blur_field(&self, name: &str) -> Result<String, FormError> {
        self.inner.borrow_mut().blur_field(name)
    }

    pub fn validate_all(&self) -> bool {
        self.inner.borrow_mut().validate_all()
    }

    pub fn set_values(&self, partial: FormValues) -> Result<(), FormError> {
        self.inner.borrow_mut().set_values(partial)
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.borrow().is_submitting()
    }

    pub fn values(&self) -> FormValues {
        self.inner.borrow().values().clone()
    }

    /// Validate and submit without holding the state across the await
    pub async fn submit<H>(&self, handler: &H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        let pending = self.inner.borrow_mut().begin_submit();
        let Some(values) = pending else {
            return SubmitOutcome::Invalid;
        };
        let result = handler.submit(values).await;
        self.inner.borrow_mut().finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{compose, Check};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    fn shared_form() -> SharedForm {
        let initial: FormValues = [
            ("name".to_string(), FieldValue::text("Al")),
            ("email".to_string(), FieldValue::text("al@example.com")),
        ]
        .into_iter()
        .collect();
        SharedForm::new(FormState::new(
            initial,
            compose([
                ("name", vec![Check::required()]),
                ("email", vec![Check::required(), Check::email()]),
            ]),
        ))
    }

    #[tokio::test]
    async fn test_edits_during_submit_do_not_reach_handler() {
        let form = shared_form();
        let gate = Arc::new(Notify::new());
        let seen: Arc<Mutex<Option<FormValues>>> = Arc::new(Mutex::new(None));

        let handler = {
            let gate = Arc::clone(&gate);
            let seen = Arc::clone(&seen);
            move |values: FormValues| {
                let gate = Arc::clone(&gate);
                let seen = Arc::clone(&seen);
                async move {
                    gate.notified().await;
                    *seen.lock().unwrap() = Some(values);
                    Ok::<(), anyhow::Error>(())
                }
            }
        };

        let edit = async {
            while !form.is_submitting() {
                tokio::task::yield_now().await;
            }
            form.change_field("name", "Alice").unwrap();
            assert!(form.is_submitting());
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(form.submit(&handler), edit);

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(!form.is_submitting());
        assert_eq!(form.values()["name"], FieldValue::text("Alice"));
        let submitted = seen.lock().unwrap().clone().unwrap();
        assert_eq!(submitted["name"], FieldValue::text("Al"));
    }

    #[tokio::test]
    async fn test_failed_handler_returns_to_idle() {
        let form = shared_form();
        let handler =
            |_values: FormValues| async { Err::<(), anyhow::Error>(anyhow::anyhow!("timeout")) };

        let outcome = form.submit(&handler).await;

        assert_eq!(outcome, SubmitOutcome::Failed("timeout".to_string()));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_submit_stays_idle() {
        let form = shared_form();
        form.change_field("email", "bad").unwrap();
        let handler = |_values: FormValues| async { Ok::<(), anyhow::Error>(()) };

        assert_eq!(form.submit(&handler).await, SubmitOutcome::Invalid);
        assert!(!form.is_submitting());
        assert!(form.read(|state| state.visible_error("email").is_some()));
    }

    #[test]
    fn test_operations_delegate() {
        let form = shared_form();
        form.change_field("name", "").unwrap();
        assert!(!form.blur_field("name").unwrap().is_empty());
        assert!(!form.validate_all());
        form.reset();
        assert!(form.read(|state| !state.is_dirty()));

        let clone = form.clone();
        clone
            .set_values([("email".to_string(), FieldValue::text("x@y.org"))].into())
            .unwrap();
        assert_eq!(form.values()["email"], FieldValue::text("x@y.org"));
    }
}
