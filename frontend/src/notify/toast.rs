//! Toast notifier.
//!
//! Every message gets a token. A hide timer only hides the toast if its
//! token is still the current one, so an older timer cannot cut a newer
//! message short.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::config::TOAST_DURATION_MS;

/// What the toast element shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub message: String,
    pub visible: bool,
    token: u64,
}

impl ToastState {
    /// Display `message` and return the token for its hide timer.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.token += 1;
        self.message = message.into();
        self.visible = true;
        self.token
    }

    /// Hide the toast if `token` still belongs to the displayed message.
    pub fn expire(&mut self, token: u64) -> bool {
        if token != self.token || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    /// Whether any message has been shown yet.
    pub fn is_created(&self) -> bool {
        self.token > 0
    }
}

/// Handle for showing toasts.
#[derive(Clone, Copy)]
pub struct Toaster {
    state: RwSignal<ToastState>,
    duration_ms: u32,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(ToastState::default()),
            duration_ms: TOAST_DURATION_MS,
        }
    }

    pub fn state(&self) -> ReadSignal<ToastState> {
        self.state.read_only()
    }

    pub fn show(&self, message: impl Into<String>) {
        self.show_for(message, self.duration_ms);
    }

    pub fn show_for(&self, message: impl Into<String>, duration_ms: u32) {
        let message = message.into();
        log::debug!("Toast: {}", message);

        let mut token = 0;
        self.state.update(|s| token = s.show(message));

        let state = self.state;
        Timeout::new(duration_ms, move || {
            state.update(|s| {
                s.expire(token);
            });
        })
        .forget();
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_expire() {
        let mut toast = ToastState::default();
        assert!(!toast.is_created());

        let token = toast.show("Formulário enviado. Obrigado!");
        assert!(toast.is_created());
        assert!(toast.visible);
        assert!(toast.expire(token));
        assert!(!toast.visible);
        assert_eq!(toast.message, "Formulário enviado. Obrigado!");
    }

    #[test]
    fn test_stale_timer_keeps_newer_message() {
        let mut toast = ToastState::default();
        let first = toast.show("primeira");
        let second = toast.show("segunda");

        assert!(!toast.expire(first));
        assert!(toast.visible);
        assert_eq!(toast.message, "segunda");

        assert!(toast.expire(second));
        assert!(!toast.visible);
    }

    #[test]
    fn test_expire_twice() {
        let mut toast = ToastState::default();
        let token = toast.show("x");
        assert!(toast.expire(token));
        assert!(!toast.expire(token));
    }
}
