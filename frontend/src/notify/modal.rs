//! Modal dialog controller.
//!
//! A single dialog is shared by the whole site. Opening it replaces its
//! content; there is no stacking.

use leptos::*;

use crate::router::project_by_key;

/// Dialog shown after a successful signup.
pub const CONFIRMATION_TITLE: &str = "Cadastro recebido";
pub const CONFIRMATION_TEXT: &str =
    "Obrigado por se cadastrar! Nossa equipe entrará em contato em breve.";

const DEFAULT_PROJECT_TITLE: &str = "Detalhes do Projeto";
const DEFAULT_PROJECT_TEXT: &str = "Informações adicionais sobre o projeto.";

/// Content and visibility of the dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalState {
    pub open: bool,
    pub title: String,
    pub text: String,
}

/// Title and text for a project's detail dialog. Unknown keys get a
/// generic description.
pub fn project_details(key: &str) -> (&'static str, &'static str) {
    project_by_key(key)
        .map(|p| (p.detail_title, p.detail_text))
        .unwrap_or((DEFAULT_PROJECT_TITLE, DEFAULT_PROJECT_TEXT))
}

/// Handle for opening and closing the dialog.
#[derive(Clone, Copy)]
pub struct ModalController {
    state: RwSignal<ModalState>,
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(ModalState::default()),
        }
    }

    pub fn state(&self) -> ReadSignal<ModalState> {
        self.state.read_only()
    }

    pub fn open(&self, title: impl Into<String>, text: impl Into<String>) {
        let (title, text) = (title.into(), text.into());
        self.state.set(ModalState { open: true, title, text });
    }

    pub fn open_confirmation(&self) {
        self.open(CONFIRMATION_TITLE, CONFIRMATION_TEXT);
    }

    pub fn open_project(&self, key: &str) {
        let (title, text) = project_details(key);
        self.open(title, text);
    }

    pub fn close(&self) {
        self.state.update(|s| s.open = false);
    }

    pub fn is_open(&self) -> bool {
        self.state.with_untracked(|s| s.open)
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}
