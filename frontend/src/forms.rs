//! Browser glue for the donation form.
//!
//! Handlers are delegated from the content region, so they keep working
//! after every content swap without re-binding. The rules themselves live
//! in [`crate::validation`].

use gloo_utils::document;
use leptos::ev::SubmitEvent;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ValidityState,
};

use crate::bootstrap::AppContext;
use crate::config::DONATION_FORM_ID;
use crate::notify::{ModalController, Toaster};
use crate::store::{FormValues, KeyValueStorage, StoreOutcome, SubmissionStore};
use crate::validation::{
    field_spec, on_field_blur, on_field_input, validate_form, ErrorSink, FieldSnapshot, Validity,
};

pub const MSG_FIX_FIELDS: &str = "Por favor corrija os campos destacados.";
pub const MSG_SENT: &str = "Formulário enviado. Obrigado!";

const REQUIRED_CONTROLS: &str = "input[required], textarea[required], select[required]";
const INVALID_CLASS: &str = "invalid";

/// A validatable form control.
enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Control::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Control::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(Control::Select)
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Control::Input(e) => e,
            Control::TextArea(e) => e,
            Control::Select(e) => e,
        }
    }

    fn input_type(&self) -> String {
        match self {
            Control::Input(e) => e.type_(),
            Control::TextArea(_) => "textarea".to_string(),
            Control::Select(_) => "select".to_string(),
        }
    }

    fn value(&self) -> String {
        match self {
            Control::Input(e) => e.value(),
            Control::TextArea(e) => e.value(),
            Control::Select(e) => e.value(),
        }
    }

    fn validity(&self) -> ValidityState {
        match self {
            Control::Input(e) => e.validity(),
            Control::TextArea(e) => e.validity(),
            Control::Select(e) => e.validity(),
        }
    }

    /// Native flags, plus the declared rules when the field is known.
    fn snapshot(&self) -> FieldSnapshot {
        let element = self.element();
        let id = element.id();
        let value = self.value();
        let native = native_validity(&self.validity());
        let validity = match field_spec(&id) {
            Some(spec) => native.merge(spec.evaluate(&value)),
            None => native,
        };
        FieldSnapshot {
            input_type: self.input_type(),
            hint: element.get_attribute("title"),
            id,
            value,
            validity,
        }
    }
}

fn native_validity(state: &ValidityState) -> Validity {
    Validity {
        value_missing: state.value_missing(),
        type_mismatch: state.type_mismatch(),
        pattern_mismatch: state.pattern_mismatch(),
        too_long: state.too_long(),
        bad_input: state.bad_input(),
    }
}

/// Writes field errors into the page.
///
/// A field's message goes into the element with a matching
/// `data-error-for` attribute; the field gets the `invalid` class.
struct DomErrorSink {
    document: Document,
}

impl DomErrorSink {
    fn new() -> Self {
        Self { document: document() }
    }

    fn slot(&self, field_id: &str) -> Option<Element> {
        let selector = format!("[data-error-for=\"{}\"]", field_id);
        self.document.query_selector(&selector).ok().flatten()
    }
}

impl ErrorSink for DomErrorSink {
    fn show(&mut self, field_id: &str, message: &str) {
        if let Some(field) = self.document.get_element_by_id(field_id) {
            _ = field.class_list().add_1(INVALID_CLASS);
            _ = field.set_attribute("aria-invalid", "true");
        }
        if let Some(slot) = self.slot(field_id) {
            slot.set_text_content(Some(message));
        }
    }

    fn clear(&mut self, field_id: &str) {
        if let Some(field) = self.document.get_element_by_id(field_id) {
            _ = field.class_list().remove_1(INVALID_CLASS);
            _ = field.remove_attribute("aria-invalid");
        }
        if let Some(slot) = self.slot(field_id) {
            slot.set_text_content(Some(""));
        }
    }

    fn is_marked(&self, field_id: &str) -> bool {
        self.document
            .get_element_by_id(field_id)
            .map(|field| field.class_list().contains(INVALID_CLASS))
            .unwrap_or(false)
    }
}

fn required_controls(form: &HtmlFormElement) -> Vec<Control> {
    let Ok(nodes) = form.query_selector_all(REQUIRED_CONTROLS) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(Control::from_element)
        .collect()
}

/// Named values of the form, radio groups resolved to their checked value.
fn collect_values(form: &HtmlFormElement) -> FormValues {
    let mut values = FormValues::new();
    let Ok(data) = web_sys::FormData::new_with_form(form) else {
        return values;
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return values;
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            values.insert(name, value);
        }
    }
    values
}

/// Control targeted by `event` if it sits inside the donation form.
fn donation_control(event: &Event) -> Option<Control> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    element
        .closest(&format!("#{}", DONATION_FORM_ID))
        .ok()
        .flatten()?;
    Control::from_element(element)
}

/// Where the outcome of a submission is reported to the user.
pub trait SubmitFeedback {
    /// Short transient message.
    fn notify(&mut self, message: &str);
    /// Show the signup confirmation dialog.
    fn confirm(&mut self);
}

/// Toast and modal of the running page.
struct PageFeedback {
    toaster: Toaster,
    modal: ModalController,
}

impl SubmitFeedback for PageFeedback {
    fn notify(&mut self, message: &str) {
        self.toaster.show(message);
    }

    fn confirm(&mut self) {
        self.modal.open_confirmation();
    }
}

/// What became of a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitResult {
    /// Some field failed; `first_invalid` should receive focus.
    Rejected { first_invalid: String },
    /// All fields passed and the values went to the store.
    Accepted(StoreOutcome),
}

/// Validate `fields` and, if they all pass, store `values` and acknowledge.
///
/// The user sees the same acknowledgement whether or not the store could
/// persist the record.
pub fn submit_donation<S: KeyValueStorage>(
    fields: &[FieldSnapshot],
    values: FormValues,
    store: &SubmissionStore<S>,
    sink: &mut impl ErrorSink,
    feedback: &mut impl SubmitFeedback,
) -> SubmitResult {
    let report = validate_form(fields, sink);
    if let Some(first_invalid) = report.first_invalid {
        log::debug!("Donation form blocked: {} invalid field(s)", report.invalid_count);
        feedback.notify(MSG_FIX_FIELDS);
        return SubmitResult::Rejected { first_invalid };
    }

    let outcome = store.append(values);
    match outcome {
        StoreOutcome::Saved { retained } => log::info!("Submission saved ({} stored)", retained),
        StoreOutcome::NotPersisted => log::warn!("Submission accepted but not persisted"),
    }

    feedback.notify(MSG_SENT);
    feedback.confirm();
    SubmitResult::Accepted(outcome)
}

/// Validate, store and acknowledge a donation form submission.
pub fn handle_submit(ctx: &AppContext, ev: SubmitEvent) {
    let Some(form) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        .filter(|form| form.id() == DONATION_FORM_ID)
    else {
        return;
    };
    ev.prevent_default();

    let controls = required_controls(&form);
    let snapshots: Vec<FieldSnapshot> = controls.iter().map(Control::snapshot).collect();
    let mut feedback = PageFeedback {
        toaster: ctx.toaster,
        modal: ctx.modal,
    };

    match submit_donation(
        &snapshots,
        collect_values(&form),
        &*ctx.store,
        &mut DomErrorSink::new(),
        &mut feedback,
    ) {
        SubmitResult::Rejected { first_invalid } => {
            if let Some(control) = controls.iter().find(|c| c.element().id() == first_invalid) {
                _ = control.element().focus();
            }
        }
        SubmitResult::Accepted(_) => form.reset(),
    }
}

/// Eager clear on edit.
pub fn handle_input(ev: &Event) {
    if let Some(control) = donation_control(ev) {
        on_field_input(&control.element().id(), &mut DomErrorSink::new());
    }
}

/// Re-validate a field showing an error when it loses focus.
pub fn handle_blur(ev: &Event) {
    if let Some(control) = donation_control(ev) {
        on_field_blur(&control.snapshot(), &mut DomErrorSink::new());
    }
}
