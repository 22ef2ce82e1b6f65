//! Form validation.
//!
//! Turns constraint flags into user-facing messages and drives the error
//! display through an [`ErrorSink`]. Nothing here touches the DOM: the
//! browser glue in [`crate::forms`] builds [`FieldSnapshot`]s from the live
//! inputs and hands in a sink that writes to the page.
//!
//! # Message precedence
//!
//! 1. missing value
//! 2. type mismatch (email gets its own wording)
//! 3. pattern mismatch (field hint, else generic)
//! 4. too long
//! 5. any other invalid state
//! 6. CPF must have exactly 11 digits

pub mod fields;

pub use fields::*;

pub const MSG_REQUIRED: &str = "Campo obrigatório.";
pub const MSG_EMAIL: &str = "Informe um e-mail válido.";
pub const MSG_FORMAT: &str = "Formato inválido.";
pub const MSG_TOO_LONG: &str = "Texto muito longo.";
pub const MSG_CPF: &str = "CPF inválido (11 dígitos).";
pub const MSG_INVALID: &str = "Campo inválido.";

/// Constraint flags, mirroring the browser's `ValidityState`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validity {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub bad_input: bool,
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_long
            || self.bad_input)
    }

    /// A flag is set if either side sets it.
    pub fn merge(self, other: Validity) -> Validity {
        Validity {
            value_missing: self.value_missing || other.value_missing,
            type_mismatch: self.type_mismatch || other.type_mismatch,
            pattern_mismatch: self.pattern_mismatch || other.pattern_mismatch,
            too_long: self.too_long || other.too_long,
            bad_input: self.bad_input || other.bad_input,
        }
    }
}

/// State of one field at validation time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSnapshot {
    pub id: String,
    /// HTML `type` of the control (`"email"`, `"text"`, ...).
    pub input_type: String,
    pub value: String,
    /// `title` attribute of the control.
    pub hint: Option<String>,
    pub validity: Validity,
}

/// Number of ASCII digits in a CPF once punctuation is stripped.
pub fn cpf_digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Message to show for a field, or `None` if it is valid.
pub fn field_message(field: &FieldSnapshot) -> Option<String> {
    let v = &field.validity;
    let message = if v.value_missing {
        MSG_REQUIRED.to_string()
    } else if v.type_mismatch {
        let message = if field.input_type == "email" { MSG_EMAIL } else { MSG_FORMAT };
        message.to_string()
    } else if v.pattern_mismatch {
        field
            .hint
            .as_deref()
            .filter(|hint| !hint.trim().is_empty())
            .unwrap_or(MSG_FORMAT)
            .to_string()
    } else if v.too_long {
        MSG_TOO_LONG.to_string()
    } else if !v.is_valid() {
        MSG_INVALID.to_string()
    } else if field.id == CPF_FIELD && cpf_digit_count(&field.value) != 11 {
        MSG_CPF.to_string()
    } else {
        return None;
    };
    Some(message)
}

/// Where field errors are displayed.
pub trait ErrorSink {
    /// Attach `message` to the field and mark it invalid.
    fn show(&mut self, field_id: &str, message: &str);
    /// Remove the message and the invalid mark.
    fn clear(&mut self, field_id: &str);
    /// Whether the field currently carries an error.
    fn is_marked(&self, field_id: &str) -> bool;
}

/// Result of validating a whole form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormReport {
    /// First invalid field in document order; receives focus.
    pub first_invalid: Option<String>,
    pub invalid_count: usize,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_count == 0
    }
}

/// Validate every field, showing errors for invalid ones and clearing the rest.
pub fn validate_form(fields: &[FieldSnapshot], sink: &mut impl ErrorSink) -> FormReport {
    let mut report = FormReport::default();
    for field in fields {
        match field_message(field) {
            Some(message) => {
                sink.show(&field.id, &message);
                if report.first_invalid.is_none() {
                    report.first_invalid = Some(field.id.clone());
                }
                report.invalid_count += 1;
            }
            None => sink.clear(&field.id),
        }
    }
    report
}

/// Editing a field drops its error straight away.
pub fn on_field_input(field_id: &str, sink: &mut impl ErrorSink) {
    if sink.is_marked(field_id) {
        sink.clear(field_id);
    }
}

/// Leaving a field that shows an error re-validates it.
pub fn on_field_blur(field: &FieldSnapshot, sink: &mut impl ErrorSink) {
    if !sink.is_marked(&field.id) {
        return;
    }
    match field_message(field) {
        Some(message) => sink.show(&field.id, &message),
        None => sink.clear(&field.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct RecordingSink {
        errors: BTreeMap<String, String>,
    }

    impl ErrorSink for RecordingSink {
        fn show(&mut self, field_id: &str, message: &str) {
            self.errors.insert(field_id.to_string(), message.to_string());
        }

        fn clear(&mut self, field_id: &str) {
            self.errors.remove(field_id);
        }

        fn is_marked(&self, field_id: &str) -> bool {
            self.errors.contains_key(field_id)
        }
    }

    /// Snapshot the donation form the way the browser glue does.
    fn snapshots(values: &[(&str, &str)]) -> Vec<FieldSnapshot> {
        DONATION_FORM
            .iter()
            .map(|spec| {
                let value = values
                    .iter()
                    .find(|(id, _)| *id == spec.id)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_default();
                FieldSnapshot {
                    id: spec.id.to_string(),
                    input_type: spec.kind.as_str().to_string(),
                    validity: spec.evaluate(&value),
                    value,
                    hint: spec.hint.map(str::to_string),
                }
            })
            .collect()
    }

    fn valid_values() -> Vec<(&'static str, &'static str)> {
        vec![
            ("nome", "Ana Silva"),
            ("email", "ana@x.com"),
            ("cpf", "123.456.789-09"),
            ("telefone", "(11) 91234-5678"),
            ("nascimento", "1990-01-01"),
            ("endereco", "Rua A, 1"),
            ("cep", "01000-000"),
            ("cidade", "São Paulo"),
            ("estado", "SP"),
        ]
    }

    #[test]
    fn test_empty_form_flags_every_field() {
        let mut sink = RecordingSink::default();
        let report = validate_form(&snapshots(&[]), &mut sink);

        assert!(!report.is_valid());
        assert_eq!(report.invalid_count, DONATION_FORM.len());
        assert_eq!(report.first_invalid.as_deref(), Some("nome"));
        for spec in DONATION_FORM {
            assert_eq!(sink.errors.get(spec.id).map(String::as_str), Some(MSG_REQUIRED));
        }
    }

    #[test]
    fn test_valid_form_passes_and_clears() {
        let mut sink = RecordingSink::default();
        sink.show("email", MSG_EMAIL);

        let report = validate_form(&snapshots(&valid_values()), &mut sink);

        assert!(report.is_valid());
        assert_eq!(report.first_invalid, None);
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn test_short_cpf_gets_specific_message() {
        // Native flags can pass while the digit count is wrong.
        let field = FieldSnapshot {
            id: CPF_FIELD.to_string(),
            input_type: "text".to_string(),
            value: "123.456.789-0".to_string(),
            hint: Some("Formato: 000.000.000-00".to_string()),
            validity: Validity::default(),
        };
        assert_eq!(field_message(&field).as_deref(), Some(MSG_CPF));
    }

    #[test]
    fn test_cpf_digit_count() {
        assert_eq!(cpf_digit_count("123.456.789-09"), 11);
        assert_eq!(cpf_digit_count("abc"), 0);
    }

    #[test]
    fn test_message_precedence() {
        let mut field = FieldSnapshot {
            id: "email".to_string(),
            input_type: "email".to_string(),
            value: "x".to_string(),
            hint: None,
            validity: Validity { type_mismatch: true, too_long: true, ..Validity::default() },
        };
        assert_eq!(field_message(&field).as_deref(), Some(MSG_EMAIL));

        field.input_type = "url".to_string();
        assert_eq!(field_message(&field).as_deref(), Some(MSG_FORMAT));

        field.validity = Validity { too_long: true, ..Validity::default() };
        assert_eq!(field_message(&field).as_deref(), Some(MSG_TOO_LONG));

        field.validity = Validity { bad_input: true, ..Validity::default() };
        assert_eq!(field_message(&field).as_deref(), Some(MSG_INVALID));
    }

    #[test]
    fn test_pattern_message_uses_hint() {
        let mut values = valid_values();
        values.retain(|(id, _)| *id != "cep");
        values.push(("cep", "01000000"));
        let fields = snapshots(&values);
        let cep = fields.iter().find(|f| f.id == "cep").unwrap();
        assert_eq!(field_message(cep).as_deref(), Some("Formato: 00000-000"));

        let bare = FieldSnapshot { hint: Some("  ".to_string()), ..cep.clone() };
        assert_eq!(field_message(&bare).as_deref(), Some(MSG_FORMAT));
    }

    #[test]
    fn test_input_clears_only_that_field() {
        let mut sink = RecordingSink::default();
        validate_form(&snapshots(&[]), &mut sink);

        on_field_input("email", &mut sink);

        assert!(!sink.is_marked("email"));
        assert_eq!(sink.errors.len(), DONATION_FORM.len() - 1);
        assert!(sink.is_marked("nome"));
    }

    #[test]
    fn test_blur_revalidates_marked_field() {
        let mut sink = RecordingSink::default();
        sink.show("cep", MSG_REQUIRED);

        let fields = snapshots(&[("cep", "0100")]);
        let cep = fields.iter().find(|f| f.id == "cep").unwrap();
        on_field_blur(cep, &mut sink);
        assert_eq!(sink.errors.get("cep").map(String::as_str), Some("Formato: 00000-000"));

        let fields = snapshots(&[("cep", "01000-000")]);
        let cep = fields.iter().find(|f| f.id == "cep").unwrap();
        on_field_blur(cep, &mut sink);
        assert!(!sink.is_marked("cep"));
    }

    #[test]
    fn test_blur_ignores_unmarked_field() {
        let mut sink = RecordingSink::default();
        let fields = snapshots(&[]);
        on_field_blur(&fields[0], &mut sink);
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn test_merge() {
        let native = Validity { value_missing: true, ..Validity::default() };
        let declared = Validity { pattern_mismatch: true, ..Validity::default() };
        let merged = native.merge(declared);
        assert!(merged.value_missing && merged.pattern_mismatch);
        assert!(Validity::default().merge(Validity::default()).is_valid());
    }
}
