//! Field declarations for the donation form.
//!
//! The same [`FieldSpec`] list renders the form markup and backs the
//! Rust-side constraint check that is merged with the browser's own
//! `ValidityState`.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::Validity;

/// Email grammar used by `<input type="email">`.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

/// Compiled field patterns, keyed by their source. `None` marks a pattern
/// that does not compile.
static PATTERNS: Lazy<Mutex<HashMap<&'static str, Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Id of the CPF (national ID) field.
pub const CPF_FIELD: &str = "cpf";

/// Name of the donor/volunteer radio group.
pub const PROFILE_FIELD: &str = "perfil";

/// Profile choices as `(value, label)`. The first one is checked by default.
pub const PROFILE_OPTIONS: &[(&str, &str)] = &[("doador", "Doador"), ("voluntario", "Voluntário")];

/// HTML input type of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Date => "date",
        }
    }
}

/// Fieldset a field is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Personal,
    Address,
}

impl Section {
    pub fn legend(self) -> &'static str {
        match self {
            Section::Personal => "Dados Pessoais",
            Section::Address => "Endereço",
        }
    }
}

/// Declared constraints and presentation of one form field.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Element id and form name.
    pub id: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    /// Limit in UTF-16 code units, like `maxlength`.
    pub max_length: Option<usize>,
    /// HTML `pattern`, implicitly anchored. Use `[0-9]` for digits; `\d`
    /// would accept any Unicode digit here.
    pub pattern: Option<&'static str>,
    /// `title` attribute; shown when the pattern does not match.
    pub hint: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub input_mode: Option<&'static str>,
    pub section: Section,
}

impl FieldSpec {
    const fn text(id: &'static str, label: &'static str, section: Section) -> Self {
        Self {
            id,
            label,
            kind: InputKind::Text,
            required: true,
            max_length: None,
            pattern: None,
            hint: None,
            placeholder: None,
            input_mode: None,
            section,
        }
    }

    /// Compute constraint flags for `value` from the declared rules.
    ///
    /// Empty values only ever fail `required`; format rules apply to
    /// non-empty input. Length is counted in UTF-16 code units as the
    /// browser does for `maxlength`.
    pub fn evaluate(&self, value: &str) -> Validity {
        let mut validity = Validity::default();
        if value.is_empty() {
            validity.value_missing = self.required;
            return validity;
        }

        if let Some(max) = self.max_length {
            validity.too_long = value.encode_utf16().count() > max;
        }

        match self.kind {
            InputKind::Email => validity.type_mismatch = !EMAIL.is_match(value),
            InputKind::Date => {
                validity.bad_input = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err();
            }
            InputKind::Text | InputKind::Tel => {}
        }

        if let Some(pattern) = self.pattern {
            validity.pattern_mismatch = !pattern_matches(pattern, value);
        }

        validity
    }
}

/// Match `value` against an HTML `pattern`. Patterns that fail to compile
/// are ignored, like browsers do. Each pattern is compiled once.
fn pattern_matches(pattern: &'static str, value: &str) -> bool {
    let mut cache = match PATTERNS.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };
    let compiled = cache.entry(pattern).or_insert_with(|| compile_pattern(pattern));
    compiled.as_ref().map_or(true, |re| re.is_match(value))
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Ignoring invalid field pattern {:?}: {}", pattern, e);
            None
        }
    }
}

/// Fields of the donation form, in display order.
pub const DONATION_FORM: &[FieldSpec] = &[
    FieldSpec {
        max_length: Some(100),
        ..FieldSpec::text("nome", "Nome completo", Section::Personal)
    },
    FieldSpec {
        kind: InputKind::Email,
        ..FieldSpec::text("email", "E-mail", Section::Personal)
    },
    FieldSpec {
        pattern: Some(r"[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}"),
        hint: Some("Formato: 000.000.000-00"),
        placeholder: Some("000.000.000-00"),
        input_mode: Some("numeric"),
        ..FieldSpec::text(CPF_FIELD, "CPF", Section::Personal)
    },
    FieldSpec {
        kind: InputKind::Tel,
        pattern: Some(r"\([0-9]{2}\)\s?[0-9]{4,5}-[0-9]{4}"),
        hint: Some("Formato: (00) 90000-0000"),
        placeholder: Some("(00) 90000-0000"),
        input_mode: Some("tel"),
        ..FieldSpec::text("telefone", "Telefone", Section::Personal)
    },
    FieldSpec {
        kind: InputKind::Date,
        ..FieldSpec::text("nascimento", "Data de nascimento", Section::Personal)
    },
    FieldSpec::text("endereco", "Endereço", Section::Address),
    FieldSpec {
        pattern: Some(r"[0-9]{5}-[0-9]{3}"),
        hint: Some("Formato: 00000-000"),
        placeholder: Some("00000-000"),
        input_mode: Some("numeric"),
        ..FieldSpec::text("cep", "CEP", Section::Address)
    },
    FieldSpec::text("cidade", "Cidade", Section::Address),
    FieldSpec {
        max_length: Some(2),
        placeholder: Some("SP"),
        ..FieldSpec::text("estado", "Estado", Section::Address)
    },
];

/// Look up a donation form field by element id.
pub fn field_spec(id: &str) -> Option<&'static FieldSpec> {
    DONATION_FORM.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str) -> &'static FieldSpec {
        field_spec(id).unwrap()
    }

    #[test]
    fn test_empty_required_is_missing() {
        for field in DONATION_FORM {
            let validity = field.evaluate("");
            assert!(validity.value_missing, "{} should be required", field.id);
            assert!(!validity.pattern_mismatch);
        }
    }

    #[test]
    fn test_cpf_pattern() {
        assert!(spec("cpf").evaluate("123.456.789-09").is_valid());
        assert!(spec("cpf").evaluate("12345678909").pattern_mismatch);
        assert!(spec("cpf").evaluate("123.456.789-0").pattern_mismatch);
    }

    #[test]
    fn test_phone_accepts_both_lengths() {
        assert!(spec("telefone").evaluate("(11) 91234-5678").is_valid());
        assert!(spec("telefone").evaluate("(11)4002-8922").is_valid());
        assert!(spec("telefone").evaluate("11 91234-5678").pattern_mismatch);
    }

    #[test]
    fn test_cep_pattern() {
        assert!(spec("cep").evaluate("01000-000").is_valid());
        assert!(spec("cep").evaluate("01000000").pattern_mismatch);
    }

    #[test]
    fn test_patterns_only_accept_ascii_digits() {
        assert!(spec("cep").evaluate("٠١٠٠٠-٠٠٠").pattern_mismatch);
        assert!(spec("cpf").evaluate("１２３.４５６.７８９-０９").pattern_mismatch);
        assert!(spec("telefone").evaluate("(١١) 91234-5678").pattern_mismatch);
    }

    #[test]
    fn test_patterns_are_compiled_once() {
        let pattern = spec("cep").pattern.unwrap();
        spec("cep").evaluate("01000-000");
        spec("cep").evaluate("99999-999");
        let cache = PATTERNS.lock().unwrap();
        assert!(matches!(cache.get(pattern), Some(Some(_))));
    }

    #[test]
    fn test_email_format() {
        assert!(spec("email").evaluate("ana@x.com").is_valid());
        assert!(spec("email").evaluate("ana@").type_mismatch);
        assert!(spec("email").evaluate("ana.x.com").type_mismatch);
    }

    #[test]
    fn test_max_length_counts_utf16_units() {
        assert!(spec("estado").evaluate("SP").is_valid());
        assert!(spec("estado").evaluate("SPX").too_long);
        assert!(spec("nome").evaluate(&"ã".repeat(100)).is_valid());
        assert!(spec("nome").evaluate(&"a".repeat(101)).too_long);
        // Astral characters take two code units each.
        assert!(spec("estado").evaluate("😀").is_valid());
        assert!(spec("estado").evaluate("😀😀").too_long);
    }

    #[test]
    fn test_date_must_parse() {
        assert!(spec("nascimento").evaluate("1990-01-01").is_valid());
        assert!(spec("nascimento").evaluate("1990-13-01").bad_input);
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        assert!(pattern_matches("(unclosed", "anything"));
        assert!(compile_pattern("(unclosed").is_none());
    }

    #[test]
    fn test_default_profile_is_donor() {
        assert_eq!(PROFILE_OPTIONS[0].0, "doador");
    }
}
