//! Context fields supplied by the form, and the placeholder vocabulary that
//! binds them into clause instruction templates.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::drafting::role::NatureOfObligations;

/// Literal used wherever the effective date is absent.
pub const EFFECTIVE_DATE_FALLBACK: &str = "Today";

/// Flat set of user-supplied values. Nothing here is validated beyond
/// presence; form-level range checks live in the handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFields {
    pub client_name: String,
    pub client_type_and_address: String,
    pub counterparty_name: String,
    pub counterparty_type_and_address: String,
    pub purpose: String,
    pub applicable_law: String,
    /// Dispute-resolution text, e.g. "Arbitration under ICC Rules, seat in Paris".
    pub litigation: String,
    /// Months of confidentiality.
    pub duration: u32,
    pub language: String,
    /// Free-form; passed through as written.
    #[serde(default)]
    pub effective_date: Option<String>,
}

impl ContextFields {
    pub fn effective_date_or_fallback(&self) -> &str {
        match self.effective_date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => date,
            _ => EFFECTIVE_DATE_FALLBACK,
        }
    }
}

/// A bracketed marker in instruction text replaced by a context value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Party1Name,
    Party2Name,
    Party1TypeAndAddress,
    Party2TypeAndAddress,
    EffectiveDate,
    Party1Role,
    NatureOfObligations,
    Language,
    Duration,
    Purpose,
    ApplicableLaw,
    Litigation,
}

impl Placeholder {
    pub const ALL: [Placeholder; 12] = [
        Placeholder::Party1Name,
        Placeholder::Party2Name,
        Placeholder::Party1TypeAndAddress,
        Placeholder::Party2TypeAndAddress,
        Placeholder::EffectiveDate,
        Placeholder::Party1Role,
        Placeholder::NatureOfObligations,
        Placeholder::Language,
        Placeholder::Duration,
        Placeholder::Purpose,
        Placeholder::ApplicableLaw,
        Placeholder::Litigation,
    ];

    /// The token as it appears in templates, brackets included.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Party1Name => "[Party 1 Name]",
            Placeholder::Party2Name => "[Party 2 Name]",
            Placeholder::Party1TypeAndAddress => "[Party 1 Type and Address]",
            Placeholder::Party2TypeAndAddress => "[Party 2 Type and Address]",
            Placeholder::EffectiveDate => "[Effective Date]",
            Placeholder::Party1Role => "[Party 1 Role]",
            Placeholder::NatureOfObligations => "[Nature of Obligations]",
            Placeholder::Language => "[Language]",
            Placeholder::Duration => "[Duration]",
            Placeholder::Purpose => "[Purpose]",
            Placeholder::ApplicableLaw => "[Applicable Law]",
            Placeholder::Litigation => "[Litigation]",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

/// Everything a template can refer to during one compilation.
#[derive(Debug, Clone, Copy)]
pub struct PromptBindings<'a> {
    pub fields: &'a ContextFields,
    pub role_label: &'a str,
    pub nature: NatureOfObligations,
}

impl<'a> PromptBindings<'a> {
    pub fn new(fields: &'a ContextFields, role_label: &'a str) -> Self {
        Self {
            fields,
            role_label,
            nature: NatureOfObligations::from_role_label(role_label),
        }
    }

    pub fn value(&self, placeholder: Placeholder) -> Cow<'a, str> {
        let f = self.fields;
        match placeholder {
            Placeholder::Party1Name => Cow::Borrowed(f.client_name.as_str()),
            Placeholder::Party2Name => Cow::Borrowed(f.counterparty_name.as_str()),
            Placeholder::Party1TypeAndAddress => {
                Cow::Borrowed(f.client_type_and_address.as_str())
            }
            Placeholder::Party2TypeAndAddress => {
                Cow::Borrowed(f.counterparty_type_and_address.as_str())
            }
            Placeholder::EffectiveDate => Cow::Borrowed(f.effective_date_or_fallback()),
            Placeholder::Party1Role => Cow::Borrowed(self.role_label),
            Placeholder::NatureOfObligations => Cow::Borrowed(self.nature.as_str()),
            Placeholder::Language => Cow::Borrowed(f.language.as_str()),
            Placeholder::Duration => Cow::Owned(f.duration.to_string()),
            Placeholder::Purpose => Cow::Borrowed(f.purpose.as_str()),
            Placeholder::ApplicableLaw => Cow::Borrowed(f.applicable_law.as_str()),
            Placeholder::Litigation => Cow::Borrowed(f.litigation.as_str()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_fields() -> ContextFields {
    ContextFields {
        client_name: "OCP".to_string(),
        client_type_and_address: "Public Company, Casablanca, Morocco".to_string(),
        counterparty_name: "Tech Solutions Inc.".to_string(),
        counterparty_type_and_address: "Private Company, Paris, France".to_string(),
        purpose: "Evaluate a partnership.".to_string(),
        applicable_law: "French Law".to_string(),
        litigation: "Arbitration under ICC Rules, seat in Paris".to_string(),
        duration: 36,
        language: "English".to_string(),
        effective_date: None,
    }
}
