//! Placeholder rendering for instruction fragments.
//!
//! Each fragment is rendered once, left to right, with its values bound at
//! render time. Substituted values are never rescanned, so a party name that
//! itself contains `[Purpose]` reaches the prompt literally. Bracketed text
//! outside the placeholder vocabulary (e.g. `[OR to destroy]`) is kept as is.

use crate::drafting::context::{Placeholder, PromptBindings};

/// Renders `template` into `out`, replacing every known placeholder token.
pub fn render_into(out: &mut String, template: &str, bindings: &PromptBindings<'_>) {
    let mut rest = template;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let placeholder = candidate
            .find(']')
            .and_then(|close| Placeholder::from_token(&candidate[..=close]).map(|p| (p, close)));

        match placeholder {
            Some((p, close)) => {
                out.push_str(&bindings.value(p));
                rest = &candidate[close + 1..];
            }
            None => {
                // Not a placeholder: keep the bracket and resume just after it,
                // so "[[Purpose]" still resolves the inner token.
                out.push('[');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafting::context::sample_fields;

    fn render(template: &str, bindings: &PromptBindings<'_>) -> String {
        let mut out = String::new();
        render_into(&mut out, template, bindings);
        out
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let fields = sample_fields();
        let b = PromptBindings::new(&fields, "Receiving Party");
        let out = render("[Litigation] ... seat: [Litigation] in [Language]", &b);
        assert_eq!(
            out,
            "Arbitration under ICC Rules, seat in Paris ... seat: \
             Arbitration under ICC Rules, seat in Paris in English"
        );
    }

    #[test]
    fn test_unknown_brackets_pass_through() {
        let fields = sample_fields();
        let b = PromptBindings::new(&fields, "Receiving Party");
        let out = render("return [OR to destroy] within [Duration] months", &b);
        assert_eq!(out, "return [OR to destroy] within 36 months");
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let fields = sample_fields();
        let b = PromptBindings::new(&fields, "Receiving Party");
        assert_eq!(render("see clause [3", &b), "see clause [3");
        assert_eq!(render("a ] b [", &b), "a ] b [");
    }

    #[test]
    fn test_nested_opening_bracket_still_resolves_inner_token() {
        let fields = sample_fields();
        let b = PromptBindings::new(&fields, "Receiving Party");
        assert_eq!(render("[[Party 1 Name]]", &b), "[OCP]");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let mut fields = sample_fields();
        fields.client_name = "Acme [Purpose] Ltd".to_string();
        let b = PromptBindings::new(&fields, "Receiving Party");
        let out = render("[Party 1 Name] for [Purpose]", &b);
        assert_eq!(out, "Acme [Purpose] Ltd for Evaluate a partnership.");
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let fields = sample_fields();
        let b = PromptBindings::new(&fields, "Receiving Party");
        let out = render("Parties’ addresses [Party 1 Type and Address] – ok", &b);
        assert_eq!(
            out,
            "Parties’ addresses Public Company, Casablanca, Morocco – ok"
        );
    }
}
