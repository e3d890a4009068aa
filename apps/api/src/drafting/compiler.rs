//! Prompt Compiler: turns context fields and a role selection into the
//! instruction text sent to the drafting model.
//!
//! Layout: header (preamble + context summary), one section per clause topic
//! in table order, then the global formatting directives. Instruction
//! fragments are rendered with their placeholders bound as they are emitted.
//!
//! Compilation is pure: the same table, fields and role label always yield
//! byte-identical output.

use tracing::debug;

use crate::drafting::context::{ContextFields, PromptBindings};
use crate::drafting::prompts::{
    CLAUSES_HEADING, CONTEXT_HEADING, DRAFTING_PREAMBLE, FORMATTING_HEADING,
    GENERAL_DRAFTING_INSTRUCTIONS, SECTION_SEPARATOR,
};
use crate::drafting::role::RoleKey;
use crate::drafting::rules::{ClauseRuleTable, ClauseTopic};
use crate::drafting::template::render_into;

/// Compiles the full drafting prompt for `role_selection` (a form role label).
pub fn compile_prompt(
    rules: &ClauseRuleTable,
    fields: &ContextFields,
    role_selection: &str,
) -> String {
    let role = RoleKey::resolve(role_selection);
    let bindings = PromptBindings::new(fields, role_selection);

    let mut prompt = String::with_capacity(8 * 1024);

    write_header(&mut prompt, &bindings);
    for topic in rules.iter() {
        write_clause(&mut prompt, topic, role, &bindings);
    }
    write_footer(&mut prompt, &bindings);

    debug!(
        "Compiled NDA prompt: role={}, nature={}, clauses={}, chars={}",
        role,
        bindings.nature.as_str(),
        rules.len(),
        prompt.len()
    );

    prompt
}

/// Context values go in verbatim; only template text is placeholder-rendered.
fn write_header(out: &mut String, b: &PromptBindings<'_>) {
    let f = b.fields;

    out.push('\n');
    out.push_str(DRAFTING_PREAMBLE);
    out.push_str("\n\n");
    out.push_str(CONTEXT_HEADING);
    out.push('\n');

    let duration = duration_months(f.duration);
    let summary: [(&str, &str, &str); 12] = [
        ("This is a ", b.nature.as_str(), " Non-Disclosure Agreement."),
        ("Our Client's Role: ", b.role_label, "."),
        ("Party 1 (Our Client): ", f.client_name.as_str(), ""),
        ("Party 1 Type and Address: ", f.client_type_and_address.as_str(), ""),
        ("Party 2 (Counterparty): ", f.counterparty_name.as_str(), ""),
        ("Party 2 Type and Address: ", f.counterparty_type_and_address.as_str(), ""),
        ("Purpose of Disclosure: ", f.purpose.as_str(), ""),
        ("Applicable Law: ", f.applicable_law.as_str(), ""),
        ("Dispute Resolution (Litigation): ", f.litigation.as_str(), ""),
        ("Duration of Confidentiality: ", duration.as_str(), ""),
        ("Language of the Contract: ", f.language.as_str(), ""),
        ("Effective Date: ", f.effective_date_or_fallback(), ""),
    ];
    for (label, value, suffix) in summary {
        out.push_str("- ");
        out.push_str(label);
        out.push_str(value);
        out.push_str(suffix);
        out.push('\n');
    }

    out.push_str(CLAUSES_HEADING);
    out.push_str("\n\n");
}

fn duration_months(months: u32) -> String {
    format!("{months} months")
}

fn write_clause(out: &mut String, topic: &ClauseTopic, role: RoleKey, b: &PromptBindings<'_>) {
    out.push_str(SECTION_SEPARATOR);
    out.push('\n');
    out.push_str("**Clause Topic: ");
    render_into(out, &topic.name, b);
    out.push_str("**\n");

    for line in topic.spec.select(role).lines() {
        out.push_str("- ");
        render_into(out, line, b);
        out.push('\n');
    }
}

fn write_footer(out: &mut String, b: &PromptBindings<'_>) {
    out.push('\n');
    out.push_str(SECTION_SEPARATOR);
    out.push('\n');
    out.push_str(FORMATTING_HEADING);
    out.push('\n');
    render_into(out, GENERAL_DRAFTING_INSTRUCTIONS, b);
}
