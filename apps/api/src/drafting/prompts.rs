// Fixed prompt text for NDA drafting. Clause-specific instructions live in
// the rule table (rules.rs); everything here is role-independent.

/// Opening task statement, emitted before the context summary.
pub const DRAFTING_PREAMBLE: &str = "You are an expert legal AI assistant. \
Your task is to draft a complete Non-Disclosure Agreement based on the following context \
and specific clause-by-clause instructions.";

pub const CONTEXT_HEADING: &str = "**OVERALL CONTEXT:**";

pub const CLAUSES_HEADING: &str = "**DRAFTING INSTRUCTIONS - CLAUSE BY CLAUSE:**";

/// Separator line preceding every clause section and the footer.
pub const SECTION_SEPARATOR: &str = "--- ";

pub const FORMATTING_HEADING: &str = "**FINAL FORMATTING INSTRUCTIONS:**";

/// Global drafting directives appended after the last clause.
pub const GENERAL_DRAFTING_INSTRUCTIONS: &str = r#"
- Use capital letters and bold text for Defined Terms (e.g., **"Confidential Information"**).
- Use capital letters every time a defined term is used subsequently.
- Check all cross-references to ensure they are logical (the LLM should handle this implicitly).
- Ensure professional, clear, and unambiguous legal language throughout.
- The final output should be a single, complete document, ready for signature. Do not include any of these instructions or any commentary in the final text.
"#;
