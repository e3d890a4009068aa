// NDA drafting: clause rule table, role resolution, and the prompt compiler.
// The compiler is pure; the only model call is in handlers, via ContractDrafter.

pub mod compiler;
pub mod context;
pub mod handlers;
pub mod prompts;
pub mod role;
pub mod rules;
pub mod template;

pub use compiler::compile_prompt;
pub use rules::ClauseRuleTable;
