//! Clause Rule Table: the ordered NDA clause topics and their drafting
//! instructions.
//!
//! Table order is document order: the compiler emits one section per topic,
//! top to bottom. The table is built once at startup (built-in, or loaded
//! from `NDA_RULES_PATH`), validated, and then shared read-only.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::drafting::role::RoleKey;

#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid rule table JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rule table has no clause topics")]
    Empty,

    #[error("duplicate clause topic '{0}'")]
    DuplicateTopic(String),

    #[error("clause topic '{topic}' is missing its '{role}' instructions")]
    MissingRoleVariant { topic: String, role: RoleKey },

    #[error("clause topic '{0}' mixes uniform and role-specific instructions")]
    MixedInstructionShapes(String),

    #[error("clause topic '{topic}' has empty instructions{}", role_suffix(.role))]
    EmptyInstruction {
        topic: String,
        role: Option<RoleKey>,
    },
}

fn role_suffix(role: &Option<RoleKey>) -> String {
    role.map(|r| format!(" for role '{r}'")).unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

/// One instruction: a single line, or an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    Text(String),
    List(Vec<String>),
}

impl Instruction {
    /// The bullet lines of this instruction, in order.
    pub fn lines(&self) -> &[String] {
        match self {
            Instruction::Text(text) => std::slice::from_ref(text),
            Instruction::List(items) => items,
        }
    }

    /// True if any bullet would render blank.
    fn has_blank_line(&self) -> bool {
        match self {
            Instruction::Text(text) => text.trim().is_empty(),
            Instruction::List(items) => {
                items.is_empty() || items.iter().any(|i| i.trim().is_empty())
            }
        }
    }
}

/// The three variants of a role-conditioned clause. All three are required.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleVariants {
    pub disclosing: Instruction,
    pub receiving: Instruction,
    pub mutual: Instruction,
}

impl RoleVariants {
    pub fn get(&self, role: RoleKey) -> &Instruction {
        match role {
            RoleKey::Disclosing => &self.disclosing,
            RoleKey::Receiving => &self.receiving,
            RoleKey::Mutual => &self.mutual,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstructionSpec {
    Uniform(Instruction),
    RoleConditioned(RoleVariants),
}

impl InstructionSpec {
    pub fn select(&self, role: RoleKey) -> &Instruction {
        match self {
            InstructionSpec::Uniform(instruction) => instruction,
            InstructionSpec::RoleConditioned(variants) => variants.get(role),
        }
    }

    pub fn is_role_conditioned(&self) -> bool {
        matches!(self, InstructionSpec::RoleConditioned(_))
    }
}

/// One named section of the NDA.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawClauseTopic")]
pub struct ClauseTopic {
    pub name: String,
    /// Documentation only; never emitted into the prompt.
    pub description: String,
    pub spec: InstructionSpec,
}

/// On-disk shape: either `instructions`, or all of `disclosing`/`receiving`/`mutual`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClauseTopic {
    name: String,
    #[serde(default)]
    description: String,
    instructions: Option<Instruction>,
    disclosing: Option<Instruction>,
    receiving: Option<Instruction>,
    mutual: Option<Instruction>,
}

impl TryFrom<RawClauseTopic> for ClauseTopic {
    type Error = RuleTableError;

    fn try_from(raw: RawClauseTopic) -> Result<Self, Self::Error> {
        let any_role = raw.disclosing.is_some() || raw.receiving.is_some() || raw.mutual.is_some();

        let spec = match raw.instructions {
            Some(_) if any_role => return Err(RuleTableError::MixedInstructionShapes(raw.name)),
            Some(instruction) => InstructionSpec::Uniform(instruction),
            None => {
                let missing = |role| RuleTableError::MissingRoleVariant {
                    topic: raw.name.clone(),
                    role,
                };
                InstructionSpec::RoleConditioned(RoleVariants {
                    disclosing: raw.disclosing.ok_or_else(|| missing(RoleKey::Disclosing))?,
                    receiving: raw.receiving.ok_or_else(|| missing(RoleKey::Receiving))?,
                    mutual: raw.mutual.ok_or_else(|| missing(RoleKey::Mutual))?,
                })
            }
        };

        Ok(ClauseTopic {
            name: raw.name,
            description: raw.description,
            spec,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ClauseRuleTable {
    topics: Vec<ClauseTopic>,
}

impl ClauseRuleTable {
    /// Builds a table, rejecting anything the compiler could not render
    /// completely.
    pub fn new(topics: Vec<ClauseTopic>) -> Result<Self, RuleTableError> {
        let table = Self { topics };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RuleTableError> {
        let topics: Vec<ClauseTopic> = serde_json::from_str(json)?;
        Self::new(topics)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleTableError> {
        let json = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        info!(
            "Loaded {} clause topics from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Loads the override at `path` if given, otherwise the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, RuleTableError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let table = Self::builtin();
                table.validate()?;
                Ok(table)
            }
        }
    }

    pub fn validate(&self) -> Result<(), RuleTableError> {
        if self.topics.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut seen = HashSet::new();
        for topic in &self.topics {
            if !seen.insert(topic.name.as_str()) {
                return Err(RuleTableError::DuplicateTopic(topic.name.clone()));
            }

            let empty = |role| RuleTableError::EmptyInstruction {
                topic: topic.name.clone(),
                role,
            };
            match &topic.spec {
                InstructionSpec::Uniform(instruction) => {
                    if instruction.has_blank_line() {
                        return Err(empty(None));
                    }
                }
                InstructionSpec::RoleConditioned(variants) => {
                    for role in RoleKey::ALL {
                        if variants.get(role).has_blank_line() {
                            return Err(empty(Some(role)));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseTopic> {
        self.topics.iter()
    }

    pub fn topic(&self, name: &str) -> Option<&ClauseTopic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// The built-in NDA drafting rules.
    pub fn builtin() -> Self {
        Self {
            topics: builtin_topics(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in NDA drafting rules
// ────────────────────────────────────────────────────────────────────────────

fn one(text: &str) -> Instruction {
    Instruction::Text(text.to_string())
}

fn many(items: &[&str]) -> Instruction {
    Instruction::List(items.iter().map(|s| s.to_string()).collect())
}

fn uniform(name: &str, description: &str, instruction: Instruction) -> ClauseTopic {
    ClauseTopic {
        name: name.to_string(),
        description: description.to_string(),
        spec: InstructionSpec::Uniform(instruction),
    }
}

fn by_role(name: &str, description: &str, variants: RoleVariants) -> ClauseTopic {
    ClauseTopic {
        name: name.to_string(),
        description: description.to_string(),
        spec: InstructionSpec::RoleConditioned(variants),
    }
}

const THIRD_PARTY_DEFINITION: &str = "Add as is : any natural person, legal person, corporate body, non-corporate body or any other entity, not being a Party to the Agreement nor a Representative of any of the Parties";

const PERMITTED_USE: [&str; 2] = [
    "Use Confidential Information only for the defined 'Purpose'.",
    "Do not disclose Confidential Information to any third parties during and after the term of this Agreement.",
];

const STANDARD_EXCLUSIONS: [&str; 4] = [
    "Information that is already public knowledge at the time of disclosure or becomes public through no fault of the Receiving Party.",
    "Information received from a third party without breach of any obligation of confidentiality.",
    "Information already in the Receiving Party's possession before disclosure.",
    "Information independently developed by the Receiving Party without use of or reference to the Disclosing Party's Confidential Information.",
];

const RESPONSIBILITY: &str = "Each Party hereto is fully liable for damages to the other Party for any harm or damage caused to the other Party or that Party’s customers or business partners due to violation of the terms of this Agreement, including for any harm or damage caused by the breaching Party’s Representatives.";

const NOTICES: &str = "Any notifications and statements pursuant to this Agreement shall be made in writing and sent via courier services or via registered mail to the Parties’ addresses [Party 1 Type and Address] for [Party 1 Name] and [Party 2 Type and Address] for [Party 2 Name] set forth in the heading of this Agreement or to the e-mail addresses agreed between the Parties.";

const SAME_STANDARD_OF_CARE: &str = "Each Party undertakes to keep the same standard of care in protecting such other Party’s Confidential Information as a Party normally employs to preserve and safeguard its own Confidential Information.";

const STRICT_NEED_TO_KNOW: &str = "Confidential Information may be disclosed only to those Representatives of the Receiving Party who have a strict need to know such information solely for the purposes of the cooperation, and who are bound by confidentiality obligations no less protective than those in this Agreement.";

const RETURN_OR_DESTROY: &str = "All Confidential Information and any copies thereof shall be returned to the other Party promptly upon written request, or destroyed at the Disclosing Party's option, with a written certificate of destruction provided by the Receiving Party.";

fn builtin_topics() -> Vec<ClauseTopic> {
    vec![
        uniform(
            "Preamble and Parties",
            "The introductory section identifying the parties and effective date.",
            one("Draft a standard preamble for a Non-Disclosure Agreement between [Party 1 Name], [Party 1 Type and Address], and [Party 2 Name], [Party 2 Type and Address]. The effective date should be [Effective Date]. Clearly identify which party is the Disclosing Party and which is the Receiving Party based on the user's role selection. If it's a bilateral agreement, state that both parties will act as Disclosing and Receiving Parties."),
        ),
        uniform(
            "Purpose",
            "The 'Whereas' or 'Background' clause.",
            one("Draft a 'Purpose' clause explaining why the confidential information is being shared. Use the following user-provided purpose: '[Purpose]'."),
        ),
        by_role(
            "Representatives",
            "Definition of who can receive the information.",
            RoleVariants {
                receiving: many(&[
                    "Define 'Representatives' narrowly. Limit the scope strictly to what is needed for the Purpose.",
                    "The Receiving Party's liability for misuse by Representatives should be limited to its employees and directors only. (Mandatory)",
                ]),
                disclosing: many(&[
                    "Define 'Representatives' broadly to include employees, directors, officers, affiliates, and advisors (like banks, accountants).",
                    "The Receiving Party must be held legally responsible for any breach by any of its Representatives. This must be an explicit clause. (Mandatory)",
                ]),
                mutual: one("Draft a fair and balanced definition of 'Representatives', typically including employees, directors, and professional advisors (legal, financial) on a need-to-know basis. Both Parties shall be responsible for breaches by their respective Representatives."),
            },
        ),
        by_role(
            "Confidential Information",
            "The core definition of what is considered confidential.",
            RoleVariants {
                receiving: many(&[
                    "Define 'Confidential Information' narrowly by listing the specific types of information to be shared. (Mandatory)",
                    "Include a clause requiring information to be explicitly marked 'Confidential' to be protected (Optional, but preferred for Recipient).",
                    "Minimum acceptable exclusions are: (a) already public, (b) received from a third party without breach, (c) already in recipient's possession, (d) independently developed. (Mandatory)",
                ]),
                disclosing: many(&[
                    "Define 'Confidential Information' as broadly as possible, covering all forms of information (written, oral, electronic). (Mandatory)",
                    "Ensure oral disclosures are included and must be summarized in writing within a short period (e.g., 15 days) to be protected.",
                    "Refuse any extended or non-standard exclusions. Stick to the basic public domain/prior knowledge exceptions. (Mandatory)",
                ]),
                mutual: one("Draft a broad but fair definition of 'Confidential Information', including oral disclosures. Use standard exclusions that are acceptable to both sides."),
            },
        ),
        by_role(
            "Third-Party",
            "Definition of third-party entities and their obligations.",
            RoleVariants {
                receiving: many(&[THIRD_PARTY_DEFINITION]),
                disclosing: many(&[THIRD_PARTY_DEFINITION]),
                mutual: one(THIRD_PARTY_DEFINITION),
            },
        ),
        by_role(
            "Permitted Use",
            "How the information can be used by the Parties.",
            RoleVariants {
                receiving: many(&PERMITTED_USE),
                disclosing: many(&PERMITTED_USE),
                mutual: one("Both Parties agree to use Confidential Information solely for the Purpose and to protect it from unauthorized disclosure during and after the term of this Agreement."),
            },
        ),
        by_role(
            "Legally Required Disclosure",
            "What happens if the Receiving Party is legally compelled to disclose information.",
            RoleVariants {
                receiving: many(&[
                    "The above provisions are applicable, unless: \n",
                    "a) disclosure is required by binding law and non-disclosure could expose the Party bound by confidentiality to criminal or administrative responsibility or,\n",
                    "b) disclosure is required or indispensable to protect the Party’s interests in judicial or administrative proceedings, \n",
                    "c) in such case provided that the Parties – immediately after being informed on a possible duty or need for disclosure and as far as it will be possible prior to such disclosure - take all reasonable steps to promptly and sufficiently notify each other thereof. \n",
                ]),
                disclosing: many(&[
                    "The above provisions are applicable, unless: \n",
                    "a) disclosure is required by binding law and non-disclosure could expose the Party bound by confidentiality to criminal or administrative responsibility or,\n",
                    "b) in such case provided that the Parties – immediately after being informed on a possible duty or need for disclosure and as far as it will be possible prior to such disclosure - take all reasonable steps to promptly and sufficiently notify each other thereof. \n",
                ]),
                mutual: many(&[
                    "Both Parties agree to notify each other promptly if legally compelled to disclose Confidential Information, and to cooperate in seeking a protective order or other remedy.",
                ]),
            },
        ),
        by_role(
            "Exclusions from Confidential Information",
            "What is not considered confidential.",
            RoleVariants {
                receiving: many(&STANDARD_EXCLUSIONS),
                disclosing: many(&STANDARD_EXCLUSIONS),
                mutual: many(&STANDARD_EXCLUSIONS),
            },
        ),
        by_role(
            "Use of Confidential Information",
            "How the Receiving Party can use the information.",
            RoleVariants {
                receiving: many(&[
                    SAME_STANDARD_OF_CARE,
                    "Confidential Information may be disclosed solely to those Representatives of a Party who have a need to know such information for the purposes of the cooperation.",
                    "All Confidential Information and any copies thereof shall be returned to the other Party promptly upon written request.",
                ]),
                disclosing: many(&[
                    SAME_STANDARD_OF_CARE,
                    STRICT_NEED_TO_KNOW,
                    "The Receiving Party shall not reproduce, copy, or otherwise duplicate any Confidential Information without the prior written consent of the Disclosing Party.",
                    "The Receiving Party agrees to take all necessary steps to safeguard the Confidential Information from loss, theft, unauthorized access, or destruction, and to ensure its secure handling and storage.",
                    RETURN_OR_DESTROY,
                ]),
                mutual: many(&[
                    "Each Party undertakes to keep the same standard of care in protecting the other Party’s Confidential Information as it normally employs to preserve and safeguard its own Confidential Information.",
                    STRICT_NEED_TO_KNOW,
                    RETURN_OR_DESTROY,
                ]),
            },
        ),
        uniform(
            "Duration",
            "The term of the agreement and the survival of confidentiality obligations.",
            many(&[
                "The confidentiality obligations shall remain in effect for [Duration] months from the Effective Date. After this period, the Receiving Party's obligations regarding Confidential Information shall continue indefinitely for any information that remains confidential by its nature.\n",
                "All information provided by the Disclosing Party shall remain the property of the Disclosing Party. The Receiving Party agrees to return [OR to destroy] all Confidential Information to the Disclosing Party within fifteen (15) calendar days of written demand by the Disclosing Party. The risk for the Receiving Party is to remain liable too long so duration should strictly cover the time where Confidential Information will be used.",
            ]),
        ),
        by_role(
            "Responsibility",
            "Who is responsible for breaches by Representatives.",
            RoleVariants {
                receiving: many(&[RESPONSIBILITY]),
                disclosing: many(&[RESPONSIBILITY]),
                mutual: one(RESPONSIBILITY),
            },
        ),
        by_role(
            "Notices",
            "Standard boilerplate clause for notices.",
            RoleVariants {
                receiving: one(NOTICES),
                disclosing: one(NOTICES),
                mutual: one(NOTICES),
            },
        ),
        uniform(
            "Applicable Law and Jurisdiction",
            "The legal framework for the contract.",
            one("The governing law shall be [Applicable Law]. And should apply in any issue arising out of this Agreement."),
        ),
        uniform(
            "Litigation",
            "Dispute resolution mechanism.",
            one(" Any dispute, controversy, or claim arising out of, or in relation to, this Agreement, including the validity, invalidity, breach, or termination thereof, which may not be effectively settled by negotiations, shall be resolved by arbitration in accordance with the [Litigation] in force on the date on which the Notice of Arbitration is submitted in accordance with these Rules. The number of arbitrators shall be one. The seat of the arbitration shall be [Litigation]. The arbitral proceedings shall be conducted in [Language]."),
        ),
        uniform(
            "General Provisions",
            "Boilerplate clauses like 'Modification', 'Non Solicitation', 'Non Assignable'.",
            one("Include standard boilerplate clauses for 'Non Solicitation', 'Modification', and 'Non Assignable'."),
        ),
    ]
}
