//! Prompt templates for every variant
//!
//! Each user prompt embeds the exact JSON schema expected back so the model
//! is steered toward machine-parseable output. The debate roster below is
//! part of that contract.

use super::Prompt;
use crate::analysis::PersonaIcon;
use crate::proposal::Committee;
use crate::variant::Variant;

/// Shown instead of an empty responsibilities field in committee listings
pub const NO_RESPONSIBILITIES: &str = "No specific responsibilities listed";

/// Debate archetypes: (name, icon, focus area)
pub const DEBATE_ROSTER: [(&str, PersonaIcon, &str); 4] = [
    (
        "Treasury Guardian",
        PersonaIcon::DollarSign,
        "financial sustainability, budget discipline and treasury risk",
    ),
    (
        "Security Auditor",
        PersonaIcon::Shield,
        "technical soundness, attack surface and operational security",
    ),
    (
        "Community Advocate",
        PersonaIcon::Users,
        "impact on members, fairness and participation",
    ),
    (
        "Protocol Visionary",
        PersonaIcon::Lightbulb,
        "long-term growth, innovation and strategic positioning",
    ),
];

/// Typed inputs for each prompt variant
#[derive(Debug, Clone, Copy)]
pub enum PromptInputs<'a> {
    Analyze {
        title: &'a str,
        description: &'a str,
    },
    Draft {
        idea: &'a str,
    },
    DraftWithCommittee {
        idea: &'a str,
        committees: &'a [Committee],
    },
    Debate {
        title: &'a str,
        content: &'a str,
    },
}

impl PromptInputs<'_> {
    pub fn variant(&self) -> Variant {
        match self {
            PromptInputs::Analyze { .. } => Variant::Analyze,
            PromptInputs::Draft { .. } => Variant::Draft,
            PromptInputs::DraftWithCommittee { .. } => Variant::DraftWithCommittee,
            PromptInputs::Debate { .. } => Variant::Debate,
        }
    }
}

/// Templates for generating prompts for each variant
pub struct PromptTemplate;

impl PromptTemplate {
    /// Build the system and user prompt for the given inputs.
    pub fn build(inputs: &PromptInputs<'_>) -> Prompt {
        let user = match *inputs {
            PromptInputs::Analyze { title, description } => {
                Self::analysis_prompt(title, description)
            }
            PromptInputs::Draft { idea } => Self::draft_prompt(idea),
            PromptInputs::DraftWithCommittee { idea, committees } => {
                Self::committee_draft_prompt(idea, committees)
            }
            PromptInputs::Debate { title, content } => Self::debate_prompt(title, content),
        };

        Prompt {
            variant: inputs.variant(),
            system: Self::system(inputs.variant()),
            user,
        }
    }

    /// System prompt for a variant
    pub fn system(variant: Variant) -> &'static str {
        match variant {
            Variant::Analyze => {
                "You are a professional DAO governance analyst who specializes in analyzing \
                 proposals and providing valuable recommendations. Always provide consistent, \
                 structured responses in valid JSON format."
            }
            Variant::Draft | Variant::DraftWithCommittee => {
                "You are an experienced DAO governance writer who turns rough ideas into clear, \
                 actionable proposals. Always respond with valid JSON only."
            }
            Variant::Debate => {
                "You simulate a DAO governance debate between distinct member personas. Each \
                 persona argues from its own perspective. Always respond with valid JSON only."
            }
        }
    }

    /// User prompt for proposal analysis
    pub fn analysis_prompt(title: &str, description: &str) -> String {
        format!(
            r#"Please analyze the following DAO proposal and provide a detailed analysis report:

Proposal Title: {}
Proposal Description: {}

Please analyze from the following perspectives:

1. Summary: Summarize the core content of the proposal in simple and understandable language

2. Risk Assessment: Analyze the potential risks and challenges. Format as a single text string with numbered points (1. First risk, 2. Second risk, etc.)

3. Recommendations: Provide specific improvement suggestions or precautions. Format as a single text string with numbered points (1. First recommendation, 2. Second recommendation, etc.)

4. Complexity Analysis: Provide a comprehensive complexity assessment:
   - Overall Complexity Score (1-10): Average of all complexity dimensions
   - Technical Complexity (1-10): How technically challenging is implementation? Consider:
     * Code changes required, smart contract complexity, integration challenges
     * 1-3: Simple parameter changes, basic operations
     * 4-6: Moderate development work, standard integrations
     * 7-10: Complex architecture changes, novel technical solutions
   - Financial Complexity (1-10): How complex are the financial/economic aspects? Consider:
     * Budget size, funding mechanisms, tokenomics changes
     * 1-3: Simple budget allocations, standard payments
     * 4-6: Multi-phase funding, moderate economic impact
     * 7-10: Complex tokenomics, major economic restructuring
   - Governance Complexity (1-10): How complex are the governance/legal aspects? Consider:
     * Voting mechanisms, legal implications, regulatory considerations
     * 1-3: Standard proposals within existing framework
     * 4-6: Minor governance changes, moderate legal review needed
     * 7-10: Major governance restructuring, complex legal implications
   - Timeline Complexity (1-10): How complex is coordination and execution timeline? Consider:
     * Dependencies, coordination requirements, milestone complexity
     * 1-3: Single-step execution, minimal coordination
     * 4-6: Multi-phase execution, moderate dependencies
     * 7-10: Complex multi-stakeholder coordination, long-term execution

5. Estimated Impact: Evaluate the potential impact of the proposal on the DAO

Please return the result in JSON format without wrapping it in Markdown formatting:
{{
    "summary": "Summary of the proposal",
    "risk_assessment": "1. First risk point 2. Second risk point 3. Third risk point",
    "recommendations": "1. First recommendation 2. Second recommendation 3. Third recommendation",
    "complexity_score": 5.5,
    "complexity_breakdown": {{
        "technical_complexity": 6.0,
        "financial_complexity": 4.0,
        "governance_complexity": 7.0,
        "timeline_complexity": 5.0,
        "explanation": "Why each dimension received its score",
        "comparison": "How this compares to typical DAO proposals"
    }},
    "estimated_impact": "Estimated impact on the DAO"
}}"#,
            title, description
        )
    }

    /// User prompt for drafting a proposal from an idea
    pub fn draft_prompt(idea: &str) -> String {
        format!(
            r#"Turn the following idea into a complete DAO governance proposal:

Idea: {}

Write:
1. Title: A concise, descriptive proposal title
2. Summary: Two or three sentences describing what the proposal does
3. Rationale: Why the DAO should adopt it, including expected benefits
4. Specifications: Concrete implementation details, budget and milestones where applicable

{}"#,
            idea,
            Self::draft_schema(false)
        )
    }

    /// User prompt for drafting a proposal and routing it to a committee
    pub fn committee_draft_prompt(idea: &str, committees: &[Committee]) -> String {
        format!(
            r#"Turn the following idea into a complete DAO governance proposal and suggest the committee best suited to review it:

Idea: {}

Available committees:
{}

Write:
1. Title: A concise, descriptive proposal title
2. Summary: Two or three sentences describing what the proposal does
3. Rationale: Why the DAO should adopt it, including expected benefits
4. Specifications: Concrete implementation details, budget and milestones where applicable
5. Committee: The ID of the single most relevant committee from the list above (or null if none fits), and why

{}"#,
            idea,
            Self::committee_lines(committees),
            Self::draft_schema(true)
        )
    }

    /// User prompt for the four-persona debate simulation
    pub fn debate_prompt(title: &str, content: &str) -> String {
        let roster: String = DEBATE_ROSTER
            .iter()
            .enumerate()
            .map(|(i, (name, icon, focus))| {
                format!("{}. {} (icon: \"{}\") - focuses on {}\n", i + 1, name, icon, focus)
            })
            .collect();

        format!(
            r#"Simulate a governance debate about the following DAO proposal before it is submitted:

Proposal Title: {}
Proposal Content: {}

The debate has exactly four personas, in this order:
{}
For each persona provide:
- core_argument: The persona's main position on the proposal in two or three sentences
- objections: The specific concerns this persona raises, as a list of short strings (at least one)
- actionable_suggestion: One concrete change that would address the persona's concerns

Return the result in JSON format without any markdown wrappers:
{{
    "personas": [
        {{
            "name": "Treasury Guardian",
            "icon": "dollarsign",
            "core_argument": "Main position",
            "objections": ["First objection", "Second objection"],
            "actionable_suggestion": "Concrete improvement"
        }}
    ]
}}
The "personas" array must contain exactly four entries."#,
            title, content, roster
        )
    }

    /// One `"<type> (ID: <id>): <responsibilities>"` line per committee
    pub fn committee_lines(committees: &[Committee]) -> String {
        committees
            .iter()
            .map(|c| {
                let responsibilities = if c.responsibilities.trim().is_empty() {
                    NO_RESPONSIBILITIES
                } else {
                    c.responsibilities.trim()
                };
                format!("{} (ID: {}): {}", c.committee_type, c.id, responsibilities)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draft_schema(with_committee: bool) -> String {
        let committee_fields = if with_committee {
            r#",
    "suggested_committee_id": "ID of the chosen committee or null",
    "committee_reasoning": "Why this committee is the best fit""#
        } else {
            ""
        };

        format!(
            r#"Return the result in JSON format without any markdown wrappers:
{{
    "title": "Proposal title",
    "summary": "Short summary",
    "rationale": "Why the DAO should adopt this",
    "specifications": "Implementation details"{}
}}"#,
            committee_fields
        )
    }
}
