//! Console output formatter for proposal results

use crate::output::formatter::OutputFormatter;
use crate::panel::{Affordance, PanelState};
use colored::Colorize;
use govmind_domain::{
    AnalysisResult, CommitteeSuggestion, DebateResult, DraftResult, PersonaIcon, ProposalId,
    ProposalRecord, ProposalStatus,
};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_panel(id: &ProposalId, state: &PanelState) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Proposal:".cyan().bold(), id));

        let status = match state {
            PanelState::NotSubmitted => state.label().dimmed(),
            PanelState::Pending => state.label().yellow(),
            PanelState::Analyzing => state.label().blue(),
            PanelState::Analyzed(_) => state.label().green(),
            PanelState::Failed => state.label().red(),
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));

        if let PanelState::Analyzed(analysis) = state {
            output.push('\n');
            output.push_str(&Self::format_analysis_body(analysis));
        }

        match state.affordance() {
            Some(Affordance::Analyze) => output.push_str(&format!(
                "\n{}\n",
                "Submit it with `govmind analyze <title> <description> --id <id>`".dimmed()
            )),
            Some(Affordance::Retry) => output.push_str(&format!(
                "\n{}\n",
                format!("Run `govmind retry {}` to try again", id).dimmed()
            )),
            None => {}
        }

        output
    }

    pub fn format_analysis(id: &ProposalId, analysis: &AnalysisResult) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Proposal Analysis"));
        output.push_str(&format!("\n{} {}\n", "Proposal:".cyan().bold(), id));
        output.push_str(&Self::format_analysis_body(analysis));
        output.push_str(&Self::footer());
        output
    }

    fn format_analysis_body(analysis: &AnalysisResult) -> String {
        let mut output = String::new();
        let breakdown = &analysis.complexity_breakdown;

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("{}\n", analysis.summary));

        output.push_str(&Self::section_header("Complexity"));
        output.push_str(&format!(
            "{} {}\n",
            "Overall:".bold(),
            Self::score(analysis.complexity_score)
        ));
        for (label, value) in [
            ("Technical", breakdown.technical),
            ("Financial", breakdown.financial),
            ("Governance", breakdown.governance),
            ("Timeline", breakdown.timeline),
        ] {
            output.push_str(&format!("  {:<11} {}\n", label, Self::score(value)));
        }
        output.push_str(&format!("\n{}\n", Self::indent(&breakdown.explanation, "  ")));
        output.push_str(&format!("{}\n", Self::indent(&breakdown.comparison, "  ").dimmed()));

        output.push_str(&Self::section_header("Risk Assessment"));
        output.push_str(&format!("{}\n", analysis.risk_assessment));

        output.push_str(&Self::section_header("Recommendations"));
        output.push_str(&format!("{}\n", analysis.recommendations));

        output.push_str(&Self::section_header("Estimated Impact"));
        output.push_str(&format!("{}\n", analysis.estimated_impact));

        output
    }

    pub fn format_draft(draft: &DraftResult) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Proposal Draft"));
        output.push_str(&format!("\n{}\n", draft.title.bold()));
        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("{}\n", draft.summary));
        output.push_str(&Self::section_header("Rationale"));
        output.push_str(&format!("{}\n", draft.rationale));
        output.push_str(&Self::section_header("Specifications"));
        output.push_str(&format!("{}\n", draft.specifications));
        output
    }

    pub fn format_committee_suggestion(suggestion: &CommitteeSuggestion) -> String {
        let mut output = Self::format_draft(&suggestion.draft);

        output.push_str(&Self::section_header("Suggested Committee"));
        match (&suggestion.committee, &suggestion.suggested_committee_id) {
            (Some(committee), _) => output.push_str(&format!(
                "{} {}\n",
                committee.committee_type.green().bold(),
                format!("(ID: {})", committee.id).dimmed()
            )),
            (None, Some(id)) => output.push_str(&format!(
                "{} {}\n",
                format!("ID {}", id).yellow(),
                "(not among the provided committees)".dimmed()
            )),
            (None, None) => output.push_str(&format!("{}\n", "none".dimmed())),
        }
        output.push_str(&format!("{}\n", suggestion.committee_reasoning));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_debate(debate: &DebateResult) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Debate Simulation"));

        for persona in &debate.personas {
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} {} ──", Self::icon(persona.icon), persona.name)
                    .yellow()
                    .bold()
            ));
            output.push_str(&format!("{}\n", persona.core_argument));

            output.push_str(&format!("\n{}\n", "Objections:".red().bold()));
            for objection in &persona.objections {
                output.push_str(&format!("  * {}\n", objection));
            }

            output.push_str(&format!(
                "\n{} {}\n",
                "Suggestion:".green().bold(),
                persona.actionable_suggestion
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_proposals(records: &[ProposalRecord]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No proposals tracked yet.".dimmed());
        }

        let mut output = String::new();
        for record in records {
            let status = match record.status {
                ProposalStatus::Pending => record.status.as_str().yellow(),
                ProposalStatus::Analyzing => record.status.as_str().blue(),
                ProposalStatus::Analyzed => record.status.as_str().green(),
                ProposalStatus::Failed => record.status.as_str().red(),
            };
            output.push_str(&format!(
                "{:<10} {} {} {}\n",
                status,
                record.id.as_str().bold(),
                record.title,
                record.submitted_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
            ));
        }
        output
    }

    fn score(value: f64) -> String {
        let text = format!("{:.1}/10", value);
        if value >= 7.0 {
            text.red().to_string()
        } else if value >= 4.0 {
            text.yellow().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn icon(icon: PersonaIcon) -> &'static str {
        match icon {
            PersonaIcon::DollarSign => "$",
            PersonaIcon::Shield => "#",
            PersonaIcon::Users => "@",
            PersonaIcon::Lightbulb => "*",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn panel(&self, id: &ProposalId, state: &PanelState) -> String {
        Self::format_panel(id, state)
    }

    fn analysis(&self, id: &ProposalId, analysis: &AnalysisResult) -> String {
        Self::format_analysis(id, analysis)
    }

    fn draft(&self, draft: &DraftResult) -> String {
        Self::format_draft(draft)
    }

    fn committee_suggestion(&self, suggestion: &CommitteeSuggestion) -> String {
        Self::format_committee_suggestion(suggestion)
    }

    fn debate(&self, debate: &DebateResult) -> String {
        Self::format_debate(debate)
    }

    fn proposals(&self, records: &[ProposalRecord]) -> String {
        Self::format_proposals(records)
    }
}
