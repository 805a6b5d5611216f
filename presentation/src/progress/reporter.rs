//! Progress reporting for model requests and analysis attempts

use colored::Colorize;
use govmind_application::{AnalysisProgressNotifier, AnalysisTrigger};
use govmind_domain::{ProposalId, ProposalStatus, Variant};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while a model request or analysis is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, prefix: String, message: &str) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(existing) = slot.as_ref() {
            existing.set_message(message.to_string());
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(pb);
    }

    fn finish(&self, message: Option<String>) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            match message {
                Some(message) => pb.finish_with_message(message),
                None => pb.finish_and_clear(),
            }
        }
    }

    fn request_label(variant: Variant) -> &'static str {
        match variant {
            Variant::Analyze => "Analyzing proposal",
            Variant::Draft => "Drafting proposal",
            Variant::DraftWithCommittee => "Drafting proposal and routing",
            Variant::Debate => "Simulating debate",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_analysis_start(&self, id: &ProposalId, trigger: AnalysisTrigger) {
        let message = match trigger {
            AnalysisTrigger::Initial => "analysis started",
            AnalysisTrigger::Retry => "retrying analysis",
        };
        self.start(id.to_string(), message);
    }

    fn on_analysis_complete(&self, _id: &ProposalId, status: ProposalStatus) {
        let message = match status {
            ProposalStatus::Analyzed => format!("{} analyzed", "v".green()),
            other => format!("{} {}", "x".red(), other.as_str()),
        };
        self.finish(Some(message));
    }

    fn on_request_start(&self, variant: Variant) {
        self.start(variant.to_string(), Self::request_label(variant));
    }

    fn on_request_complete(&self, variant: Variant, _success: bool) {
        // Analysis attempts are finished by `on_analysis_complete`
        if variant != Variant::Analyze {
            self.finish(None);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_analysis_start(&self, id: &ProposalId, trigger: AnalysisTrigger) {
        eprintln!("{} {} ({})", "->".cyan(), id.as_str().bold(), trigger);
    }

    fn on_analysis_complete(&self, id: &ProposalId, status: ProposalStatus) {
        match status {
            ProposalStatus::Analyzed => eprintln!("  {} {}", "v".green(), id),
            other => eprintln!("  {} {} ({})", "x".red(), id, other.as_str()),
        }
    }

    fn on_request_start(&self, variant: Variant) {
        eprintln!("{} {}...", "->".cyan(), ProgressReporter::request_label(variant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assist_request_clears_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_request_start(Variant::Debate);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_request_complete(Variant::Debate, true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_analysis_spinner_lives_until_settled() {
        let reporter = ProgressReporter::new();
        let id = ProposalId::new("dao-1").unwrap();

        reporter.on_analysis_start(&id, AnalysisTrigger::Initial);
        reporter.on_request_start(Variant::Analyze);
        reporter.on_request_complete(Variant::Analyze, true);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_analysis_complete(&id, ProposalStatus::Analyzed);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
