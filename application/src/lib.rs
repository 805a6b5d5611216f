//! Application layer for govmind
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::VariantProfiles;
pub use ports::{
    analysis_events::{AnalysisEvent, AnalysisEventLogger, NoEventLogger},
    model_gateway::{CompletionRequest, GatewayError, ModelGateway},
    progress::{AnalysisProgressNotifier, AnalysisTrigger, NoProgress},
    proposal_repository::{ProposalRepository, RepositoryError},
};
pub use use_cases::analysis_store::{
    AnalyzeOutcome, Dispatch, LookupError, ProposalAnalysisStore, StoreError, Submitted,
};
pub use use_cases::copilot::ProposalCopilot;
pub use use_cases::draft_proposal::{AssistError, DraftProposalUseCase};
pub use use_cases::simulate_debate::SimulateDebateUseCase;
