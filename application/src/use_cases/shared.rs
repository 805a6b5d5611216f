//! Shared utilities for use cases.
//!
//! Every model request goes through [`request_completion`]: build the
//! prompt, look up the variant's decoding profile, bound the call by the
//! profile's timeout.

use crate::config::VariantProfiles;
use crate::ports::model_gateway::{CompletionRequest, GatewayError, ModelGateway};
use crate::ports::progress::AnalysisProgressNotifier;
use govmind_domain::{PromptInputs, build_prompt};
use std::time::Instant;
use tracing::debug;

/// Send one prompt to the model and return the raw completion text.
///
/// A call that exceeds the variant's timeout becomes
/// [`GatewayError::Timeout`]; the abandoned future is dropped.
pub(crate) async fn request_completion<G: ModelGateway + ?Sized>(
    gateway: &G,
    profiles: &VariantProfiles,
    inputs: &PromptInputs<'_>,
    progress: &dyn AnalysisProgressNotifier,
) -> Result<String, GatewayError> {
    let variant = inputs.variant();
    let profile = profiles.get(variant);
    let request = CompletionRequest::new(build_prompt(inputs), profile);

    debug!(
        variant = %variant,
        prompt_chars = request.prompt.user.len(),
        max_tokens = profile.max_tokens,
        "Sending completion request"
    );
    progress.on_request_start(variant);
    let started = Instant::now();

    let result = match tokio::time::timeout(profile.timeout(), gateway.complete(&request)).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(profile.timeout_seconds)),
    };

    debug!(
        variant = %variant,
        elapsed_ms = started.elapsed().as_millis() as u64,
        success = result.is_ok(),
        "Completion request finished"
    );
    progress.on_request_complete(variant, result.is_ok());
    result
}
