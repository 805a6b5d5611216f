//! Use cases (application services)

pub mod analysis_store;
pub mod copilot;
pub mod draft_proposal;
pub(crate) mod shared;
pub mod simulate_debate;

#[cfg(test)]
pub(crate) mod test_support;
