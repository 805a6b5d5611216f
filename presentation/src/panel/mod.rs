//! Client-side analysis panel: state selection and polling

pub mod poller;
pub mod state;

pub use poller::{AnalysisPoller, ProposalStatusSource};
pub use state::{Affordance, PanelState};
