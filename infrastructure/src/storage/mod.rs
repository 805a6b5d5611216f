//! Proposal repository adapters

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileProposalRepository;
pub use memory::InMemoryProposalRepository;
