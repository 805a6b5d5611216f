//! Application-level configuration.
//!
//! - [`VariantProfiles`]: decoding profile per request variant

pub mod variant_profiles;

pub use variant_profiles::VariantProfiles;
