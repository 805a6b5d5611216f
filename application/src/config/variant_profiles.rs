//! Per-variant decoding profiles.
//!
//! [`VariantProfiles`] holds the decoding configuration the use cases send
//! with each model request. Defaults come from
//! [`Variant::default_profile`]; the infrastructure config layer may
//! override individual variants.

use govmind_domain::{DecodingProfile, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantProfiles {
    pub analyze: DecodingProfile,
    pub draft: DecodingProfile,
    pub draft_with_committee: DecodingProfile,
    pub debate: DecodingProfile,
}

impl Default for VariantProfiles {
    fn default() -> Self {
        Self {
            analyze: Variant::Analyze.default_profile(),
            draft: Variant::Draft.default_profile(),
            draft_with_committee: Variant::DraftWithCommittee.default_profile(),
            debate: Variant::Debate.default_profile(),
        }
    }
}

impl VariantProfiles {
    pub fn get(&self, variant: Variant) -> DecodingProfile {
        match variant {
            Variant::Analyze => self.analyze,
            Variant::Draft => self.draft,
            Variant::DraftWithCommittee => self.draft_with_committee,
            Variant::Debate => self.debate,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with(mut self, variant: Variant, profile: DecodingProfile) -> Self {
        match variant {
            Variant::Analyze => self.analyze = profile,
            Variant::Draft => self.draft = profile,
            Variant::DraftWithCommittee => self.draft_with_committee = profile,
            Variant::Debate => self.debate = profile,
        }
        self
    }

    /// Longest configured timeout across all variants.
    pub fn max_timeout_seconds(&self) -> u64 {
        Variant::ALL
            .iter()
            .map(|v| self.get(*v).timeout_seconds)
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_variants() {
        let profiles = VariantProfiles::default();
        for variant in Variant::ALL {
            assert_eq!(profiles.get(variant), variant.default_profile());
        }
        assert_eq!(profiles.max_timeout_seconds(), 120);
    }

    #[test]
    fn test_override_single_variant() {
        let custom = DecodingProfile::new(0.1, 500, 10);
        let profiles = VariantProfiles::default().with(Variant::Draft, custom);
        assert_eq!(profiles.get(Variant::Draft), custom);
        assert_eq!(profiles.get(Variant::Analyze), Variant::Analyze.default_profile());
    }
}
