//! Per-variant decoding overrides from TOML (`[variants.<name>]` sections)
//!
//! Every field is optional; anything left out keeps the built-in profile
//! of that variant.

use govmind_application::VariantProfiles;
use govmind_domain::{DecodingProfile, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVariantConfig {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl FileVariantConfig {
    /// Overlay the configured fields onto `base`.
    pub fn apply(&self, base: DecodingProfile) -> DecodingProfile {
        DecodingProfile {
            temperature: self.temperature.unwrap_or(base.temperature),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            timeout_seconds: self.timeout_seconds.unwrap_or(base.timeout_seconds),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVariantsConfig {
    pub analyze: FileVariantConfig,
    pub draft: FileVariantConfig,
    pub draft_with_committee: FileVariantConfig,
    pub debate: FileVariantConfig,
}

impl FileVariantsConfig {
    pub fn get(&self, variant: Variant) -> &FileVariantConfig {
        match variant {
            Variant::Analyze => &self.analyze,
            Variant::Draft => &self.draft,
            Variant::DraftWithCommittee => &self.draft_with_committee,
            Variant::Debate => &self.debate,
        }
    }

    pub fn to_profiles(&self) -> VariantProfiles {
        Variant::ALL
            .into_iter()
            .fold(VariantProfiles::default(), |profiles, variant| {
                let profile = self.get(variant).apply(variant.default_profile());
                profiles.with(variant, profile)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_builtin_profiles() {
        assert_eq!(
            FileVariantsConfig::default().to_profiles(),
            VariantProfiles::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let toml_str = r#"
[debate]
timeout_seconds = 30
"#;
        let config: FileVariantsConfig = toml::from_str(toml_str).unwrap();
        let profiles = config.to_profiles();

        assert_eq!(profiles.debate.timeout_seconds, 30);
        assert_eq!(
            profiles.debate.max_tokens,
            Variant::Debate.default_profile().max_tokens
        );
        assert_eq!(profiles.analyze, Variant::Analyze.default_profile());
    }
}
