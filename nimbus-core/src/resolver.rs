//! Turning a device-reported coordinate pair into one place name.
//!
//! Reverse lookups near administrative boundaries often come back with a
//! parent region, or with the locality spelled in another script. The policy
//! here corrects one known alias and otherwise falls back to a fixed name
//! rather than showing whatever the provider returned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    WeatherClient, WeatherError,
    model::{Coordinates, PlaceCandidate},
};

/// Tokens and names driving [`LocationResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverPolicy {
    /// Returned when nothing usable comes back.
    pub fallback: String,
    /// Matched case-insensitively anywhere in a candidate name.
    pub alias_token: String,
    /// Same alias as the provider spells it in another script.
    pub alternate_script_token: String,
    /// Returned whenever the alias matches, instead of the candidate's name.
    pub canonical_name: String,
    /// If the nearest candidate contains either marker, its own name is used.
    pub region_markers: [String; 2],
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            fallback: "Macau".to_string(),
            alias_token: "taipa".to_string(),
            alternate_script_token: "氹仔".to_string(),
            canonical_name: "Macau-taipa".to_string(),
            region_markers: ["Macau".to_string(), "澳門".to_string()],
        }
    }
}

impl ResolverPolicy {
    fn matches_alias(&self, name: &str) -> bool {
        let alias = self.alias_token.to_lowercase();
        let by_alias = !alias.is_empty() && name.to_lowercase().contains(&alias);
        let by_script =
            !self.alternate_script_token.is_empty() && name.contains(&self.alternate_script_token);
        by_alias || by_script
    }

    fn matches_region(&self, name: &str) -> bool {
        self.region_markers
            .iter()
            .any(|marker| !marker.is_empty() && name.contains(marker.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The search returned no candidates.
    NoCandidates,
    /// Candidates came back but none matched the policy.
    NoMatch,
}

/// Which branch of the policy produced the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Override { name: String, matched: String },
    RegionMatch { name: String },
    Fallback { name: String, reason: FallbackReason },
}

impl Resolution {
    pub fn name(&self) -> &str {
        match self {
            Resolution::Override { name, .. }
            | Resolution::RegionMatch { name }
            | Resolution::Fallback { name, .. } => name,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            Resolution::Override { name, .. }
            | Resolution::RegionMatch { name }
            | Resolution::Fallback { name, .. } => name,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    policy: ResolverPolicy,
}

impl LocationResolver {
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Resolve to a bare place name. Ambiguity falls back silently; transport
    /// errors are returned as is.
    pub async fn resolve_from_coordinates(
        &self,
        client: &WeatherClient,
        coords: Coordinates,
    ) -> Result<String, WeatherError> {
        self.resolve(client, coords).await.map(Resolution::into_name)
    }

    /// Like [`Self::resolve_from_coordinates`] but reports which rule decided.
    pub async fn resolve(
        &self,
        client: &WeatherClient,
        coords: Coordinates,
    ) -> Result<Resolution, WeatherError> {
        let candidates = client.search_places(&coords.to_string()).await?;
        let resolution = self.decide(&candidates);

        match &resolution {
            Resolution::Fallback { name, reason } => {
                debug!(%coords, ?reason, fallback = %name, "location resolution fell back");
            }
            other => debug!(%coords, name = other.name(), "location resolved"),
        }

        Ok(resolution)
    }

    /// Apply the policy to candidates already ordered nearest first.
    pub fn decide(&self, candidates: &[PlaceCandidate]) -> Resolution {
        let Some(nearest) = candidates.first() else {
            return self.fallback(FallbackReason::NoCandidates);
        };

        if let Some(hit) = candidates.iter().find(|c| self.policy.matches_alias(&c.name)) {
            return Resolution::Override {
                name: self.policy.canonical_name.clone(),
                matched: hit.name.clone(),
            };
        }

        if self.policy.matches_region(&nearest.name) {
            return Resolution::RegionMatch { name: nearest.name.clone() };
        }

        self.fallback(FallbackReason::NoMatch)
    }

    fn fallback(&self, reason: FallbackReason) -> Resolution {
        Resolution::Fallback { name: self.policy.fallback.clone(), reason }
    }
}
