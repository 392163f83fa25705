//! Connection version negotiation.

use core::fmt::Display;

use ibc_tao_primitives::utils::PrettySlice;

use crate::error::ConnectionError;

pub const DEFAULT_VERSION_IDENTIFIER: &str = "1";
pub const ORDER_ORDERED: &str = "ORDER_ORDERED";
pub const ORDER_UNORDERED: &str = "ORDER_UNORDERED";

/// A connection version: an identifier plus the channel orderings (features)
/// that connections of this version support.
#[derive(Clone, Debug, PartialEq, Eq, Hash, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Version {
    identifier: String,
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: String, features: Vec<String>) -> Result<Self, ConnectionError> {
        if identifier.trim().is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        if features.iter().any(|f| f.trim().is_empty()) {
            return Err(ConnectionError::EmptyFeatures);
        }
        Ok(Self {
            identifier,
            features,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Checks that this version, and every feature it carries, is one of the
    /// supported versions.
    pub fn verify_is_supported(
        &self,
        supported_versions: &[Version],
    ) -> Result<(), ConnectionError> {
        let maybe_supported_version = find_supported_version(self, supported_versions)?;

        if self.features.is_empty() {
            return Err(ConnectionError::EmptyFeatures);
        }

        for feature in self.features.iter() {
            maybe_supported_version.verify_feature_supported(feature.to_string())?;
        }
        Ok(())
    }

    pub fn verify_feature_supported(&self, feature: String) -> Result<(), ConnectionError> {
        if !self.features.contains(&feature) {
            return Err(ConnectionError::FeatureNotSupported { feature });
        }
        Ok(())
    }

    /// The versions this implementation supports.
    pub fn compatibles() -> Vec<Self> {
        vec![Self {
            identifier: DEFAULT_VERSION_IDENTIFIER.to_string(),
            features: vec![ORDER_ORDERED.to_string(), ORDER_UNORDERED.to_string()],
        }]
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Version {{ identifier: {}, features: {} }}",
            self.identifier,
            PrettySlice(&self.features)
        )
    }
}

/// Selects the version to use from the intersection of the supported versions
/// and those proposed by the counterparty. Among several candidates the one
/// with the lowest identifier wins, so both ends pick the same one.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, ConnectionError> {
    let mut intersection: Vec<Version> = supported_versions
        .iter()
        .filter_map(|sv| {
            let cv = find_supported_version(sv, counterparty_versions).ok()?;
            let features = get_feature_set_intersection(&sv.features, &cv.features).ok()?;
            Some(Version {
                identifier: cv.identifier,
                features,
            })
        })
        .collect();

    intersection.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    intersection
        .into_iter()
        .next()
        .ok_or(ConnectionError::NoCommonVersion)
}

fn find_supported_version(
    version: &Version,
    supported_versions: &[Version],
) -> Result<Version, ConnectionError> {
    supported_versions
        .iter()
        .find(|sv| sv.identifier == version.identifier)
        .ok_or(ConnectionError::VersionNotSupported {
            version: version.clone(),
        })
        .cloned()
}

fn get_feature_set_intersection(
    supported_features: &[String],
    counterparty_features: &[String],
) -> Result<Vec<String>, ConnectionError> {
    let feature_set_intersection: Vec<String> = supported_features
        .iter()
        .filter(|f| counterparty_features.contains(f))
        .cloned()
        .collect();

    if feature_set_intersection.is_empty() {
        return Err(ConnectionError::NoCommonFeatures);
    }

    Ok(feature_set_intersection)
}
