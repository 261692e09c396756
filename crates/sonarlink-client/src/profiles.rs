//! Quality profile selection.

use sonarlink_transport::operations::QualityProfileResponse;

use crate::error::{Result, SessionError};
use crate::models::Language;

/// Pick the effective profile for `language` out of a project's profiles.
///
/// Profiles for other languages are ignored. A single match wins outright;
/// among several matches the one flagged default wins.
///
/// # Errors
///
/// - [`SessionError::ProfileNotFound`] when no profile has the language.
/// - [`SessionError::AmbiguousProfile`] when several match and the number
///   flagged default is not exactly one.
pub fn select_profile(
    profiles: Vec<QualityProfileResponse>,
    language: &Language,
) -> Result<QualityProfileResponse> {
    let mut candidates: Vec<_> = profiles
        .into_iter()
        .filter(|profile| profile.language == language.key)
        .collect();

    match candidates.len() {
        0 => Err(SessionError::ProfileNotFound(format!(
            "no profile for language '{}'",
            language.key
        ))),
        1 => Ok(candidates.remove(0)),
        count => {
            let mut defaults: Vec<_> = candidates
                .into_iter()
                .filter(|profile| profile.is_default)
                .collect();

            if defaults.len() == 1 {
                Ok(defaults.remove(0))
            } else {
                Err(SessionError::AmbiguousProfile(format!(
                    "{count} profiles for language '{}', {} flagged default",
                    language.key,
                    defaults.len()
                )))
            }
        }
    }
}
