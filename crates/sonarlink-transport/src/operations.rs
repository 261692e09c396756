//! Remote operation catalogue.
//!
//! Each request type implements [`Operation`], which names the remote endpoint
//! and fixes the shape of the success payload. The session serializes the
//! request into [`RemoteRequest::payload`](crate::RemoteRequest) and
//! deserializes [`RemoteResponse::body`](crate::RemoteResponse) into
//! [`Operation::Response`].

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A typed remote operation.
pub trait Operation: Serialize + Send + Sync {
    /// Name the transport routes on.
    const NAME: &'static str;

    /// Payload returned on success.
    type Response: DeserializeOwned + Send;
}

macro_rules! operation {
    ($request:ty => $response:ty, $name:literal) => {
        impl Operation for $request {
            const NAME: &'static str = $name;
            type Response = $response;
        }
    };
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Check that the attached credentials are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateCredentialsRequest;

/// Credentials check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsResponse {
    /// `false` when the server rejects the credentials.
    pub valid: bool,
}

operation!(ValidateCredentialsRequest => CredentialsResponse, "api/authentication/validate");

/// Fetch the server version string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionRequest;

/// Raw server version, e.g. `"6.7.1.35068"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Dotted version string.
    pub version: String,
}

operation!(VersionRequest => VersionResponse, "api/server/version");

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// One page of organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationsRequest {
    /// 1-based page index.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

/// Organization entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationResponse {
    /// Organization key.
    pub key: String,
    /// Display name.
    pub name: String,
}

operation!(OrganizationsRequest => Vec<OrganizationResponse>, "api/organizations/search");

/// Unpaged listing of every project visible to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsRequest;

/// Project entry of the unpaged listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project key.
    pub key: String,
    /// Display name.
    pub name: String,
}

operation!(ProjectsRequest => Vec<ProjectResponse>, "api/projects/index");

/// One page of projects belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsSearchProjectsRequest {
    /// Organization the search is scoped to.
    pub organization: String,
    /// 1-based page index.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

/// Project entry of the organization-scoped search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentResponse {
    /// Project key.
    pub key: String,
    /// Display name.
    pub name: String,
}

operation!(ComponentsSearchProjectsRequest => Vec<ComponentResponse>, "api/components/search_projects");

/// Installed server plugins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginsRequest;

/// Plugin entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Plugin key, e.g. `csharp`.
    pub key: String,
    /// Installed version string.
    pub version: String,
}

operation!(PluginsRequest => Vec<PluginResponse>, "api/plugins/installed");

/// Server-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertiesRequest;

/// Setting entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyResponse {
    /// Property key.
    pub key: String,
    /// Property value.
    pub value: String,
}

operation!(PropertiesRequest => Vec<PropertyResponse>, "api/properties");

/// Every issue recorded for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesRequest {
    /// Project key.
    pub project_key: String,
}

/// Issue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// File path relative to the project root.
    pub file_path: String,
    /// Hash of the offending line.
    pub hash: String,
    /// 1-based line number; `None` for file-level issues.
    pub line: Option<u32>,
    /// Issue message.
    pub message: String,
    /// Rule key.
    pub rule_key: String,
    /// Raw resolution string, e.g. `WONTFIX`.
    #[serde(default)]
    pub resolution: String,
}

operation!(IssuesRequest => Vec<IssueResponse>, "batch/issues");

// ---------------------------------------------------------------------------
// Quality profiles
// ---------------------------------------------------------------------------

/// Quality profiles, optionally scoped to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfilesRequest {
    /// Project key; `None` lists the server-wide profiles.
    pub project_key: Option<String>,
}

/// Quality profile entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileResponse {
    /// Profile key.
    pub key: String,
    /// Profile name.
    pub name: String,
    /// Language key, e.g. `cs`.
    pub language: String,
    /// Whether this is the default profile for its language.
    pub is_default: bool,
}

operation!(QualityProfilesRequest => Vec<QualityProfileResponse>, "api/qualityprofiles/search");

/// Most recent change log entries of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileChangeLogRequest {
    /// Profile key.
    pub quality_profile_key: String,
    /// Number of entries to return.
    pub page_size: u32,
}

/// Change log page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityProfileChangeLogResponse {
    /// Entries, most recent first.
    pub events: Vec<ChangeLogEventResponse>,
}

/// One change log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEventResponse {
    /// When the change happened.
    pub date: DateTime<FixedOffset>,
}

operation!(
    QualityProfileChangeLogRequest => QualityProfileChangeLogResponse,
    "api/qualityprofiles/changelog"
);

/// Analyzer export of a named profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProfileRequest {
    /// Profile name.
    pub quality_profile_name: String,
    /// Language key.
    pub language_key: String,
}

/// Exported analyzer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProfileResponse {
    /// Serialized rule-set configuration.
    pub configuration: String,
    /// Analyzer packages the configuration depends on.
    #[serde(default)]
    pub packages: Vec<PackageResponse>,
}

/// Analyzer package reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageResponse {
    /// Package id.
    pub id: String,
    /// Package version.
    pub version: String,
}

operation!(ExportProfileRequest => ExportProfileResponse, "api/qualityprofiles/export");

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Developer events for a project newer than a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsRequest {
    /// Project key.
    pub project_key: String,
    /// Only events strictly after this instant are returned.
    pub events_since: DateTime<FixedOffset>,
}

/// Developer event entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// Event category, e.g. `QUALITY_GATE`.
    pub category: String,
    /// Human readable message.
    pub message: String,
    /// Link to the event on the server.
    pub link: String,
    /// Project key the event belongs to.
    pub project: String,
    /// When the event happened.
    pub date: DateTime<FixedOffset>,
}

operation!(NotificationsRequest => Vec<NotificationResponse>, "api/developers/search_events");
