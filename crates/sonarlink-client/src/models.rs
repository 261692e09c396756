//! Domain entities returned by session operations.
//!
//! Every entity is built from its transport DTO with a `From` impl and is
//! immutable afterwards.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sonarlink_transport::operations::{
    ComponentResponse, IssueResponse, NotificationResponse, OrganizationResponse, PluginResponse,
    ProjectResponse, PropertyResponse, QualityProfileResponse,
};

/// Analysis language, identified by its server-side key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Server key, e.g. `cs`.
    pub key: String,
    /// Display name.
    pub name: String,
}

impl Language {
    /// Arbitrary language.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// C#.
    pub fn csharp() -> Self {
        Self::new("cs", "C#")
    }

    /// Visual Basic .NET.
    pub fn vbnet() -> Self {
        Self::new("vbnet", "VB.NET")
    }
}

/// Organization on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization key.
    pub key: String,
    /// Display name.
    pub name: String,
}

impl From<OrganizationResponse> for Organization {
    fn from(response: OrganizationResponse) -> Self {
        Self {
            key: response.key,
            name: response.name,
        }
    }
}

/// Analyzed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project key.
    pub key: String,
    /// Display name.
    pub name: String,
}

impl From<ProjectResponse> for Project {
    fn from(response: ProjectResponse) -> Self {
        Self {
            key: response.key,
            name: response.name,
        }
    }
}

impl From<ComponentResponse> for Project {
    fn from(response: ComponentResponse) -> Self {
        Self {
            key: response.key,
            name: response.name,
        }
    }
}

/// Installed server plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin key.
    pub key: String,
    /// Installed version.
    pub version: String,
}

impl From<PluginResponse> for Plugin {
    fn from(response: PluginResponse) -> Self {
        Self {
            key: response.key,
            version: response.version,
        }
    }
}

/// Server setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property key.
    pub key: String,
    /// Property value.
    pub value: String,
}

impl From<PropertyResponse> for Property {
    fn from(response: PropertyResponse) -> Self {
        Self {
            key: response.key,
            value: response.value,
        }
    }
}

/// How an issue was resolved on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueResolutionState {
    /// No resolution recorded.
    Unresolved,
    /// Accepted as "won't fix".
    WontFix,
    /// Marked as a false positive.
    FalsePositive,
    /// Fixed in code.
    Fixed,
    /// Rule or file removed.
    Removed,
    /// Resolution string this client does not know.
    Unknown,
}

impl IssueResolutionState {
    /// Map a raw resolution string.
    ///
    /// | raw               | state            |
    /// |-------------------|------------------|
    /// | `""`              | `Unresolved`     |
    /// | `WONTFIX`         | `WontFix`        |
    /// | `FALSE-POSITIVE`  | `FalsePositive`  |
    /// | `FIXED`           | `Fixed`          |
    /// | `REMOVED`         | `Removed`        |
    /// | anything else     | `Unknown`        |
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Self::Unresolved,
            "WONTFIX" => Self::WontFix,
            "FALSE-POSITIVE" => Self::FalsePositive,
            "FIXED" => Self::Fixed,
            "REMOVED" => Self::Removed,
            _ => Self::Unknown,
        }
    }

    /// `true` for the states that suppress an issue locally.
    pub fn is_suppressed(self) -> bool {
        matches!(self, Self::WontFix | Self::FalsePositive)
    }
}

/// Issue recorded on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// File path relative to the project root.
    pub file_path: String,
    /// Hash of the offending line.
    pub hash: String,
    /// 1-based line, `None` for file-level issues.
    pub line: Option<u32>,
    /// Issue message.
    pub message: String,
    /// Rule key.
    pub rule_key: String,
    /// Mapped resolution.
    pub resolution_state: IssueResolutionState,
}

impl From<IssueResponse> for Issue {
    fn from(response: IssueResponse) -> Self {
        Self {
            resolution_state: IssueResolutionState::parse(&response.resolution),
            file_path: response.file_path,
            hash: response.hash,
            line: response.line,
            message: response.message,
            rule_key: response.rule_key,
        }
    }
}

/// Effective quality profile of a project for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Profile key.
    pub key: String,
    /// Profile name.
    pub name: String,
    /// Language key.
    pub language: String,
    /// Whether this is the default profile for its language.
    pub is_default: bool,
    /// Date of the most recent change log entry.
    pub last_modified: DateTime<FixedOffset>,
}

impl QualityProfile {
    pub(crate) fn from_response(
        response: QualityProfileResponse,
        last_modified: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            key: response.key,
            name: response.name,
            language: response.language,
            is_default: response.is_default,
            last_modified,
        }
    }
}

/// Developer notification raised by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Event category.
    pub category: String,
    /// Link to the event on the server.
    pub link: String,
    /// Human readable message.
    pub message: String,
    /// When the event happened.
    pub date: DateTime<FixedOffset>,
    /// Project key.
    pub project: String,
}

impl From<NotificationResponse> for Notification {
    fn from(response: NotificationResponse) -> Self {
        Self {
            category: response.category,
            link: response.link,
            message: response.message,
            date: response.date,
            project: response.project,
        }
    }
}

/// Result of a notification query.
///
/// `NotSupported` and an empty `Events` mean very different things: the former
/// says the server has no notification endpoint and asking again is pointless,
/// the latter only that nothing happened since the requested instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The server does not offer notifications.
    NotSupported,
    /// Events newer than the requested instant, possibly none.
    Events(Vec<Notification>),
}

impl NotificationOutcome {
    /// Date of the newest event, if any.
    pub fn latest_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::NotSupported => None,
            Self::Events(events) => events.iter().map(|event| event.date).max(),
        }
    }
}
