//! Listing, pagination and issue filtering tests.

mod common;

use common::{connected_session, connected_session_with};
use pretty_assertions::assert_eq;
use serde_json::json;
use sonarlink_client::{
    IssueResolutionState, Organization, Plugin, Project, Property, SessionConfig, SessionError,
};
use sonarlink_transport::mock::Scripted;
use sonarlink_transport::operations::{
    ComponentResponse, ComponentsSearchProjectsRequest, IssueResponse, IssuesRequest,
    OrganizationResponse, OrganizationsRequest, PluginResponse, PluginsRequest, ProjectResponse,
    ProjectsRequest, PropertiesRequest, PropertyResponse,
};
use sonarlink_transport::{RemoteResponse, StatusCode};
use tokio_util::sync::CancellationToken;

fn organization(key: &str) -> OrganizationResponse {
    OrganizationResponse {
        key: key.to_string(),
        name: key.to_uppercase(),
    }
}

fn component(key: &str) -> ComponentResponse {
    ComponentResponse {
        key: key.to_string(),
        name: format!("{key} name"),
    }
}

fn issue(hash: &str, resolution: &str) -> IssueResponse {
    IssueResponse {
        file_path: "src/Program.cs".into(),
        hash: hash.into(),
        line: Some(7),
        message: "Remove this unused variable".into(),
        rule_key: "csharpsquid:S1481".into(),
        resolution: resolution.into(),
    }
}

// ============================================================================
// ORGANIZATIONS
// ============================================================================

#[tokio::test]
async fn test_organizations_walk_pages_until_empty() {
    let (session, transport) = connected_session("6.7").await;
    transport
        .push_ok::<OrganizationsRequest>(vec![organization("a"), organization("b")])
        .push_ok::<OrganizationsRequest>(vec![organization("c")])
        .push_ok::<OrganizationsRequest>(Vec::<OrganizationResponse>::new())
        .push_ok::<OrganizationsRequest>(vec![organization("never")]);

    let organizations = session
        .organizations(&CancellationToken::new())
        .await
        .unwrap();

    let keys: Vec<_> = organizations.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(
        organizations[0],
        Organization {
            key: "a".into(),
            name: "A".into()
        }
    );

    let payloads: Vec<_> = transport
        .requests_for::<OrganizationsRequest>()
        .into_iter()
        .map(|request| request.payload)
        .collect();
    assert_eq!(
        payloads,
        vec![
            json!({ "page": 1, "pageSize": 500 }),
            json!({ "page": 2, "pageSize": 500 }),
            json!({ "page": 3, "pageSize": 500 }),
        ]
    );
}

#[tokio::test]
async fn test_organizations_page_failure_surfaces_error() {
    let (session, transport) = connected_session("6.7").await;
    transport
        .push_ok::<OrganizationsRequest>(vec![organization("a")])
        .push_status::<OrganizationsRequest>(StatusCode::BAD_GATEWAY);

    let err = session
        .organizations(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::RemoteOperationFailed {
            operation: "api/organizations/search",
            status: StatusCode::BAD_GATEWAY,
        }
    );
    assert_eq!(transport.calls::<OrganizationsRequest>(), 2);
}

#[tokio::test]
async fn test_page_cap_stops_runaway_listing() {
    let config = SessionConfig::new().with_max_pages(3).with_page_size(2);
    let (session, transport) = connected_session_with("6.7", config).await;
    transport.set_fallback::<OrganizationsRequest>(Scripted::Respond(RemoteResponse::ok(
        json!([{ "key": "loop", "name": "Loop" }]),
    )));

    let err = session
        .organizations(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::PaginationLimitExceeded {
            operation: "api/organizations/search",
            max_pages: 3,
        }
    );
    assert_eq!(transport.calls::<OrganizationsRequest>(), 3);
    assert_eq!(
        transport.requests_for::<OrganizationsRequest>()[0].payload,
        json!({ "page": 1, "pageSize": 2 })
    );
}

// ============================================================================
// PROJECTS
// ============================================================================

#[tokio::test]
async fn test_projects_without_organization_use_single_listing() {
    let (session, transport) = connected_session("5.6").await;
    transport.push_ok::<ProjectsRequest>(vec![ProjectResponse {
        key: "app".into(),
        name: "App".into(),
    }]);

    let projects = session
        .projects(None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        projects,
        vec![Project {
            key: "app".into(),
            name: "App".into()
        }]
    );
    assert_eq!(transport.calls::<ProjectsRequest>(), 1);
    assert_eq!(transport.calls::<ComponentsSearchProjectsRequest>(), 0);
}

#[tokio::test]
async fn test_projects_with_organization_use_scoped_paged_search() {
    let (session, transport) = connected_session("6.7").await;
    transport
        .push_ok::<ComponentsSearchProjectsRequest>(vec![component("one"), component("two")])
        .push_ok::<ComponentsSearchProjectsRequest>(Vec::<ComponentResponse>::new());

    let projects = session
        .projects(Some("acme"), &CancellationToken::new())
        .await
        .unwrap();

    let keys: Vec<_> = projects.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["one", "two"]);
    assert_eq!(transport.calls::<ProjectsRequest>(), 0);

    let requests = transport.requests_for::<ComponentsSearchProjectsRequest>();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].payload,
        json!({ "organization": "acme", "page": 2, "pageSize": 500 })
    );
}

// ============================================================================
// PLUGINS / PROPERTIES
// ============================================================================

#[tokio::test]
async fn test_plugins_and_properties_are_mapped_in_order() {
    let (session, transport) = connected_session("6.7").await;
    transport
        .push_ok::<PluginsRequest>(vec![
            PluginResponse {
                key: "csharp".into(),
                version: "7.15".into(),
            },
            PluginResponse {
                key: "vbnet".into(),
                version: "7.15".into(),
            },
        ])
        .push_ok::<PropertiesRequest>(vec![PropertyResponse {
            key: "sonar.cs.file.suffixes".into(),
            value: ".cs".into(),
        }]);
    let cancel = CancellationToken::new();

    let plugins = session.plugins(&cancel).await.unwrap();
    let properties = session.properties(&cancel).await.unwrap();

    assert_eq!(
        plugins,
        vec![
            Plugin {
                key: "csharp".into(),
                version: "7.15".into()
            },
            Plugin {
                key: "vbnet".into(),
                version: "7.15".into()
            },
        ]
    );
    assert_eq!(
        properties,
        vec![Property {
            key: "sonar.cs.file.suffixes".into(),
            value: ".cs".into()
        }]
    );
}

#[tokio::test]
async fn test_plugins_failure_is_remote_operation_failed() {
    let (session, transport) = connected_session("6.7").await;
    transport.push_status::<PluginsRequest>(StatusCode::UNAUTHORIZED);

    let err = session.plugins(&CancellationToken::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

// ============================================================================
// SUPPRESSED ISSUES
// ============================================================================

#[tokio::test]
async fn test_suppressed_issues_keep_wontfix_and_false_positive() {
    let (session, transport) = connected_session("6.7").await;
    transport.push_ok::<IssuesRequest>(vec![
        issue("h1", "WONTFIX"),
        issue("h2", "FALSE-POSITIVE"),
        issue("h3", "OPEN"),
        issue("h4", ""),
        issue("h5", "FIXED"),
    ]);

    let issues = session
        .suppressed_issues("app", &CancellationToken::new())
        .await
        .unwrap();

    let states: Vec<_> = issues.iter().map(|i| i.resolution_state).collect();
    assert_eq!(
        states,
        vec![
            IssueResolutionState::WontFix,
            IssueResolutionState::FalsePositive
        ]
    );
    assert_eq!(issues[0].hash, "h1");
    assert_eq!(issues[1].hash, "h2");
    assert_eq!(
        transport.requests_for::<IssuesRequest>()[0].payload,
        json!({ "projectKey": "app" })
    );
}

// ============================================================================
// LINKS
// ============================================================================

#[tokio::test]
async fn test_project_dashboard_url() {
    let (session, _) = connected_session("6.7").await;

    let url = session.project_dashboard_url("my-app").unwrap();
    assert_eq!(
        url.as_str(),
        "https://quality.example.com/dashboard/index/my-app"
    );
}
