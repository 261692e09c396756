//! Listing operations.

use sonarlink_transport::Transport;
use sonarlink_transport::operations::{
    ComponentsSearchProjectsRequest, Operation, OrganizationsRequest, PluginsRequest,
    ProjectsRequest, PropertiesRequest,
};
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::{Organization, Plugin, Project, Property};
use crate::pagination::fetch_all_pages;
use crate::session::Session;

impl<T: Transport> Session<T> {
    /// List every organization, walking all pages.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the first failed page's error.
    pub async fn organizations(&self, cancel: &CancellationToken) -> Result<Vec<Organization>> {
        let connected = self.connected()?;
        let config = &self.inner.config;

        let organizations = fetch_all_pages(
            OrganizationsRequest::NAME,
            config.page_size,
            config.max_pages,
            |page, page_size| {
                let request = OrganizationsRequest { page, page_size };
                let connection = &connected.connection;
                async move { self.request(connection, &request, cancel).await }
            },
        )
        .await?;

        Ok(organizations.into_iter().map(Organization::from).collect())
    }

    /// List projects.
    ///
    /// Without an organization this is one unpaged listing. With one, it is a
    /// paged search scoped to that organization.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the remote failure.
    pub async fn projects(
        &self,
        organization_key: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Project>> {
        let connected = self.connected()?;

        let Some(organization) = organization_key else {
            let projects = self
                .request(&connected.connection, &ProjectsRequest, cancel)
                .await?;
            return Ok(projects.into_iter().map(Project::from).collect());
        };

        let config = &self.inner.config;
        let components = fetch_all_pages(
            ComponentsSearchProjectsRequest::NAME,
            config.page_size,
            config.max_pages,
            |page, page_size| {
                let request = ComponentsSearchProjectsRequest {
                    organization: organization.to_string(),
                    page,
                    page_size,
                };
                let connection = &connected.connection;
                async move { self.request(connection, &request, cancel).await }
            },
        )
        .await?;

        Ok(components.into_iter().map(Project::from).collect())
    }

    /// List installed server plugins.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the remote failure.
    pub async fn plugins(&self, cancel: &CancellationToken) -> Result<Vec<Plugin>> {
        let connected = self.connected()?;
        let plugins = self
            .request(&connected.connection, &PluginsRequest, cancel)
            .await?;
        Ok(plugins.into_iter().map(Plugin::from).collect())
    }

    /// List server settings.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the remote failure.
    pub async fn properties(&self, cancel: &CancellationToken) -> Result<Vec<Property>> {
        let connected = self.connected()?;
        let properties = self
            .request(&connected.connection, &PropertiesRequest, cancel)
            .await?;
        Ok(properties.into_iter().map(Property::from).collect())
    }
}
