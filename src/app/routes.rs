//! Views the client can show and the navigation seam used to reach them.
//!
//! The gateway client needs to force a redirect to the login view when the
//! backend rejects a credential. It does so through [`Navigator`], which the
//! runtime implements by feeding a [`Event::Navigate`](crate::app::Event) into
//! the controller loop.

use crate::app::handler::Event;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// A view of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Filterable job listing.
    #[default]
    Jobs,
    /// A single job listing.
    JobDetail(i64),
    /// Company catalog.
    Companies,
    /// A single company.
    CompanyDetail(i64),
    /// Sign-in form.
    Login,
}

impl Route {
    /// Browser-style path of the view, used in log lines and prompts.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Jobs => "/jobs".to_string(),
            Self::JobDetail(id) => format!("/jobs/{id}"),
            Self::Companies => "/companies".to_string(),
            Self::CompanyDetail(id) => format!("/companies/{id}"),
            Self::Login => "/login".to_string(),
        }
    }
}

/// Something that can move the UI to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that forwards routes into the controller's event channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    events: UnboundedSender<Event>,
}

impl ChannelNavigator {
    #[must_use]
    pub const fn new(events: UnboundedSender<Event>) -> Self {
        Self { events }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route.path(), "navigation requested");
        if self.events.send(Event::Navigate(route)).is_err() {
            tracing::debug!("event loop closed, dropping navigation");
        }
    }
}
