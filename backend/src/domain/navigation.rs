//! Client route table and the access guard applied before rendering a view.

use serde::Serialize;
use utoipa::ToSchema;

use super::{ParcelId, User};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where signed-in users without the admin role are sent.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Views the front end can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// `/`
    Landing,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/dashboard`
    Dashboard,
    /// `/parcels`
    Parcels,
    /// `/parcels/create`
    CreateParcel,
    /// `/parcels/:id`
    ParcelDetails(ParcelId),
    /// `/profile`
    Profile,
    /// `/admin`
    Admin,
    /// Any path without a view.
    NotFound,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in admins only.
    Admin,
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the requested view.
    Allow,
    /// Navigate to the given path instead.
    Redirect(String),
}

impl AppRoute {
    /// Match a path, ignoring a trailing slash and any query string.
    ///
    /// Unmatched paths map to [`AppRoute::NotFound`].
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::AppRoute;
    ///
    /// assert_eq!(AppRoute::parse("/parcels/create"), AppRoute::CreateParcel);
    /// assert!(matches!(AppRoute::parse("/parcels/parcel-abc1234"), AppRoute::ParcelDetails(_)));
    /// assert_eq!(AppRoute::parse("/nowhere"), AppRoute::NotFound);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/parcels" => Self::Parcels,
            "/parcels/create" => Self::CreateParcel,
            "/profile" => Self::Profile,
            "/admin" => Self::Admin,
            other => other
                .strip_prefix("/parcels/")
                .filter(|id| !id.contains('/'))
                .and_then(|id| ParcelId::new(id).ok())
                .map_or(Self::NotFound, Self::ParcelDetails),
        }
    }

    /// Access level required to open the route.
    #[must_use]
    pub const fn access(&self) -> RouteAccess {
        match self {
            Self::Landing | Self::Login | Self::Register | Self::NotFound => RouteAccess::Public,
            Self::Admin => RouteAccess::Admin,
            Self::Dashboard
            | Self::Parcels
            | Self::CreateParcel
            | Self::ParcelDetails(_)
            | Self::Profile => RouteAccess::Authenticated,
        }
    }
}

/// Decide whether `user` may open `route`.
///
/// Anonymous visitors to protected routes go to `/login`; signed-in
/// non-admins opening `/admin` go to `/dashboard`.
#[must_use]
pub fn guard(route: &AppRoute, user: Option<&User>) -> GuardDecision {
    match (route.access(), user) {
        (RouteAccess::Public, _) => GuardDecision::Allow,
        (_, None) => GuardDecision::Redirect(LOGIN_PATH.to_owned()),
        (RouteAccess::Admin, Some(user)) if !user.is_admin() => {
            GuardDecision::Redirect(DASHBOARD_PATH.to_owned())
        }
        _ => GuardDecision::Allow,
    }
}
