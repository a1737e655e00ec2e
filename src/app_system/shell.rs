use crate::api::SessionContext;
use crate::domain::Role;

/// Views the shell can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Catalog,
    Cart,
    Orders,
    Wishlist,
    VendorDashboard,
    VendorOrders,
}

impl View {
    fn requires_auth(self) -> bool {
        !matches!(self, View::Landing | View::Catalog)
    }

    fn vendor_only(self) -> bool {
        matches!(self, View::VendorDashboard | View::VendorOrders)
    }
}

/// Top-level app shell: authenticated flag, role, requested view, search
/// query. Deliberately not a state machine; `current_view` is one switch
/// over those four pieces of state.
///
/// The session context is set once at startup (or at login) and handed down
/// by reference; components never re-derive it.
#[derive(Debug, Default)]
pub struct Shell {
    session: Option<SessionContext>,
    requested: View,
    search_query: String,
}

impl Shell {
    pub fn new(session: Option<SessionContext>) -> Self {
        Self {
            session,
            requested: View::default(),
            search_query: String::new(),
        }
    }

    pub fn authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().and_then(|session| session.role)
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn sign_in(&mut self, session: SessionContext) {
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        self.session = None;
        self.requested = View::Landing;
    }

    pub fn request_view(&mut self, view: View) {
        self.requested = view;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Resolves the requested view against the session flags: guests are
    /// sent to the landing page for protected views, customers cannot reach
    /// vendor views, and vendors land on their dashboard instead of the
    /// customer catalog.
    pub fn current_view(&self) -> View {
        let requested = self.requested;
        match (&self.session, self.role()) {
            (None, _) if requested.requires_auth() => View::Landing,
            (None, _) => requested,
            (Some(_), Some(Role::Vendor)) => match requested {
                View::Landing | View::Catalog | View::Cart | View::Orders | View::Wishlist => {
                    View::VendorDashboard
                }
                vendor_view => vendor_view,
            },
            (Some(_), _) if requested.vendor_only() => View::Catalog,
            (Some(_), _) => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_session() -> SessionContext {
        SessionContext {
            access_token: "token".to_string(),
            role: Some(Role::Customer),
        }
    }

    fn vendor_session() -> SessionContext {
        SessionContext {
            access_token: "token".to_string(),
            role: Some(Role::Vendor),
        }
    }

    #[test]
    fn guests_see_landing_for_protected_views() {
        let mut shell = Shell::new(None);
        shell.request_view(View::Cart);
        assert_eq!(shell.current_view(), View::Landing);
        shell.request_view(View::Catalog);
        assert_eq!(shell.current_view(), View::Catalog);
    }

    #[test]
    fn customers_cannot_reach_vendor_views() {
        let mut shell = Shell::new(Some(customer_session()));
        assert_eq!(shell.session().map(|s| s.role), Some(Some(Role::Customer)));
        shell.request_view(View::VendorOrders);
        assert_eq!(shell.current_view(), View::Catalog);
        shell.request_view(View::Orders);
        assert_eq!(shell.current_view(), View::Orders);
        shell.request_view(View::Wishlist);
        assert_eq!(shell.current_view(), View::Wishlist);
    }

    #[test]
    fn vendors_land_on_their_dashboard() {
        let mut shell = Shell::new(Some(vendor_session()));
        shell.request_view(View::Catalog);
        assert_eq!(shell.current_view(), View::VendorDashboard);
        shell.request_view(View::VendorOrders);
        assert_eq!(shell.current_view(), View::VendorOrders);
    }

    #[test]
    fn sign_out_resets_to_landing() {
        let mut shell = Shell::new(Some(customer_session()));
        shell.request_view(View::Cart);
        shell.sign_out();
        assert!(!shell.authenticated());
        assert_eq!(shell.current_view(), View::Landing);
    }
}
