//! Static route table.
//!
//! Mirrors the portal's screen map: three public screens under the
//! `welcome-*` namespace and the authenticated landing screen. The table is
//! fixed at compile time; paths resolve by exact match.

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

/// Path the guard sends unauthenticated users to
pub const PUBLIC_LANDING: &str = "/";

/// Path the guard sends authenticated users to
pub const AUTHENTICATED_LANDING: &str = "/index";

pub const ROUTES: [Route; 4] = [
    Route {
        name: "welcome-login",
        path: "/",
        requires_auth: false,
    },
    Route {
        name: "welcome-register",
        path: "/register",
        requires_auth: false,
    },
    Route {
        name: "welcome-forget",
        path: "/forget",
        requires_auth: false,
    },
    Route {
        name: "index",
        path: "/index",
        requires_auth: true,
    },
];

/// Route the app sits on before the first navigation is applied
pub const START_ROUTE: &Route = &ROUTES[0];

/// Resolve a path to its route, if any matches exactly
pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.path == path)
}

/// Look up a route by name
pub fn find(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(resolve("/").unwrap().name, "welcome-login");
        assert_eq!(resolve("/register").unwrap().name, "welcome-register");
        assert_eq!(resolve("/forget").unwrap().name, "welcome-forget");
        assert_eq!(resolve("/index").unwrap().name, "index");
    }

    #[test]
    fn test_resolve_is_exact_match() {
        assert!(resolve("/unknown").is_none());
        assert!(resolve("/register/").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("/INDEX").is_none());
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find("index").unwrap().path, "/index");
        assert_eq!(find("welcome-login").unwrap().path, "/");
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_only_non_welcome_routes_require_auth() {
        for route in &ROUTES {
            assert_eq!(route.requires_auth, !route.name.starts_with("welcome"));
        }
    }

    #[test]
    fn test_landing_paths_are_in_the_table() {
        assert!(resolve(PUBLIC_LANDING).is_some());
        assert!(resolve(AUTHENTICATED_LANDING).is_some());
    }
}
