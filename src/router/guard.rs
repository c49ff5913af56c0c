//! Navigation guard.
//!
//! A pure decision over two inputs: what the navigation resolved to, and
//! whether a token is present. Nothing else feeds the decision and the guard
//! has no failure path or side effects. Token presence is passed in by the
//! caller rather than read from ambient state.

use super::routes::{Route, AUTHENTICATED_LANDING, PUBLIC_LANDING};

/// Route names starting with this prefix are the public/auth screens
const WELCOME_PREFIX: &str = "welcome";

/// What a navigation attempt resolved to.
#[derive(Debug, Clone, Copy)]
pub struct NavigationTarget<'a> {
    /// Name of the destination route, when the path matched one
    pub name: Option<&'a str>,
    /// Whether any route matched the requested path
    pub matched: bool,
}

impl<'a> NavigationTarget<'a> {
    pub fn from_route(route: Option<&'a Route>) -> Self {
        Self {
            name: route.map(|r| r.name),
            matched: route.is_some(),
        }
    }
}

/// Guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Continue to the requested destination
    Proceed,
    /// Go to this path instead
    Redirect(&'static str),
}

/// Decide a navigation. Arms are evaluated in a fixed order: the
/// unauthenticated redirect wins over the authenticated redirect, which wins
/// over the unknown-path redirect, and anything left through proceeds.
pub fn check(target: NavigationTarget, authenticated: bool) -> Verdict {
    match target.name {
        Some(name) if !authenticated && !name.starts_with(WELCOME_PREFIX) => {
            Verdict::Redirect(PUBLIC_LANDING)
        }
        Some(name) if authenticated && name.starts_with(WELCOME_PREFIX) => {
            Verdict::Redirect(AUTHENTICATED_LANDING)
        }
        _ if !target.matched => {
            // Unknown paths redirect silently by token presence; there is no
            // not-found screen.
            if authenticated {
                Verdict::Redirect(AUTHENTICATED_LANDING)
            } else {
                Verdict::Redirect(PUBLIC_LANDING)
            }
        }
        _ => Verdict::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::super::routes::{find, resolve, ROUTES};
    use super::*;

    fn target_for_path(path: &str) -> NavigationTarget<'static> {
        NavigationTarget::from_route(resolve(path))
    }

    fn target_for_name(name: &str) -> NavigationTarget<'static> {
        NavigationTarget::from_route(find(name))
    }

    #[test]
    fn test_authenticated_always_leaves_welcome_screens() {
        for route in ROUTES.iter().filter(|r| r.name.starts_with("welcome")) {
            let verdict = check(NavigationTarget::from_route(Some(route)), true);
            assert_eq!(verdict, Verdict::Redirect("/index"), "route {}", route.name);
        }
    }

    #[test]
    fn test_unauthenticated_never_reaches_protected_screens() {
        for route in ROUTES.iter().filter(|r| !r.name.starts_with("welcome")) {
            let verdict = check(NavigationTarget::from_route(Some(route)), false);
            assert_eq!(verdict, Verdict::Redirect("/"), "route {}", route.name);
        }
    }

    #[test]
    fn test_authenticated_proceeds_outside_welcome() {
        for route in ROUTES.iter().filter(|r| !r.name.starts_with("welcome")) {
            let verdict = check(NavigationTarget::from_route(Some(route)), true);
            assert_eq!(verdict, Verdict::Proceed, "route {}", route.name);
        }
    }

    #[test]
    fn test_unauthenticated_proceeds_inside_welcome() {
        for route in ROUTES.iter().filter(|r| r.name.starts_with("welcome")) {
            let verdict = check(NavigationTarget::from_route(Some(route)), false);
            assert_eq!(verdict, Verdict::Proceed, "route {}", route.name);
        }
    }

    #[test]
    fn test_unknown_path_redirects_by_token_presence_alone() {
        for path in ["/unknown", "/admin", "/x/y"] {
            assert_eq!(check(target_for_path(path), true), Verdict::Redirect("/index"));
            assert_eq!(check(target_for_path(path), false), Verdict::Redirect("/"));
        }
    }

    // The concrete scenarios the portal is known by

    #[test]
    fn test_scenario_register_while_logged_out() {
        assert_eq!(check(target_for_name("welcome-register"), false), Verdict::Proceed);
    }

    #[test]
    fn test_scenario_index_while_logged_out() {
        assert_eq!(check(target_for_path("/index"), false), Verdict::Redirect("/"));
    }

    #[test]
    fn test_scenario_login_screen_while_logged_in() {
        assert_eq!(
            check(target_for_name("welcome-login"), true),
            Verdict::Redirect("/index")
        );
    }

    #[test]
    fn test_scenario_unknown_while_logged_in() {
        assert_eq!(check(target_for_path("/unknown"), true), Verdict::Redirect("/index"));
    }

    // Ordering: a named target takes its named-case arm even if flagged
    // unmatched, because the name checks come first.

    #[test]
    fn test_named_arms_win_over_unknown_arm() {
        let odd = NavigationTarget {
            name: Some("index"),
            matched: false,
        };
        assert_eq!(check(odd, false), Verdict::Redirect("/"));

        let odd = NavigationTarget {
            name: Some("welcome-login"),
            matched: false,
        };
        assert_eq!(check(odd, true), Verdict::Redirect("/index"));
    }

    #[test]
    fn test_unnamed_but_matched_proceeds() {
        let target = NavigationTarget {
            name: None,
            matched: true,
        };
        assert_eq!(check(target, true), Verdict::Proceed);
        assert_eq!(check(target, false), Verdict::Proceed);
    }
}
