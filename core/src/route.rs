//! Navigation destinations hosted by the shell.

/// The two destinations the product screens participate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Create,
}

impl Route {
    /// Resolve a path to a destination. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::List),
            "/create" => Some(Route::Create),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::List => "/",
            Route::Create => "/create",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_the_list() {
        assert_eq!(Route::from_path("/"), Some(Route::List));
        assert_eq!(Route::from_path(""), Some(Route::List));
        assert_eq!(Route::default(), Route::List);
    }

    #[test]
    fn create_path_with_or_without_trailing_slash() {
        assert_eq!(Route::from_path("/create"), Some(Route::Create));
        assert_eq!(Route::from_path("/create/"), Some(Route::Create));
    }

    #[test]
    fn unknown_path() {
        assert_eq!(Route::from_path("/products/1"), None);
    }

    #[test]
    fn paths_resolve_back() {
        for route in [Route::List, Route::Create] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
