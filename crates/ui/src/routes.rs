use std::collections::HashMap;

/// Page components reachable from the feature route tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    ContractList,
    ContractForm,
    ContractDetails,
    TierList,
    TierForm,
    TierDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Pattern relative to the feature mount point, e.g. `:id/edit`.
    pub path: &'static str,
    pub page: Page,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: HashMap<String, String>,
}

/// Ordered routes of one lazily loaded feature area.
#[derive(Debug, Clone)]
pub struct RouteTable {
    mount: &'static str,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(mount: &'static str, routes: Vec<Route>) -> Self {
        Self { mount, routes }
    }

    pub fn mount(&self) -> &str {
        self.mount
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route, in declaration order, matching `path` relative to the
    /// mount point.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            match_path(route.path, path).map(|params| RouteMatch { route, params })
        })
    }

    /// Resolve an absolute application path such as `/contracts/42/edit`.
    pub fn resolve_absolute(&self, path: &str) -> Option<RouteMatch<'_>> {
        let relative = strip_mount(self.mount, path)?;
        self.resolve(relative)
    }
}

pub fn contracts_routes() -> RouteTable {
    RouteTable::new(
        "contracts",
        vec![
            Route { path: "", page: Page::ContractList, title: "Contracts" },
            Route { path: "new", page: Page::ContractForm, title: "New contract" },
            Route { path: ":id", page: Page::ContractDetails, title: "Contract details" },
            Route { path: ":id/edit", page: Page::ContractForm, title: "Edit contract" },
        ],
    )
}

pub fn tiers_routes() -> RouteTable {
    RouteTable::new(
        "tiers",
        vec![
            Route { path: "", page: Page::TierList, title: "Tiers" },
            Route { path: "new", page: Page::TierForm, title: "New tier" },
            Route { path: ":id", page: Page::TierDetails, title: "Tier details" },
            Route { path: ":id/edit", page: Page::TierForm, title: "Edit tier" },
        ],
    )
}

/// All feature tables, in the order the application registers them.
pub fn feature_routes() -> Vec<RouteTable> {
    vec![contracts_routes(), tiers_routes()]
}

/// Resolve an absolute path against every feature table.
pub fn resolve<'a>(tables: &'a [RouteTable], path: &str) -> Option<RouteMatch<'a>> {
    tables.iter().find_map(|table| table.resolve_absolute(path))
}

fn strip_mount<'p>(mount: &str, path: &'p str) -> Option<&'p str> {
    let trimmed = path.trim_start_matches('/');
    let rest = trimmed.strip_prefix(mount)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Match a path pattern against a path, extracting named parameters.
/// Supports:
///   - Exact: `new`
///   - Parameters: `:id/edit` → extracts `id`
///   - Single wildcard: `*`
///   - Double wildcard: `docs/**` (matches any depth)
fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut params = HashMap::new();
    let mut ri = 0;

    for pp in pattern_parts {
        if pp == "**" {
            return Some(params);
        }

        let segment = *path_parts.get(ri)?;

        if let Some(name) = pp.strip_prefix(':') {
            params.insert(name.to_string(), segment.to_string());
        } else if pp != "*" && pp != segment {
            return None;
        }

        ri += 1;
    }

    (ri == path_parts.len()).then_some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(match_path("new", "new").is_some());
        assert!(match_path("new", "news").is_none());
        assert!(match_path("", "").is_some());
        assert!(match_path("", "/").is_some());
    }

    #[test]
    fn test_param_match() {
        let params = match_path(":id/edit", "42/edit").unwrap();
        assert_eq!(params.get("id").unwrap(), "42");
        assert!(match_path(":id/edit", "42").is_none());
    }

    #[test]
    fn test_wildcards() {
        assert!(match_path("docs/**", "docs").is_some());
        assert!(match_path("docs/**", "docs/a/b").is_some());
        assert!(match_path("*/edit", "7/edit").is_some());
        assert!(match_path("*/edit", "7/view").is_none());
    }

    #[test]
    fn test_contract_routes() {
        let table = contracts_routes();

        assert_eq!(table.resolve("").unwrap().route.page, Page::ContractList);

        let create = table.resolve("new").unwrap();
        assert_eq!(create.route.page, Page::ContractForm);
        assert!(create.params.is_empty());

        let detail = table.resolve("42").unwrap();
        assert_eq!(detail.route.page, Page::ContractDetails);
        assert_eq!(detail.params["id"], "42");

        let edit = table.resolve("/42/edit/").unwrap();
        assert_eq!(edit.route.page, Page::ContractForm);
        assert_eq!(edit.route.title, "Edit contract");
        assert_eq!(edit.params["id"], "42");

        assert!(table.resolve("42/delete").is_none());
    }

    #[test]
    fn test_tier_routes_absolute() {
        let table = tiers_routes();

        assert_eq!(table.resolve_absolute("/tiers").unwrap().route.page, Page::TierList);
        assert_eq!(table.resolve_absolute("/tiers/new").unwrap().route.page, Page::TierForm);
        assert_eq!(table.resolve_absolute("tiers/5").unwrap().params["id"], "5");
        assert!(table.resolve_absolute("/tiersx/5").is_none());
        assert!(table.resolve_absolute("/contracts/5").is_none());
    }

    #[test]
    fn test_resolve_across_features() {
        let tables = feature_routes();

        let found = resolve(&tables, "/contracts/3/edit").unwrap();
        assert_eq!(found.route.page, Page::ContractForm);
        assert_eq!(found.params["id"], "3");

        assert_eq!(resolve(&tables, "/tiers/9").unwrap().route.page, Page::TierDetails);
        assert!(resolve(&tables, "/vehicles").is_none());
    }
}
