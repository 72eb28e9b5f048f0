//! Routing Context - Route Definitions

use regex::Regex;

use super::{PathPattern, RouteError};

const LOAD_BALANCED_SCHEME: &str = "lb://";

/// 路由目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// 逻辑服务名，转发前经服务注册表解析（`lb://name`）
    LoadBalanced(String),
    /// 固定地址（`http://host:port`）
    Direct(String),
}

impl RouteTarget {
    pub fn parse(uri: &str) -> Result<Self, RouteError> {
        if let Some(service) = uri.strip_prefix(LOAD_BALANCED_SCHEME) {
            let service = service.trim_end_matches('/');
            if service.is_empty() || service.contains('/') {
                return Err(RouteError::InvalidUri(uri.to_string()));
            }
            return Ok(Self::LoadBalanced(service.to_string()));
        }

        if uri.starts_with("http://") || uri.starts_with("https://") {
            return Ok(Self::Direct(uri.trim_end_matches('/').to_string()));
        }

        Err(RouteError::InvalidUri(uri.to_string()))
    }
}

impl std::fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadBalanced(service) => write!(f, "{}{}", LOAD_BALANCED_SCHEME, service),
            Self::Direct(url) => write!(f, "{}", url),
        }
    }
}

/// 路径重写过滤器
///
/// 替换串支持命名分组引用，如 `/feign/${segment}`
#[derive(Debug, Clone)]
pub struct RewritePath {
    regex: Regex,
    replacement: String,
}

impl RewritePath {
    pub fn new(regex: &str, replacement: impl Into<String>) -> Result<Self, RouteError> {
        let regex =
            Regex::new(regex).map_err(|e| RouteError::InvalidRewrite(format!("{}: {}", regex, e)))?;
        Ok(Self {
            regex,
            replacement: replacement.into(),
        })
    }

    pub fn apply(&self, path: &str) -> String {
        self.regex
            .replace_all(path, self.replacement.as_str())
            .into_owned()
    }
}

/// 单条路由规则
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    id: String,
    pattern: PathPattern,
    target: RouteTarget,
    rewrite: Option<RewritePath>,
}

impl RouteDefinition {
    pub fn new(id: impl Into<String>, path: &str, uri: &str) -> Result<Self, RouteError> {
        Ok(Self {
            id: id.into(),
            pattern: PathPattern::parse(path)?,
            target: RouteTarget::parse(uri)?,
            rewrite: None,
        })
    }

    pub fn with_rewrite(mut self, rewrite: RewritePath) -> Self {
        self.rewrite = Some(rewrite);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    fn forward_path(&self, path: &str) -> String {
        match &self.rewrite {
            Some(rewrite) => rewrite.apply(path),
            None => path.to_string(),
        }
    }
}

/// 路由匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route_id: String,
    pub target: RouteTarget,
    /// 转发到上游的路径（已应用重写）
    pub path: String,
}

/// 有序路由表，第一个命中的规则生效
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        Self { routes }
    }

    pub fn route(&self, path: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .map(|route| RouteMatch {
                route_id: route.id.clone(),
                target: route.target.clone(),
                path: route.forward_path(path),
            })
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency_routes() -> RouteTable {
        RouteTable::new(vec![
            RouteDefinition::new("currency-exchange", "/currency-exchange/**", "lb://currency-exchange")
                .unwrap(),
            RouteDefinition::new(
                "currency-conversion",
                "/currency-conversion/**",
                "lb://currency-conversion",
            )
            .unwrap(),
            RouteDefinition::new(
                "currency-conversion-feign",
                "/currency-conversion-feign/**",
                "lb://currency-conversion",
            )
            .unwrap(),
            RouteDefinition::new(
                "currency-conversion-new",
                "/currency-conversion-new/**",
                "lb://currency-conversion",
            )
            .unwrap()
            .with_rewrite(
                RewritePath::new(
                    "/currency-conversion-new/(?<segment>.*)",
                    "/currency-conversion-feign/${segment}",
                )
                .unwrap(),
            ),
        ])
    }

    #[test]
    fn test_route_exchange_unmodified() {
        let matched = currency_routes()
            .route("/currency-exchange/from/USD/to/INR")
            .unwrap();
        assert_eq!(matched.route_id, "currency-exchange");
        assert_eq!(
            matched.target,
            RouteTarget::LoadBalanced("currency-exchange".to_string())
        );
        assert_eq!(matched.path, "/currency-exchange/from/USD/to/INR");
    }

    #[test]
    fn test_route_feign_prefix_not_shadowed() {
        // `/currency-conversion/**` 不能吞掉 `/currency-conversion-feign/...`
        let matched = currency_routes()
            .route("/currency-conversion-feign/from/USD/to/INR/quantity/10")
            .unwrap();
        assert_eq!(matched.route_id, "currency-conversion-feign");
        assert_eq!(
            matched.path,
            "/currency-conversion-feign/from/USD/to/INR/quantity/10"
        );
    }

    #[test]
    fn test_route_new_is_rewritten() {
        let matched = currency_routes()
            .route("/currency-conversion-new/from/USD/to/INR/quantity/10")
            .unwrap();
        assert_eq!(matched.route_id, "currency-conversion-new");
        assert_eq!(
            matched.target,
            RouteTarget::LoadBalanced("currency-conversion".to_string())
        );
        assert_eq!(
            matched.path,
            "/currency-conversion-feign/from/USD/to/INR/quantity/10"
        );
    }

    #[test]
    fn test_route_no_match() {
        assert!(currency_routes().route("/limits").is_none());
        assert!(currency_routes().route("/currency-exchanges/x").is_none());
    }

    #[test]
    fn test_routes_keep_declaration_order() {
        let table = currency_routes();
        let summary: Vec<(String, String, String)> = table
            .routes()
            .iter()
            .map(|route| {
                (
                    route.id().to_string(),
                    route.pattern().to_string(),
                    route.target().to_string(),
                )
            })
            .collect();

        assert_eq!(summary.len(), 4);
        assert_eq!(
            summary[0],
            (
                "currency-exchange".to_string(),
                "/currency-exchange/**".to_string(),
                "lb://currency-exchange".to_string()
            )
        );
        assert_eq!(summary[3].0, "currency-conversion-new");
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            RouteDefinition::new("first", "/api/**", "lb://first").unwrap(),
            RouteDefinition::new("second", "/api/orders/**", "lb://second").unwrap(),
        ]);
        assert_eq!(table.route("/api/orders/1").unwrap().route_id, "first");
    }

    #[test]
    fn test_route_target_parse() {
        assert_eq!(
            RouteTarget::parse("lb://currency-exchange").unwrap(),
            RouteTarget::LoadBalanced("currency-exchange".to_string())
        );
        assert_eq!(
            RouteTarget::parse("http://localhost:8000/").unwrap(),
            RouteTarget::Direct("http://localhost:8000".to_string())
        );
        assert!(RouteTarget::parse("lb://").is_err());
        assert!(RouteTarget::parse("ftp://files").is_err());
    }

    #[test]
    fn test_invalid_rewrite_regex() {
        assert!(matches!(
            RewritePath::new("/broken/(", "/x"),
            Err(RouteError::InvalidRewrite(_))
        ));
    }
}
