//! Routing Context - Path Pattern

use super::RouteError;

/// 路径匹配模式
///
/// 支持两种形式:
/// - `/prefix/**`：匹配 `/prefix` 本身及其下所有子路径
/// - `/exact/path`：仅精确匹配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    prefix: String,
    subtree: bool,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::InvalidPattern(pattern.to_string()));
        }

        let (prefix, subtree) = match pattern.strip_suffix("/**") {
            Some(prefix) => (prefix, true),
            None => (pattern, false),
        };

        if prefix.contains('*') || prefix.contains('{') {
            return Err(RouteError::UnsupportedPattern(pattern.to_string()));
        }

        Ok(Self {
            raw: pattern.to_string(),
            prefix: prefix.to_string(),
            subtree,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        if !self.subtree {
            return path == self.prefix;
        }
        // `/**`
        if self.prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
