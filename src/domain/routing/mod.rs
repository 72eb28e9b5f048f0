//! Routing Context - 网关路由上下文
//!
//! 按声明顺序匹配路径前缀规则，第一个命中的规则生效

mod errors;
mod path_pattern;
mod route;

pub use errors::RouteError;
pub use path_pattern::PathPattern;
pub use route::{RewritePath, RouteDefinition, RouteMatch, RouteTable, RouteTarget};
