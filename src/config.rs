use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Permission that lifts every configured default down to its hard maximum.
pub const UNRESTRICTED_PERMISSION: &str = "worldedit.limit.unrestricted";

/// Editing limits and defaults. Missing fields take their defaults, so a
/// partial document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfiguration {
    pub default_change_limit: Option<usize>,
    pub max_change_limit: Option<usize>,
    pub default_max_polygonal_points: Option<usize>,
    pub max_polygonal_points: Option<usize>,
    pub default_max_polyhedron_points: Option<usize>,
    pub max_polyhedron_points: Option<usize>,
    pub history_size: usize,
    pub block_optimized_history: bool,
    pub batch_edits: bool,
}

impl Default for LocalConfiguration {
    fn default() -> Self {
        LocalConfiguration {
            default_change_limit: None,
            max_change_limit: None,
            default_max_polygonal_points: None,
            max_polygonal_points: Some(20),
            default_max_polyhedron_points: None,
            max_polyhedron_points: Some(20),
            history_size: 15,
            block_optimized_history: true,
            batch_edits: true,
        }
    }
}

/// Smaller of two optional limits, where `None` means unlimited.
fn tighter(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl LocalConfiguration {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn limit_for(
        &self,
        actor: &dyn Permissible,
        default: Option<usize>,
        max: Option<usize>,
    ) -> Option<usize> {
        if actor.has_permission(UNRESTRICTED_PERMISSION) {
            max
        } else {
            tighter(default, max)
        }
    }

    pub fn change_limit_for(&self, actor: &dyn Permissible) -> Option<usize> {
        self.limit_for(actor, self.default_change_limit, self.max_change_limit)
    }
}

/// Whoever issues edits; answers permission checks.
pub trait Permissible {
    fn has_permission(&self, permission: &str) -> bool;
}

/// Grants nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermissions;

impl Permissible for NoPermissions {
    fn has_permission(&self, _permission: &str) -> bool {
        false
    }
}

/// Grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPermissions;

impl Permissible for AllPermissions {
    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}

/// Vertex caps for selectors that accept an open-ended number of points.
/// `None` means unlimited.
pub trait SelectorLimits {
    fn polygon_vertex_limit(&self) -> Option<usize>;
    fn polyhedron_vertex_limit(&self) -> Option<usize>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveSelectorLimits;

impl SelectorLimits for PermissiveSelectorLimits {
    fn polygon_vertex_limit(&self) -> Option<usize> {
        None
    }

    fn polyhedron_vertex_limit(&self) -> Option<usize> {
        None
    }
}

/// Limits resolved from configuration for one actor.
pub struct ActorSelectorLimits<'a> {
    config: &'a LocalConfiguration,
    actor: &'a dyn Permissible,
}

impl<'a> ActorSelectorLimits<'a> {
    pub fn new(config: &'a LocalConfiguration, actor: &'a dyn Permissible) -> Self {
        ActorSelectorLimits { config, actor }
    }
}

impl SelectorLimits for ActorSelectorLimits<'_> {
    fn polygon_vertex_limit(&self) -> Option<usize> {
        self.config.limit_for(
            self.actor,
            self.config.default_max_polygonal_points,
            self.config.max_polygonal_points,
        )
    }

    fn polyhedron_vertex_limit(&self) -> Option<usize> {
        self.config.limit_for(
            self.actor,
            self.config.default_max_polyhedron_points,
            self.config.max_polyhedron_points,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LocalConfiguration::from_json(r#"{ "history_size": 4, "max_polygonal_points": 8 }"#).unwrap();
        assert_eq!(config.history_size, 4);
        assert_eq!(config.max_polygonal_points, Some(8));
        assert!(config.block_optimized_history);
        assert!(LocalConfiguration::from_json("{ not json").is_err());
    }

    #[test]
    fn test_actor_limits() {
        let config = LocalConfiguration {
            default_max_polygonal_points: Some(10),
            max_polygonal_points: Some(30),
            default_change_limit: Some(1000),
            max_change_limit: None,
            ..Default::default()
        };
        let restricted = ActorSelectorLimits::new(&config, &NoPermissions);
        assert_eq!(restricted.polygon_vertex_limit(), Some(10));
        let unrestricted = ActorSelectorLimits::new(&config, &AllPermissions);
        assert_eq!(unrestricted.polygon_vertex_limit(), Some(30));
        assert_eq!(config.change_limit_for(&NoPermissions), Some(1000));
        assert_eq!(config.change_limit_for(&AllPermissions), None);
    }
}
