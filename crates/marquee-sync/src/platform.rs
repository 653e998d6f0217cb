use std::fmt;

use serde::{Deserialize, Serialize};

/// Build-target groups a host project can scope configuration to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetGroup {
    Standalone,
    Server,
    Ios,
    Android,
    WebGl,
    Switch,
}

impl TargetGroup {
    pub const ALL: [TargetGroup; 6] = [
        TargetGroup::Standalone,
        TargetGroup::Server,
        TargetGroup::Ios,
        TargetGroup::Android,
        TargetGroup::WebGl,
        TargetGroup::Switch,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TargetGroup::Standalone => "standalone",
            TargetGroup::Server => "server",
            TargetGroup::Ios => "ios",
            TargetGroup::Android => "android",
            TargetGroup::WebGl => "webgl",
            TargetGroup::Switch => "switch",
        }
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What the registry knows about one target group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSupport {
    Supported,
    Unsupported,
    Unknown,
}

/// Which target groups exist for the running host and whether each one
/// resolves to an installed platform.
pub trait PlatformRegistry {
    fn groups(&self) -> Vec<TargetGroup> {
        TargetGroup::ALL.to_vec()
    }

    fn support(&self, group: TargetGroup) -> PlatformSupport;

    /// Whether defines may be mutated for `group`. A group the host
    /// cannot resolve stays eligible.
    fn is_eligible(&self, group: TargetGroup) -> bool {
        !matches!(self.support(group), PlatformSupport::Unsupported)
    }
}

/// Registry shaped like a stock editor install: desktop, mobile and web
/// groups resolve; console support depends on licensing and reports
/// unknown.
#[derive(Debug, Clone, Default)]
pub struct EditorPlatformRegistry;

impl PlatformRegistry for EditorPlatformRegistry {
    fn support(&self, group: TargetGroup) -> PlatformSupport {
        match group {
            TargetGroup::Switch => PlatformSupport::Unknown,
            _ => PlatformSupport::Supported,
        }
    }
}
