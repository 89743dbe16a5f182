//! Placement rules for field groups.

use fieldsmith_core::Value;

/// One condition deciding where a field group appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRule {
    pub param: String,
    pub operator: String,
    pub value: String,
}

impl LocationRule {
    pub fn new(
        param: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Lower to a `{param, operator, value}` map.
    pub fn to_value(&self) -> Value {
        [
            ("param", self.param.as_str()),
            ("operator", self.operator.as_str()),
            ("value", self.value.as_str()),
        ]
        .into_iter()
        .collect()
    }
}

/// The placement of a field group.
///
/// The host reads locations as OR-groups of AND-rules. `Rules` is a single
/// OR-group; `Any` spells out several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locations {
    Rules(Vec<LocationRule>),
    Any(Vec<Vec<LocationRule>>),
}

impl Locations {
    /// No placement rules.
    pub fn none() -> Self {
        Self::Rules(Vec::new())
    }

    /// Normalize to OR-groups, dropping empty ones.
    pub fn into_groups(self) -> Vec<Vec<LocationRule>> {
        let groups = match self {
            Self::Rules(rules) => vec![rules],
            Self::Any(groups) => groups,
        };
        groups.into_iter().filter(|g| !g.is_empty()).collect()
    }
}

impl Default for Locations {
    fn default() -> Self {
        Self::none()
    }
}

/// The `[param, operator, value]` shorthand for a single rule.
impl<S: Into<String>> From<[S; 3]> for Locations {
    fn from([param, operator, value]: [S; 3]) -> Self {
        Self::Rules(vec![LocationRule::new(param, operator, value)])
    }
}

impl From<LocationRule> for Locations {
    fn from(rule: LocationRule) -> Self {
        Self::Rules(vec![rule])
    }
}

impl From<Vec<LocationRule>> for Locations {
    fn from(rules: Vec<LocationRule>) -> Self {
        Self::Rules(rules)
    }
}
