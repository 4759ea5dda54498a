use std::collections::HashMap;

use crate::models::{ClassLabel, Region, StudentRecord};

/// The exact (grade, class, region) cell a role may view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTriple {
    pub grade: i32,
    pub class_label: ClassLabel,
    pub region: Region,
}

impl ScopeTriple {
    pub fn covers(&self, record: &StudentRecord) -> bool {
        record.grade == self.grade
            && record.class_label == self.class_label
            && record.region == self.region
    }
}

#[derive(Debug, Clone)]
pub struct ScopeRegistry {
    scopes: HashMap<String, ScopeTriple>,
}

impl ScopeRegistry {
    pub fn builtin() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(
            "grade_8_admin".to_string(),
            ScopeTriple {
                grade: 8,
                class_label: ClassLabel::A,
                region: Region::North,
            },
        );
        scopes.insert(
            "grade_9_admin".to_string(),
            ScopeTriple {
                grade: 9,
                class_label: ClassLabel::B,
                region: Region::South,
            },
        );
        Self { scopes }
    }

    pub fn lookup(&self, role: &str) -> Option<&ScopeTriple> {
        self.scopes.get(role)
    }

    /// Known roles with their scopes, sorted by role name for stable output.
    pub fn roles(&self) -> Vec<(&str, &ScopeTriple)> {
        let mut roles: Vec<(&str, &ScopeTriple)> = self
            .scopes
            .iter()
            .map(|(role, scope)| (role.as_str(), scope))
            .collect();
        roles.sort_by_key(|(role, _)| *role);
        roles
    }
}
