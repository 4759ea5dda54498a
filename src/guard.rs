use crate::intent::QueryIntent;
use crate::scope::{ScopeRegistry, ScopeTriple};

#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Granted { effective: ScopeTriple },
    Denied,
}

/// Checks a candidate intent against the role's scope. A present field must
/// equal the role's scope value exactly; an absent field substitutes the
/// role's own value. An explicit mismatch denies, it is never clamped.
pub fn authorize(registry: &ScopeRegistry, role: &str, intent: &QueryIntent) -> AccessDecision {
    let scope = match registry.lookup(role) {
        Some(scope) => scope,
        None => return AccessDecision::Denied,
    };

    if let Some(grade) = intent.grade {
        if grade != scope.grade {
            return AccessDecision::Denied;
        }
    }

    if let Some(class_label) = intent.class_label.as_deref() {
        if class_label != scope.class_label.as_str() {
            return AccessDecision::Denied;
        }
    }

    if let Some(region) = intent.region.as_deref() {
        if region != scope.region.as_str() {
            return AccessDecision::Denied;
        }
    }

    // Absent fields default to the role's own scope, so the effective scope
    // is always the role's triple once every present field has matched.
    AccessDecision::Granted {
        effective: scope.clone(),
    }
}
