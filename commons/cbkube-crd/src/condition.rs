use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// K8s-style condition reported by the operator on resources with observed
/// state (backups, restores, buckets).
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "lastTransitionTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transition_time: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionType {
    Ready,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// Look up a condition by type.
pub fn find(conds: &[Condition], t: &ConditionType) -> Option<Condition> {
    conds.iter().find(|c| &c.type_ == t).cloned()
}

/// True when the condition of the given type exists and reports `True`.
pub fn is_true(conds: &[Condition], t: &ConditionType) -> bool {
    find(conds, t).is_some_and(|c| c.status == ConditionStatus::True)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(t: ConditionType, s: ConditionStatus) -> Condition {
        Condition {
            type_: t,
            status: s,
            reason: None,
            message: None,
            last_transition_time: None,
        }
    }

    #[test]
    fn is_true_matches_type_and_status() {
        let conds = vec![
            cond(ConditionType::Ready, ConditionStatus::False),
            cond(ConditionType::Complete, ConditionStatus::True),
        ];
        assert!(!is_true(&conds, &ConditionType::Ready));
        assert!(is_true(&conds, &ConditionType::Complete));
        assert!(!is_true(&conds, &ConditionType::Error));
    }

    #[test]
    fn unknown_condition_types_deserialize() {
        let c: Condition = serde_json::from_str(
            r#"{"type":"SomethingNew","status":"True"}"#,
        )
        .unwrap();
        assert_eq!(c.type_, ConditionType::Unknown);
    }
}
