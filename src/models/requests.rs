use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{BudgetTier, MatchPreferences};

/// Request validation errors, each naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0} must be between 1 and 5")]
    OutOfRange(&'static str),

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("budget must be low, medium, or high")]
    InvalidBudget,
}

impl RequestError {
    /// Wire name of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            RequestError::MissingField(field)
            | RequestError::OutOfRange(field)
            | RequestError::InvalidType { field, .. } => field,
            RequestError::InvalidBudget => "budget",
        }
    }
}

/// Request to find neighborhood matches
///
/// Every field is optional at the serde level so that a missing key surfaces
/// as a field-specific validation error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(required)]
    pub budget: Option<String>,
    #[validate(required, range(min = 1, max = 5))]
    #[serde(rename = "safetyImportance", alias = "safety_importance")]
    pub safety_importance: Option<i64>,
    #[validate(required, range(min = 1, max = 5))]
    #[serde(rename = "walkabilityImportance", alias = "walkability_importance")]
    pub walkability_importance: Option<i64>,
    #[validate(required)]
    #[serde(rename = "familyFriendly", alias = "family_friendly")]
    pub family_friendly: Option<bool>,
    #[validate(required)]
    #[serde(rename = "quietEnvironment", alias = "quiet_environment")]
    pub quiet_environment: Option<bool>,
}

/// (struct field, wire name) in the order fields are reported
const FIELDS: [(&str, &str); 5] = [
    ("budget", "budget"),
    ("safety_importance", "safetyImportance"),
    ("walkability_importance", "walkabilityImportance"),
    ("family_friendly", "familyFriendly"),
    ("quiet_environment", "quietEnvironment"),
];

impl TryFrom<Value> for FindMatchesRequest {
    type Error = RequestError;

    /// Typed extraction that reports a mistyped value by its field name
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = body else {
            return Err(RequestError::InvalidType {
                field: "body",
                expected: "a JSON object",
            });
        };

        Ok(Self {
            budget: typed_field(&fields, "budget", "a string", |v| {
                v.as_str().map(String::from)
            })?,
            safety_importance: integer_field(&fields, "safetyImportance")?,
            walkability_importance: integer_field(&fields, "walkabilityImportance")?,
            family_friendly: typed_field(
                &fields,
                "familyFriendly",
                "true or false",
                Value::as_bool,
            )?,
            quiet_environment: typed_field(
                &fields,
                "quietEnvironment",
                "true or false",
                Value::as_bool,
            )?,
        })
    }
}

/// Missing or null keys yield `None`; present values must convert
fn typed_field<T>(
    fields: &Map<String, Value>,
    field: &'static str,
    expected: &'static str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, RequestError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => convert(value)
            .map(Some)
            .ok_or(RequestError::InvalidType { field, expected }),
    }
}

fn integer_field(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, RequestError> {
    match fields.get(field) {
        // Integers too large for i64 are still integers, just out of range
        Some(Value::Number(n)) if n.as_i64().is_none() && n.as_u64().is_some() => {
            Err(RequestError::OutOfRange(field))
        }
        _ => typed_field(fields, field, "an integer", Value::as_i64),
    }
}

impl FindMatchesRequest {
    /// Validate the payload and convert it into scorer preferences
    ///
    /// Reports the first offending field in declaration order.
    pub fn into_preferences(self) -> Result<MatchPreferences, RequestError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            for (field, wire) in FIELDS {
                if field_errors.contains_key(field) || field_errors.contains_key(wire) {
                    return Err(self.describe_invalid(wire));
                }
            }
        }

        let budget = self
            .budget
            .as_deref()
            .ok_or(RequestError::MissingField("budget"))?
            .parse::<BudgetTier>()
            .map_err(|_| RequestError::InvalidBudget)?;

        Ok(MatchPreferences {
            budget,
            safety_importance: importance(self.safety_importance, "safetyImportance")?,
            walkability_importance: importance(
                self.walkability_importance,
                "walkabilityImportance",
            )?,
            family_friendly: self
                .family_friendly
                .ok_or(RequestError::MissingField("familyFriendly"))?,
            quiet_environment: self
                .quiet_environment
                .ok_or(RequestError::MissingField("quietEnvironment"))?,
        })
    }

    fn describe_invalid(&self, wire: &'static str) -> RequestError {
        let present = match wire {
            "budget" => self.budget.is_some(),
            "safetyImportance" => self.safety_importance.is_some(),
            "walkabilityImportance" => self.walkability_importance.is_some(),
            "familyFriendly" => self.family_friendly.is_some(),
            _ => self.quiet_environment.is_some(),
        };

        if present {
            RequestError::OutOfRange(wire)
        } else {
            RequestError::MissingField(wire)
        }
    }
}

fn importance(value: Option<i64>, field: &'static str) -> Result<u8, RequestError> {
    let value = value.ok_or(RequestError::MissingField(field))?;
    match u8::try_from(value) {
        Ok(v) if (1..=5).contains(&v) => Ok(v),
        _ => Err(RequestError::OutOfRange(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> FindMatchesRequest {
        FindMatchesRequest {
            budget: Some("medium".to_string()),
            safety_importance: Some(4),
            walkability_importance: Some(3),
            family_friendly: Some(true),
            quiet_environment: Some(false),
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let prefs = valid_request().into_preferences().unwrap();

        assert_eq!(prefs.budget, BudgetTier::Medium);
        assert_eq!(prefs.safety_importance, 4);
        assert_eq!(prefs.walkability_importance, 3);
        assert!(prefs.family_friendly);
        assert!(!prefs.quiet_environment);
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut req = valid_request();
        req.walkability_importance = None;

        let err = req.into_preferences().unwrap_err();
        assert_eq!(err, RequestError::MissingField("walkabilityImportance"));
        assert_eq!(err.to_string(), "Missing required field: walkabilityImportance");
    }

    #[test]
    fn test_first_missing_field_reported() {
        let err = FindMatchesRequest::default().into_preferences().unwrap_err();
        assert_eq!(err.field(), "budget");
    }

    #[test]
    fn test_importance_out_of_range() {
        let mut req = valid_request();
        req.safety_importance = Some(6);
        assert_eq!(
            req.into_preferences().unwrap_err(),
            RequestError::OutOfRange("safetyImportance")
        );

        let mut req = valid_request();
        req.walkability_importance = Some(0);
        assert_eq!(
            req.into_preferences().unwrap_err(),
            RequestError::OutOfRange("walkabilityImportance")
        );
    }

    #[test]
    fn test_unknown_budget_rejected() {
        let mut req = valid_request();
        req.budget = Some("luxury".to_string());

        let err = req.into_preferences().unwrap_err();
        assert_eq!(err, RequestError::InvalidBudget);
        assert_eq!(err.field(), "budget");
    }

    #[test]
    fn test_from_value_accepts_valid_payload() {
        let req = FindMatchesRequest::try_from(serde_json::json!({
            "budget": "high",
            "safetyImportance": 2,
            "walkabilityImportance": 4,
            "familyFriendly": true,
            "quietEnvironment": false
        }))
        .unwrap();

        let prefs = req.into_preferences().unwrap();
        assert_eq!(prefs.budget, BudgetTier::High);
        assert_eq!(prefs.walkability_importance, 4);
    }

    #[test]
    fn test_from_value_names_mistyped_field() {
        let cases = [
            (serde_json::json!({ "familyFriendly": "yes" }), "familyFriendly"),
            (serde_json::json!({ "quietEnvironment": 1 }), "quietEnvironment"),
            (serde_json::json!({ "safetyImportance": "high" }), "safetyImportance"),
            (serde_json::json!({ "walkabilityImportance": 2.5 }), "walkabilityImportance"),
            (serde_json::json!({ "budget": 7 }), "budget"),
        ];

        for (body, field) in cases {
            let err = FindMatchesRequest::try_from(body).unwrap_err();
            assert!(matches!(err, RequestError::InvalidType { .. }), "{}: {:?}", field, err);
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_from_value_boolean_message() {
        let err = FindMatchesRequest::try_from(serde_json::json!({ "familyFriendly": "yes" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "familyFriendly must be true or false");
    }

    #[test]
    fn test_from_value_missing_and_null_become_missing_fields() {
        let req = FindMatchesRequest::try_from(serde_json::json!({
            "budget": null,
            "safetyImportance": 3
        }))
        .unwrap();

        assert_eq!(
            req.into_preferences().unwrap_err(),
            RequestError::MissingField("budget")
        );
    }

    #[test]
    fn test_from_value_huge_integer_is_out_of_range() {
        let err = FindMatchesRequest::try_from(serde_json::json!({
            "safetyImportance": u64::MAX
        }))
        .unwrap_err();

        assert_eq!(err, RequestError::OutOfRange("safetyImportance"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = FindMatchesRequest::try_from(serde_json::json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.field(), "body");
    }

    #[test]
    fn test_deserialize_camel_case_payload() {
        let req: FindMatchesRequest = serde_json::from_str(
            r#"{"budget":"low","safetyImportance":5,"walkabilityImportance":2,"familyFriendly":false,"quietEnvironment":true}"#,
        )
        .unwrap();

        let prefs = req.into_preferences().unwrap();
        assert_eq!(prefs.budget, BudgetTier::Low);
        assert_eq!(prefs.walkability_importance, 2);
        assert!(prefs.quiet_environment);
    }
}
