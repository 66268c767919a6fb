//! DTOs for group endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::api::dto::input::trimmed_or_none;
use crate::domain::entities::Group;

/// Body of `POST /api/groups` and `PUT /api/groups/{id}`.
///
/// Both operations require a non-empty name; the name is trimmed and a blank
/// one counts as absent.
#[derive(Debug, Deserialize, Validate)]
pub struct GroupRequest {
    #[serde(default, deserialize_with = "trimmed_or_none")]
    #[validate(required, length(max = 255))]
    pub name: Option<String>,
}

/// Public projection of a group.
///
/// `users` maps member IDs to first names.
#[derive(Debug, Serialize)]
pub struct GroupResource {
    pub id: i64,
    pub name: String,
    pub users: BTreeMap<i64, String>,
}

impl From<Group> for GroupResource {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            users: group
                .users
                .into_iter()
                .map(|u| (u.id, u.first_name))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MemberRef;
    use serde_json::json;

    #[test]
    fn test_group_resource_shape() {
        let group = Group::new(
            3,
            "Engineers".to_string(),
            vec![
                MemberRef {
                    id: 12,
                    first_name: "Bob".to_string(),
                },
                MemberRef {
                    id: 5,
                    first_name: "Alice".to_string(),
                },
            ],
        );

        let value = serde_json::to_value(GroupResource::from(group)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 3,
                "name": "Engineers",
                "users": { "5": "Alice", "12": "Bob" }
            })
        );
    }

    #[test]
    fn test_empty_group_has_empty_users_object() {
        let value =
            serde_json::to_value(GroupResource::from(Group::new(1, "X".to_string(), vec![])))
                .unwrap();

        assert_eq!(value["users"], json!({}));
    }

    #[test]
    fn test_empty_name_is_missing() {
        let req: GroupRequest = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(req.name.is_none());
        assert!(req.validate().is_err());

        let req: GroupRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_name_is_missing() {
        let req: GroupRequest = serde_json::from_value(json!({ "name": "   " })).unwrap();

        assert!(req.name.is_none());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors()["name"][0].code, "required");
    }

    #[test]
    fn test_name_is_trimmed() {
        let req: GroupRequest = serde_json::from_value(json!({ "name": "  Ops \n" })).unwrap();

        assert_eq!(req.name.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_name_too_long() {
        let req: GroupRequest =
            serde_json::from_value(json!({ "name": "n".repeat(256) })).unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
