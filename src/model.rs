// Data shapes returned by the diagram endpoints. Decoding is lenient:
// missing fields fall back to defaults and unknown fields are ignored, so
// the client keeps working when the service adds attributes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Owner of a diagram: a user or an organization.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Owner {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(deserialize_with = "null_as_default", rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// A single diagram as described by the service.
///
/// The folder, project and organization fields depend on server-side state
/// and are kept as raw JSON values; they are omitted from output when absent
/// or null.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Diagram {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url_for_api: String,
    #[serde(deserialize_with = "null_as_default")]
    pub diagram_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub security: String,
    #[serde(deserialize_with = "null_as_default", rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub own: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub shared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_key: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Value>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Value>,
}

/// Response of the diagram listing endpoint.
///
/// The service names the sequence `result`; we always emit it as `items`.
/// `count` is passed through as sent and not checked against `items`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DiagramList {
    #[serde(
        deserialize_with = "null_as_default",
        rename(serialize = "items", deserialize = "result"),
        alias = "items"
    )]
    pub items: Vec<Diagram>,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
}

impl DiagramList {
    /// Diagram identifiers in the order the service returned them.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|d| d.diagram_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_service_payload_and_ignores_unknown_fields() {
        let payload = json!({
            "url": "https://cacoo.com/diagrams/abc",
            "diagramId": "abc",
            "title": "Architecture",
            "security": "url",
            "type": "normal",
            "owner": {"name": "alice", "nickname": "Alice", "type": "user", "imageUrl": "x"},
            "own": true,
            "shared": false,
            "folderId": 12,
            "projectName": null,
            "created": "Mon, 10 Aug 2009 17:00:00 +0900",
            "someNewField": {"nested": true}
        });
        let diagram: Diagram = serde_json::from_value(payload).unwrap();
        assert_eq!(diagram.diagram_id, "abc");
        assert_eq!(diagram.owner.nickname, "Alice");
        assert_eq!(diagram.owner.kind, "user");
        assert_eq!(diagram.folder_id, Some(json!(12)));
        assert_eq!(diagram.project_name, None);
        assert!(diagram.own);
    }

    #[test]
    fn optional_fields_are_omitted_from_output() {
        let diagram = Diagram {
            diagram_id: "abc".into(),
            ..Default::default()
        };
        let out = serde_json::to_value(&diagram).unwrap();
        let obj = out.as_object().unwrap();
        assert_eq!(obj["diagramId"], "abc");
        assert!(obj.contains_key("owner"));
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("folderId"));
        assert!(!obj.contains_key("sheets"));
    }

    #[test]
    fn list_reads_result_and_writes_items() {
        let list: DiagramList = serde_json::from_value(json!({
            "result": [{"diagramId": "b"}, {"diagramId": "a"}],
            "count": 2
        }))
        .unwrap();
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["b", "a"]);

        let out = serde_json::to_value(&list).unwrap();
        assert_eq!(out["count"], 2);
        assert_eq!(out["items"].as_array().unwrap().len(), 2);
        assert!(out.get("result").is_none());
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let diagram: Diagram = serde_json::from_value(json!({
            "diagramId": "abc",
            "description": null,
            "own": null,
            "owner": {"name": "Alice", "nickname": null},
            "sheets": null
        }))
        .unwrap();
        assert_eq!(diagram.diagram_id, "abc");
        assert_eq!(diagram.description, "");
        assert!(!diagram.own);
        assert_eq!(diagram.owner.name, "Alice");
        assert_eq!(diagram.owner.nickname, "");
        assert!(diagram.sheets.is_empty());

        let bare_owner: Diagram = serde_json::from_value(json!({"owner": null})).unwrap();
        assert_eq!(bare_owner.owner, Owner::default());

        let list: DiagramList =
            serde_json::from_value(json!({"result": null, "count": null})).unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.count, 0);
    }

    #[test]
    fn list_accepts_items_key() {
        let list: DiagramList =
            serde_json::from_value(json!({"items": [{"diagramId": "z"}], "count": 1})).unwrap();
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["z"]);
    }
}
