use serde::{Deserialize, Serialize};

use crate::domain::{Item, ItemId};

/// Wire shape of one element of the catalog array.
///
/// Field names on the wire are mapped explicitly so the in-memory names can
/// follow Rust conventions. Extra wire fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "id")]
    pub id: i64,
    #[serde(rename = "title")]
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: ItemId(record.id),
            title: record.title,
            image_url: record.image_url,
        }
    }
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.0,
            title: item.title.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Decodes a full catalog payload, preserving server order.
///
/// Any malformed element fails the whole payload.
pub fn decode_catalog(body: &[u8]) -> serde_json::Result<Vec<Item>> {
    let records: Vec<ItemRecord> = serde_json::from_slice(body)?;
    Ok(records.into_iter().map(Item::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_names_in_server_order() {
        let body = br#"[
            {"id":2,"title":"Toad","imageUrl":"http://x/t.png"},
            {"id":1,"title":"Axolotl","imageUrl":"http://x/a.png","extra":true}
        ]"#;
        let items = decode_catalog(body).expect("decode");
        assert_eq!(
            items,
            vec![
                Item::new(2, "Toad", "http://x/t.png"),
                Item::new(1, "Axolotl", "http://x/a.png"),
            ]
        );
    }

    #[test]
    fn empty_title_is_accepted() {
        let items = decode_catalog(br#"[{"id":3,"title":"","imageUrl":""}]"#).expect("decode");
        assert_eq!(items[0].title, "");
    }

    #[test]
    fn missing_title_fails_whole_payload() {
        let body = br#"[
            {"id":1,"title":"Axolotl","imageUrl":"http://x/a.png"},
            {"id":2,"imageUrl":"http://x/b.png"}
        ]"#;
        let err = decode_catalog(body).expect_err("must fail");
        assert!(err.to_string().contains("title"), "unexpected error: {err}");
    }

    #[test]
    fn in_memory_name_is_not_accepted_on_the_wire() {
        let body = br#"[{"id":1,"title":"Axolotl","image_url":"http://x/a.png"}]"#;
        assert!(decode_catalog(body).is_err());
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(decode_catalog(br#"{"id":1,"title":"A","imageUrl":"u"}"#).is_err());
    }
}
