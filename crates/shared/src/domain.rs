use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ItemId);

/// One catalog entry as held by the presenter.
///
/// Items are never mutated after decoding; a new fetch replaces the whole
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub image_url: String,
}

impl Item {
    pub fn new(id: i64, title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}
