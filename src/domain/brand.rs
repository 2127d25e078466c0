use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Brand that products can be associated with.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Brand {
    pub id: i32,
    /// Unique display name.
    pub name: String,
    /// Optional homepage of the brand.
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new brand.
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub website: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewBrand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}

/// Full replacement of a brand's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateBrand {
    pub name: String,
    /// New website value; `None` clears it.
    pub website: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateBrand {
    pub fn new(name: String, website: Option<String>) -> Self {
        Self {
            name,
            website,
            updated_at: Local::now().naive_utc(),
        }
    }
}
