use serde::{Deserialize, Serialize};

use crate::entities::movie;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    /// Free-form, at most four characters. Not checked for digits.
    pub year: String,
}

impl From<movie::Model> for Movie {
    fn from(model: movie::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }
}
