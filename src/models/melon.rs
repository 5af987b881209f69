use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::price::Price;

lazy_static::lazy_static! {
    static ref MELON_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// A catalog record. Melons are loaded once and never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
pub struct Melon {
    #[validate(length(min = 1, max = 32, message = "Melon id must be 1-32 characters"))]
    #[validate(regex(
        path = "MELON_ID_REGEX",
        message = "Melon id can only contain letters, numbers, '-' and '_'"
    ))]
    pub id: String,

    #[validate(length(min = 1, max = 50, message = "Melon type must be 1-50 characters"))]
    pub melon_type: String,

    #[validate(length(min = 1, max = 100, message = "Common name must be 1-100 characters"))]
    pub common_name: String,

    pub price: Price,

    pub image_url: String,

    pub color: String,

    pub seedless: bool,
}

impl Melon {
    pub fn new(
        id: impl Into<String>,
        melon_type: impl Into<String>,
        common_name: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            melon_type: melon_type.into(),
            common_name: common_name.into(),
            price,
            image_url: String::new(),
            color: String::new(),
            seedless: false,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_seedless(mut self, seedless: bool) -> Self {
        self.seedless = seedless;
        self
    }

    pub fn price_str(&self) -> String {
        self.price.to_string()
    }
}
