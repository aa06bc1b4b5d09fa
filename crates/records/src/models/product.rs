//! 商品模型

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::defaults;

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub stock: u32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// 商品分类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum Category {
    #[default]
    Electronics,
    Clothing,
    Food,
    Home,
    Leisure,
}

/// 商品补丁
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}

impl Record for Product {
    type Patch = ProductPatch;

    const KIND: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = defaults::image_or_default(Some(&image_url));
        }
    }
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Home,
        Category::Leisure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Food => "food",
            Self::Home => "home",
            Self::Leisure => "leisure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "product-1".to_string(),
            name: "Laptop Pro".to_string(),
            description: "High performance laptop".to_string(),
            price: 1299.99,
            category: Category::Electronics,
            stock: 15,
            image_url: "https://picsum.photos/seed/laptop1/200/300".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_partial_patch() {
        let original = sample_product();
        let mut product = original.clone();

        product.apply(ProductPatch {
            price: Some(999.0),
            stock: Some(0),
            ..Default::default()
        });

        assert_eq!(product.price, 999.0);
        assert_eq!(product.stock, 0);
        assert_eq!(product.name, original.name);
        assert_eq!(product.category, original.category);
        assert_eq!(product.image_url, original.image_url);
        assert_eq!(product.created_at, original.created_at);
    }

    #[test]
    fn test_apply_blank_image_uses_default() {
        let mut product = sample_product();
        product.apply(ProductPatch {
            image_url: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(product.image_url, defaults::DEFAULT_PRODUCT_IMAGE_URL);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["category"], "electronics");
        assert_eq!(json["imageUrl"], "https://picsum.photos/seed/laptop1/200/300");
        assert_eq!(json["stock"], 15);
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let result = serde_json::from_str::<ProductPatch>(r#"{"stock":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("leisure".parse::<Category>().unwrap(), Category::Leisure);
        assert!("toys".parse::<Category>().is_err());
        assert_eq!(Category::ALL.len(), 5);
    }
}
