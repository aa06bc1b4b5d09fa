//! 默认值
//!
//! 头像、商品图片为空时使用的固定 URL，以及兜底创建时补齐缺失字段的占位文本。

use chrono::{DateTime, Utc};

/// 默认用户头像
pub const DEFAULT_AVATAR_URL: &str =
    "https://ui-avatars.com/api/?background=random&name=User&color=fff";

/// 默认商品图片
pub const DEFAULT_PRODUCT_IMAGE_URL: &str =
    "https://placehold.co/400x300/e2e8f0/1e293b?text=Product";

pub const PLACEHOLDER_USER_NAME: &str = "User";
pub const PLACEHOLDER_PRODUCT_NAME: &str = "Unnamed product";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// 头像 URL，去除首尾空白后为空则返回默认头像
pub fn avatar_or_default(candidate: Option<&str>) -> String {
    or_default(candidate, DEFAULT_AVATAR_URL)
}

/// 商品图片 URL，去除首尾空白后为空则返回默认图片
pub fn image_or_default(candidate: Option<&str>) -> String {
    or_default(candidate, DEFAULT_PRODUCT_IMAGE_URL)
}

/// 缺失邮箱时的占位地址：user_<毫秒时间戳>@example.com
pub fn placeholder_email(now: DateTime<Utc>) -> String {
    format!("user_{}@example.com", now.timestamp_millis())
}

fn or_default(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}
