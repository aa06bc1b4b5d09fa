//! 请求/响应 DTO
//!
//! 请求体在进入服务层之前完成校验，通过后转换为记录补丁。

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::models::{Category, Product, ProductPatch, Role, User, UserPatch};

/// 空字符串或合法 URL（空值由默认图片替换）
fn blank_or_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("must be a valid URL or empty".into()))
    }
}

/// 去除首尾空白后至少 2 个字符
fn name_length(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= 2 {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message("name must be at least 2 characters".into()))
    }
}

/// 数据库库存列为 INTEGER
const STOCK_MAX: u32 = i32::MAX as u32;

// ==================== 用户 ====================

/// 创建用户请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "name_length"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub role: Role,
    #[validate(custom(function = "blank_or_url"))]
    pub avatar: Option<String>,
}

impl From<CreateUserRequest> for UserPatch {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: Some(req.name),
            email: Some(req.email),
            role: Some(req.role),
            avatar: req.avatar,
        }
    }
}

/// 更新用户请求，只校验出现的字段
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "name_length"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    #[validate(custom(function = "blank_or_url"))]
    pub avatar: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            avatar: req.avatar,
        }
    }
}

/// 用户列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<usize>,
}

/// 用户列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    /// 截断前的总数
    pub total: usize,
}

// ==================== 商品 ====================

/// 创建商品请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(custom(function = "name_length"))]
    pub name: String,
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    pub category: Category,
    #[validate(range(max = STOCK_MAX, message = "stock out of range"))]
    pub stock: u32,
    #[validate(custom(function = "blank_or_url"))]
    pub image_url: Option<String>,
}

impl From<CreateProductRequest> for ProductPatch {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: Some(req.name),
            description: Some(req.description),
            price: Some(req.price),
            category: Some(req.category),
            stock: Some(req.stock),
            image_url: req.image_url,
        }
    }
}

/// 更新商品请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "name_length"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: Option<f64>,
    pub category: Option<Category>,
    #[validate(range(max = STOCK_MAX, message = "stock out of range"))]
    pub stock: Option<u32>,
    #[validate(custom(function = "blank_or_url"))]
    pub image_url: Option<String>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            stock: req.stock,
            image_url: req.image_url,
        }
    }
}

/// 商品列表直接返回数组
pub type ProductListResponse = Vec<Product>;

/// 删除响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}
