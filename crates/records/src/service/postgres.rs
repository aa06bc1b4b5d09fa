//! PostgreSQL 记录服务
//!
//! 主存储实现。查询使用运行时 SQL，建表见 `migrations/`。

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use admin_shared::error::{AdminError, Result};
use admin_shared::observability::metrics::record_operation;

use super::RecordService;
use crate::defaults;
use crate::models::{Category, Product, ProductPatch, Record, Role, User, UserPatch};

const BACKEND: &str = "postgres";

/// 基于连接池的记录服务
pub struct PgRecordService<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgRecordService<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

fn required<V>(value: Option<V>, field: &str) -> Result<V> {
    value.ok_or_else(|| AdminError::Validation(format!("{} is required", field)))
}

fn stock_to_db(stock: u32) -> Result<i32> {
    i32::try_from(stock).map_err(|_| AdminError::Validation(format!("stock out of range: {}", stock)))
}

// ==================== 用户 ====================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: Role,
    avatar: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            avatar: row.avatar,
            created_at: row.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, name, email, role, avatar, created_at";

impl PgRecordService<User> {
    /// 按原样写入一条完整用户记录（用于种子数据）
    pub async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, role, avatar, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.avatar)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// 删除全部用户，返回删除行数
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordService<User> for PgRecordService<User> {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>> {
        record_operation(User::KIND, "list", BACKEND);
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        record_operation(User::KIND, "get", BACKEND);
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, patch))]
    async fn create(&self, patch: UserPatch) -> Result<User> {
        record_operation(User::KIND, "create", BACKEND);
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: required(patch.name, "name")?,
            email: required(patch.email, "email")?,
            role: patch.role.unwrap_or_default(),
            avatar: defaults::avatar_or_default(patch.avatar.as_deref()),
            created_at: Utc::now(),
        };

        self.insert(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        record_operation(User::KIND, "update", BACKEND);
        let avatar = patch
            .avatar
            .map(|avatar| defaults::avatar_or_default(Some(&avatar)));

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                avatar = COALESCE($5, avatar)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.role)
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        record_operation(User::KIND, "delete", BACKEND);
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ==================== 商品 ====================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    category: Category,
    stock: i32,
    image_url: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            // 表上有 CHECK (stock >= 0)
            stock: u32::try_from(row.stock).unwrap_or(0),
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, stock, image_url, created_at";

impl PgRecordService<Product> {
    /// 按原样写入一条完整商品记录（用于种子数据）
    pub async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, stock, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category)
        .bind(stock_to_db(product.stock)?)
        .bind(&product.image_url)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// 删除全部商品，返回删除行数
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordService<Product> for PgRecordService<Product> {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>> {
        record_operation(Product::KIND, "list", BACKEND);
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<Product>> {
        record_operation(Product::KIND, "get", BACKEND);
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, patch))]
    async fn create(&self, patch: ProductPatch) -> Result<Product> {
        record_operation(Product::KIND, "create", BACKEND);
        let price = required(patch.price, "price")?;
        if price <= 0.0 {
            return Err(AdminError::Validation("price must be positive".to_string()));
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: required(patch.name, "name")?,
            description: required(patch.description, "description")?,
            price,
            category: required(patch.category, "category")?,
            stock: patch.stock.unwrap_or(0),
            image_url: defaults::image_or_default(patch.image_url.as_deref()),
            created_at: Utc::now(),
        };

        self.insert(&product).await?;
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>> {
        record_operation(Product::KIND, "update", BACKEND);
        let stock = patch.stock.map(stock_to_db).transpose()?;
        let image_url = patch
            .image_url
            .map(|url| defaults::image_or_default(Some(&url)));

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                stock = COALESCE($6, stock),
                image_url = COALESCE($7, image_url)
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.category)
        .bind(stock)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        record_operation(Product::KIND, "delete", BACKEND);
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
