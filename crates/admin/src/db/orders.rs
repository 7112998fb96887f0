//! Order management repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, OrderId, OrderStatus, UserId};

use super::RepositoryError;

/// An order as seen by staff, including the purchaser.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_email: String,
    pub status: OrderStatus,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub postcode: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub memo: Option<String>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<AdminOrderItem>,
}

/// A line item snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderItem {
    pub artwork_id: ArtworkId,
    pub title: String,
    pub artist_name: String,
    pub price: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct AdminOrderRow {
    id: i32,
    user_id: i32,
    user_email: String,
    status: OrderStatus,
    recipient_name: String,
    recipient_phone: String,
    postcode: String,
    address: String,
    address_detail: Option<String>,
    memo: Option<String>,
    total: Decimal,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    order_id: i32,
    artwork_id: i32,
    title: String,
    artist_name: String,
    price: Decimal,
}

impl AdminOrderRow {
    fn into_order(self, items: Vec<AdminOrderItem>) -> AdminOrder {
        AdminOrder {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            user_email: self.user_email,
            status: self.status,
            recipient_name: self.recipient_name,
            recipient_phone: self.recipient_phone,
            postcode: self.postcode,
            address: self.address,
            address_detail: self.address_detail,
            memo: self.memo,
            total: self.total,
            created_at: self.created_at,
            items,
        }
    }
}

const ORDER_SELECT: &str = "SELECT o.id, o.user_id, u.email AS user_email, o.status, \
     o.recipient_name, o.recipient_phone, o.postcode, o.address, o.address_detail, \
     o.memo, o.total, o.created_at \
     FROM orders o JOIN users u ON u.id = o.user_id";

/// Repository for order management.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders, optionally by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<AdminOrder>, RepositoryError> {
        let order_rows: Vec<AdminOrderRow> = if let Some(status) = status {
            sqlx::query_as(&format!(
                "{ORDER_SELECT} WHERE o.status = $1 ORDER BY o.created_at DESC, o.id DESC"
            ))
            .bind(status)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "{ORDER_SELECT} ORDER BY o.created_at DESC, o.id DESC"
            ))
            .fetch_all(self.pool)
            .await?
        };

        self.populate_items(order_rows).await
    }

    /// Get one order with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<AdminOrder>, RepositoryError> {
        let row: Option<AdminOrderRow> =
            sqlx::query_as(&format!("{ORDER_SELECT} WHERE o.id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.populate_items(vec![row]).await?.into_iter().next())
    }

    /// Set an order's status.
    ///
    /// Returns the updated order so callers can notify the purchaser.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<AdminOrder, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Dashboard count of orders awaiting handling.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pending_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'pending'")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Attach items to a set of order rows.
    async fn populate_items(
        &self,
        order_rows: Vec<AdminOrderRow>,
    ) -> Result<Vec<AdminOrder>, RepositoryError> {
        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = order_rows.iter().map(|o| o.id).collect();
        let item_rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT order_id, artwork_id, title, artist_name, price \
             FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<AdminOrderItem>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(AdminOrderItem {
                    artwork_id: ArtworkId::new(item.artwork_id),
                    title: item.title,
                    artist_name: item.artist_name,
                    price: item.price,
                });
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect())
    }
}
