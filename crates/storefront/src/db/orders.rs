//! Customer order creation and history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::artwork::ArtworkSummary;

/// An order with its line items (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub postcode: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub memo: Option<String>,
    pub total: Decimal,
    pub total_display: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A line item snapshot taken at order time.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub artwork_id: ArtworkId,
    pub title: String,
    pub artist_name: String,
    pub price: Decimal,
}

/// Shipping details accepted from the checkout form.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub artwork_ids: Vec<ArtworkId>,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub postcode: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
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
struct OrderItemRow {
    order_id: i32,
    artwork_id: i32,
    title: String,
    artist_name: String,
    price: Decimal,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            status: self.status,
            recipient_name: self.recipient_name,
            recipient_phone: self.recipient_phone,
            postcode: self.postcode,
            address: self.address,
            address_detail: self.address_detail,
            memo: self.memo,
            total: self.total,
            total_display: ArtworkSummary::format_price(self.total),
            created_at: self.created_at,
            items,
        }
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            artwork_id: ArtworkId::new(row.artwork_id),
            title: row.title,
            artist_name: row.artist_name,
            price: row.price,
        }
    }
}

const ORDER_COLUMNS: &str = "id, status, recipient_name, recipient_phone, postcode, \
     address, address_detail, memo, total, created_at";

/// Repository for customer orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from a set of artworks.
    ///
    /// Prices are snapshotted from the artwork rows at order time. The
    /// order row and its items are individual best-effort writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any artwork is missing or not
    /// approved. Returns `RepositoryError::Database` for database errors.
    pub async fn create(&self, user_id: UserId, order: &NewOrder) -> Result<Order, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Snapshot {
            id: i32,
            title: String,
            artist_name: String,
            price: Decimal,
        }

        let ids: Vec<i32> = order.artwork_ids.iter().map(|id| id.as_i32()).collect();
        let snapshots: Vec<Snapshot> = sqlx::query_as(
            "SELECT id, title, artist_name, price FROM artworks \
             WHERE id = ANY($1) AND status = 'approved'",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        if snapshots.len() != ids.len() {
            return Err(RepositoryError::NotFound);
        }

        let total: Decimal = snapshots.iter().map(|s| s.price).sum();

        let order_row: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO orders (user_id, recipient_name, recipient_phone, postcode, \
                                 address, address_detail, memo, total) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(&order.recipient_name)
        .bind(&order.recipient_phone)
        .bind(&order.postcode)
        .bind(&order.address)
        .bind(&order.address_detail)
        .bind(&order.memo)
        .bind(total)
        .fetch_one(self.pool)
        .await?;

        let mut items = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            sqlx::query(
                "INSERT INTO order_items (order_id, artwork_id, title, artist_name, price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order_row.id)
            .bind(snapshot.id)
            .bind(&snapshot.title)
            .bind(&snapshot.artist_name)
            .bind(snapshot.price)
            .execute(self.pool)
            .await?;

            items.push(OrderItem {
                artwork_id: ArtworkId::new(snapshot.id),
                title: snapshot.title,
                artist_name: snapshot.artist_name,
                price: snapshot.price,
            });
        }

        Ok(order_row.into_order(items))
    }

    /// Order history for a user, newest first, items populated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let order_rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = order_rows.iter().map(|o| o.id).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT order_id, artwork_id, title, artist_name, price \
             FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
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
