use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityName, EntityTrait,
    QueryFilter, QuerySelect, TransactionTrait,
};

use crate::{
    entity::{
        CartObjs, Likes, OrderObjs, Orders, Photos, Products, Reviews, Users, addresses,
        cart_objs, likes, order_objs, orders, photos, products, reviews, users,
    },
    error::{StoreError, StoreResult},
};

/// Rows removed by one cascading delete, per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    counts: BTreeMap<&'static str, u64>,
}

impl DeleteSummary {
    fn record(&mut self, table: &'static str, rows: u64) {
        *self.counts.entry(table).or_default() += rows;
    }

    pub fn get(&self, table: &str) -> u64 {
        self.counts.get(table).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Deleting a row of this entity also deletes the rows that depend on it.
///
/// Dependents are removed explicitly rather than left to `ON DELETE CASCADE`,
/// so the outcome is the same whether or not the store enforces foreign keys.
#[async_trait]
pub trait CascadeDelete: EntityTrait {
    /// Deletes the rows with `ids` and everything below them.
    async fn delete_in(
        txn: &DatabaseTransaction,
        ids: Vec<i32>,
        summary: &mut DeleteSummary,
    ) -> Result<(), DbErr>;

    /// Deletes one row and its dependents in a single transaction.
    async fn delete_cascade(db: &DatabaseConnection, id: i32) -> StoreResult<DeleteSummary> {
        let txn = db.begin().await?;
        let mut summary = DeleteSummary::default();
        Self::delete_in(&txn, vec![id], &mut summary).await?;

        let table = Self::default().table_name().to_owned();
        if summary.get(&table) == 0 {
            txn.rollback().await?;
            return Err(StoreError::NotFound);
        }
        txn.commit().await?;
        tracing::info!(table = %table, id, rows = summary.total(), "cascade delete");
        Ok(summary)
    }
}

async fn ids_where<E, C>(
    txn: &DatabaseTransaction,
    pk: C,
    column: C,
    ids: &[i32],
) -> Result<Vec<i32>, DbErr>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait,
{
    E::find()
        .select_only()
        .column(pk)
        .filter(column.is_in(ids.to_vec()))
        .into_tuple()
        .all(txn)
        .await
}

#[async_trait]
impl CascadeDelete for Reviews {
    async fn delete_in(
        txn: &DatabaseTransaction,
        ids: Vec<i32>,
        summary: &mut DeleteSummary,
    ) -> Result<(), DbErr> {
        let res = Likes::delete_many()
            .filter(likes::Column::ReviewId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("likes", res.rows_affected);

        let res = Reviews::delete_many()
            .filter(reviews::Column::Id.is_in(ids))
            .exec(txn)
            .await?;
        summary.record("reviews", res.rows_affected);
        Ok(())
    }
}

#[async_trait]
impl CascadeDelete for Orders {
    async fn delete_in(
        txn: &DatabaseTransaction,
        ids: Vec<i32>,
        summary: &mut DeleteSummary,
    ) -> Result<(), DbErr> {
        let res = OrderObjs::delete_many()
            .filter(order_objs::Column::OrderId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("order_objs", res.rows_affected);

        let res = Orders::delete_many()
            .filter(orders::Column::Id.is_in(ids))
            .exec(txn)
            .await?;
        summary.record("orders", res.rows_affected);
        Ok(())
    }
}

#[async_trait]
impl CascadeDelete for Products {
    async fn delete_in(
        txn: &DatabaseTransaction,
        ids: Vec<i32>,
        summary: &mut DeleteSummary,
    ) -> Result<(), DbErr> {
        let res = Photos::delete_many()
            .filter(photos::Column::ProductId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("photos", res.rows_affected);

        let res = CartObjs::delete_many()
            .filter(cart_objs::Column::ProductId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("cart_objs", res.rows_affected);

        let res = OrderObjs::delete_many()
            .filter(order_objs::Column::ProductId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("order_objs", res.rows_affected);

        let review_ids = ids_where::<Reviews, _>(
            txn,
            reviews::Column::Id,
            reviews::Column::ProductId,
            &ids,
        )
        .await?;
        Reviews::delete_in(txn, review_ids, summary).await?;

        let res = Products::delete_many()
            .filter(products::Column::Id.is_in(ids))
            .exec(txn)
            .await?;
        summary.record("products", res.rows_affected);
        Ok(())
    }
}

/// Appointments are left alone: they keep pointing at the deleted user.
#[async_trait]
impl CascadeDelete for Users {
    async fn delete_in(
        txn: &DatabaseTransaction,
        ids: Vec<i32>,
        summary: &mut DeleteSummary,
    ) -> Result<(), DbErr> {
        // Likes the users gave on other people's reviews.
        let res = Likes::delete_many()
            .filter(likes::Column::UserId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("likes", res.rows_affected);

        let review_ids =
            ids_where::<Reviews, _>(txn, reviews::Column::Id, reviews::Column::UserId, &ids)
                .await?;
        Reviews::delete_in(txn, review_ids, summary).await?;

        let order_ids =
            ids_where::<Orders, _>(txn, orders::Column::Id, orders::Column::UserId, &ids).await?;
        Orders::delete_in(txn, order_ids, summary).await?;

        let res = CartObjs::delete_many()
            .filter(cart_objs::Column::UserId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("cart_objs", res.rows_affected);

        let res = addresses::Entity::delete_many()
            .filter(addresses::Column::UserId.is_in(ids.clone()))
            .exec(txn)
            .await?;
        summary.record("addresses", res.rows_affected);

        let res = Users::delete_many()
            .filter(users::Column::Id.is_in(ids))
            .exec(txn)
            .await?;
        summary.record("users", res.rows_affected);
        Ok(())
    }
}
