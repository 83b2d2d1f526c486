use sea_orm::{
    DatabaseConnection, EntityTrait, IntoSimpleExpr, PaginatorTrait, QueryFilter, QueryOrder,
    Select, sea_query::IntoCondition,
};

use crate::{
    entities::{director, film, user},
    error::AppResult,
    models::{Director, Film, User},
};

/// An entity whose rows surface as a domain record.
pub trait Mapped: EntityTrait {
    type Record: From<Self::Model>;
}

impl Mapped for film::Entity {
    type Record = Film;
}

impl Mapped for user::Entity {
    type Record = User;
}

impl Mapped for director::Entity {
    type Record = Director;
}

/// Filters and ordering accumulate without touching storage. Each of `all`,
/// `first` and `count` runs the query again from scratch.
pub struct Query<'a, E: Mapped> {
    db: &'a DatabaseConnection,
    select: Select<E>,
}

impl<'a, E: Mapped> Query<'a, E> {
    pub(crate) fn new(db: &'a DatabaseConnection) -> Self {
        Self { db, select: E::find() }
    }

    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.select = self.select.filter(filter);
        self
    }

    pub fn order_by_asc<C: IntoSimpleExpr>(mut self, col: C) -> Self {
        self.select = self.select.order_by_asc(col);
        self
    }

    pub fn order_by_desc<C: IntoSimpleExpr>(mut self, col: C) -> Self {
        self.select = self.select.order_by_desc(col);
        self
    }

    pub async fn all(&self) -> AppResult<Vec<E::Record>> {
        let rows = self.select.clone().all(self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn first(&self) -> AppResult<Option<E::Record>> {
        let row = self.select.clone().one(self.db).await?;
        Ok(row.map(Into::into))
    }

    pub async fn count(&self) -> AppResult<u64>
    where
        E::Model: Sync,
    {
        Ok(self.select.clone().count(self.db).await?)
    }
}
