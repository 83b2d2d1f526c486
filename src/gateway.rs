use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, TransactionTrait};
use tracing::{debug, warn};

use crate::{
    config::Config,
    db,
    entities::{director, film, user},
    error::AppResult,
    models::{Director, Film, User},
    query::{Mapped, Query},
};

/// A record staged for insertion by [`Gateway::add`].
#[derive(Clone, Debug)]
pub enum Pending {
    Film(film::ActiveModel),
    User(user::ActiveModel),
    Director(director::ActiveModel),
}

impl From<Film> for Pending {
    fn from(film: Film) -> Self {
        Pending::Film(film.into())
    }
}

impl From<User> for Pending {
    fn from(user: User) -> Self {
        Pending::User(user.into())
    }
}

impl From<Director> for Pending {
    fn from(director: Director) -> Self {
        Pending::Director(director.into())
    }
}

impl Pending {
    async fn insert(self, txn: &DatabaseTransaction) -> Result<(), DbErr> {
        match self {
            Pending::Film(model) => film::Entity::insert(model).exec_without_returning(txn).await?,
            Pending::User(model) => user::Entity::insert(model).exec_without_returning(txn).await?,
            Pending::Director(model) => {
                director::Entity::insert(model).exec_without_returning(txn).await?
            },
        };
        Ok(())
    }
}

/// Unit of work over the film database.
///
/// Records handed to [`add`](Self::add) stay in memory until
/// [`commit`](Self::commit) writes the whole batch in one transaction. Nothing
/// is validated before that point; the table constraints decide.
pub struct Gateway {
    db: DatabaseConnection,
    pending: Vec<Pending>,
}

impl Gateway {
    /// Connects and brings the schema up to date before handing out the gateway.
    pub async fn open(config: &Config) -> AppResult<Self> {
        let db = db::connect(config).await?;
        db::initialize(&db).await?;
        Ok(Self { db, pending: Vec::new() })
    }

    pub fn add(&mut self, record: impl Into<Pending>) {
        self.pending.push(record.into());
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn query<E: Mapped>(&self) -> Query<'_, E> {
        Query::new(&self.db)
    }

    pub fn films(&self) -> Query<'_, film::Entity> {
        self.query()
    }

    pub fn users(&self) -> Query<'_, user::Entity> {
        self.query()
    }

    pub fn directors(&self) -> Query<'_, director::Entity> {
        self.query()
    }

    /// Writes every staged record, or none of them. The batch is consumed
    /// either way.
    pub async fn commit(&mut self) -> AppResult<usize> {
        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(0);
        }

        let rows = batch.len();
        let txn = self.db.begin().await?;
        for change in batch {
            if let Err(err) = change.insert(&txn).await {
                txn.rollback().await?;
                warn!(rows, error = %err, "commit rejected");
                return Err(err.into());
            }
        }
        txn.commit().await?;

        debug!(rows, "commit applied");
        Ok(rows)
    }

    pub async fn close(self) -> AppResult<()> {
        if !self.pending.is_empty() {
            warn!(discarded = self.pending.len(), "closing with uncommitted changes");
        }
        self.db.close().await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use migration::catalog::{EntityKind, SEED_CREATED_AT, SEED_FILMS};
    use sea_orm::{ColumnTrait, ConnectionTrait};

    use super::*;

    async fn open() -> Gateway {
        Gateway::open(&Config::in_memory()).await.expect("open in-memory gateway")
    }

    #[tokio::test]
    async fn seeds_twenty_films() {
        let gw = open().await;

        assert_eq!(gw.films().count().await.unwrap(), 20);

        let inception = gw.films().filter(film::Column::Id.eq(SEED_FILMS[7].id)).first().await;
        let inception = inception.unwrap().expect("seeded film");
        assert_eq!(inception.title, "Inception");
        assert_eq!(inception.created_at.map(|t| t.as_second()), Some(SEED_CREATED_AT));
    }

    #[tokio::test]
    async fn initialization_is_idempotent() {
        let gw = open().await;

        db::initialize(gw.connection()).await.unwrap();

        // Replaying the seed insert itself must not add rows either.
        let seed = EntityKind::Film.config().unwrap().seed.expect("film seed");
        let conn = gw.connection();
        conn.execute(conn.get_database_backend().build(&seed)).await.unwrap();

        assert_eq!(gw.films().count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn films_by_year_descending() {
        let gw = open().await;

        let films = gw.films().order_by_desc(film::Column::ReleasedYear).all().await.unwrap();

        assert_eq!(films.len(), 20);
        assert_eq!(films.first().map(|f| f.title.as_str()), Some("Oppenheimer"));
        assert_eq!(films.first().map(|f| f.released_year), Some(2023));
        assert_eq!(films.last().map(|f| f.title.as_str()), Some("The Godfather"));
        assert_eq!(films.last().map(|f| f.released_year), Some(1972));
    }

    #[tokio::test]
    async fn find_by_exact_title() {
        let gw = open().await;

        let found = gw.films().filter(film::Column::Title.eq("Inception")).all().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].released_year, 2010);

        let missing =
            gw.films().filter(film::Column::Title.eq("Citizen Kane")).first().await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn add_is_not_visible_until_commit() {
        let mut gw = open().await;

        gw.add(Film::new("Dune", 2021));
        assert_eq!(gw.pending(), 1);
        assert_eq!(gw.films().count().await.unwrap(), 20);

        assert_eq!(gw.commit().await.unwrap(), 1);
        assert_eq!(gw.pending(), 0);
        assert_eq!(gw.films().count().await.unwrap(), 21);
    }

    #[tokio::test]
    async fn created_at_defaults_to_insert_time() {
        let mut gw = open().await;
        let before = jiff::Timestamp::now().as_second();

        gw.add(Film::new("Dune", 2021));
        gw.commit().await.unwrap();

        let dune = gw.films().filter(film::Column::Title.eq("Dune")).first().await.unwrap();
        let created = dune.and_then(|f| f.created_at).expect("default created_at");
        assert!(created.as_second() >= before - 1);
    }

    #[tokio::test]
    async fn year_before_1500_rejects_whole_batch() {
        let mut gw = open().await;

        gw.add(Film::new("Dune", 2021));
        gw.add(Film::new("Too Early", 1499));
        let err = gw.commit().await.unwrap_err();

        assert!(err.is_constraint(), "unexpected error: {err}");
        assert_eq!(gw.pending(), 0);
        assert_eq!(gw.films().count().await.unwrap(), 20);
        let dune = gw.films().filter(film::Column::Title.eq("Dune")).first().await.unwrap();
        assert!(dune.is_none());
    }

    #[tokio::test]
    async fn year_1500_is_accepted() {
        let mut gw = open().await;

        gw.add(Film::new("Earliest", 1500));
        gw.commit().await.unwrap();

        assert_eq!(gw.films().count().await.unwrap(), 21);
    }

    #[tokio::test]
    async fn oversized_title_is_rejected() {
        let mut gw = open().await;

        gw.add(Film::new("x".repeat(101), 2000));
        assert!(gw.commit().await.unwrap_err().is_constraint());

        gw.add(Film::new("x".repeat(100), 2000));
        gw.commit().await.unwrap();
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let mut gw = open().await;

        gw.add(User::new("not-an-email"));
        let err = gw.commit().await.unwrap_err();

        assert!(err.is_constraint(), "unexpected error: {err}");
        assert_eq!(gw.users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn user_names_are_optional() {
        let mut gw = open().await;

        gw.add(User::new("ada@example.org"));
        gw.add(
            User::new("grace@example.org")
                .with_names(Some("Grace".to_string()), Some("Hopper".to_string())),
        );
        assert_eq!(gw.commit().await.unwrap(), 2);

        let users = gw.users().order_by_asc(user::Column::Email).all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "ada@example.org");
        assert_eq!(users[0].lastname, None);
        assert_eq!(users[1].lastname.as_deref(), Some("Hopper"));
    }

    #[tokio::test]
    async fn oversized_user_name_is_rejected() {
        let mut gw = open().await;

        gw.add(User::new("ada@example.org").with_names(Some("a".repeat(51)), None));

        assert!(gw.commit().await.unwrap_err().is_constraint());
    }

    #[tokio::test]
    async fn directors_round_trip() {
        let mut gw = open().await;

        let nolan = Director::new("Christopher", "Nolan");
        gw.add(nolan.clone());
        gw.add(Director::new("Greta", "Gerwig"));
        gw.commit().await.unwrap();

        let directors = gw.directors().order_by_asc(director::Column::Lastname).all().await;
        let directors = directors.unwrap();
        assert_eq!(directors.len(), 2);
        assert_eq!(directors[1], nolan);
    }

    #[tokio::test]
    async fn oversized_director_name_is_rejected() {
        let mut gw = open().await;

        gw.add(Director::new("Christopher", "n".repeat(51)));

        assert!(gw.commit().await.unwrap_err().is_constraint());
        assert_eq!(gw.directors().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn query_is_restartable() {
        let mut gw = open().await;

        let recent_count = {
            let recent = gw.films().filter(film::Column::ReleasedYear.gte(2010));
            let first = recent.all().await.unwrap();
            let second = recent.all().await.unwrap();
            assert_eq!(first, second);
            first.len()
        };
        assert_eq!(recent_count, 5);

        gw.add(Film::new("Dune", 2021));
        gw.commit().await.unwrap();

        let recent = gw.films().filter(film::Column::ReleasedYear.gte(2010));
        assert_eq!(recent.count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn empty_commit_is_a_no_op() {
        let mut gw = open().await;

        assert_eq!(gw.commit().await.unwrap(), 0);
        gw.close().await.unwrap();
    }
}
