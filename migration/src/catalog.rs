//! Per-entity schema configuration.
//!
//! Each [`EntityKind`] maps to an [`EntityConfig`]: the table it lives in, its
//! columns with their defaults, the check constraints SQLite enforces on every
//! insert, and the rows seeded when the schema is first created. Migrations
//! consume these records instead of spelling tables out inline.

use sea_orm_migration::{prelude::*, schema::*};
use uuid::Uuid;

pub const TITLE_MAX_LEN: u32 = 100;
pub const MIN_RELEASED_YEAR: i32 = 1500;
pub const EMAIL_MAX_LEN: u32 = 250;
pub const NAME_MAX_LEN: u32 = 50;

/// `LIKE` pattern for `local@domain.tld`.
pub const EMAIL_PATTERN: &str = "_%@_%._%";

/// 2024-01-01T00:00:00Z
pub const SEED_CREATED_AT: i64 = 1_704_067_200;

pub struct SeedFilm {
    pub id: Uuid,
    pub title: &'static str,
    pub released_year: i32,
}

const fn seed(id: u128, title: &'static str, released_year: i32) -> SeedFilm {
    SeedFilm { id: Uuid::from_u128(id), title, released_year }
}

pub const SEED_FILMS: [SeedFilm; 20] = [
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000001, "The Shawshank Redemption", 1994),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000002, "The Godfather", 1972),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000003, "The Dark Knight", 2008),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000004, "Pulp Fiction", 1994),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000005, "Schindler's List", 1993),
    seed(
        0xa1b2c3d4_e5f6_7890_abcd_000000000006,
        "The Lord of the Rings: The Return of the King",
        2003,
    ),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000007, "Forrest Gump", 1994),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000008, "Inception", 2010),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000009, "Fight Club", 1999),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000010, "Goodfellas", 1990),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000011, "The Matrix", 1999),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000012, "Interstellar", 2014),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000013, "Se7en", 1995),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000014, "The Silence of the Lambs", 1991),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000015, "Saving Private Ryan", 1998),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000016, "Gladiator", 2000),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000017, "The Prestige", 2006),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000018, "Whiplash", 2014),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000019, "Parasite", 2019),
    seed(0xa1b2c3d4_e5f6_7890_abcd_000000000020, "Oppenheimer", 2023),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    Film,
    User,
    Director,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Film, EntityKind::User, EntityKind::Director];

    pub fn config(self) -> Result<EntityConfig, DbErr> {
        match self {
            EntityKind::Film => film_config(),
            EntityKind::User => Ok(user_config()),
            EntityKind::Director => Ok(director_config()),
        }
    }
}

pub struct EntityConfig {
    pub kind: EntityKind,
    pub table: TableCreateStatement,
    pub drop: TableDropStatement,
    pub seed: Option<InsertStatement>,
}

fn film_config() -> Result<EntityConfig, DbErr> {
    let table = Table::create()
        .table(Films::Table)
        .if_not_exists()
        .col(uuid(Films::Id).primary_key())
        .col(string_len(Films::Title, TITLE_MAX_LEN))
        .col(integer(Films::ReleasedYear))
        .col(
            big_integer_null(Films::CreatedAt)
                .default(Expr::cust("(CAST(strftime('%s', 'now') AS INTEGER))")),
        )
        .check(max_len(Films::Title, TITLE_MAX_LEN))
        .check(Expr::col(Films::ReleasedYear).gte(MIN_RELEASED_YEAR))
        .to_owned();

    let mut insert = Query::insert();
    insert.into_table(Films::Table).columns([
        Films::Id,
        Films::Title,
        Films::ReleasedYear,
        Films::CreatedAt,
    ]);
    for film in &SEED_FILMS {
        insert
            .values([
                film.id.into(),
                film.title.into(),
                film.released_year.into(),
                SEED_CREATED_AT.into(),
            ])
            .map_err(|e| DbErr::Custom(format!("seed row {}: {e}", film.id)))?;
    }
    insert.on_conflict(OnConflict::column(Films::Id).do_nothing().to_owned());

    Ok(EntityConfig {
        kind: EntityKind::Film,
        table,
        drop: Table::drop().table(Films::Table).if_exists().to_owned(),
        seed: Some(insert),
    })
}

fn user_config() -> EntityConfig {
    let table = Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(uuid(Users::Id).primary_key())
        .col(string_len(Users::Email, EMAIL_MAX_LEN))
        .col(string_len_null(Users::Lastname, NAME_MAX_LEN))
        .col(string_len_null(Users::Firstname, NAME_MAX_LEN))
        .check(max_len(Users::Email, EMAIL_MAX_LEN))
        .check(Expr::col(Users::Email).like(EMAIL_PATTERN))
        .check(max_len(Users::Lastname, NAME_MAX_LEN))
        .check(max_len(Users::Firstname, NAME_MAX_LEN))
        .to_owned();

    EntityConfig {
        kind: EntityKind::User,
        table,
        drop: Table::drop().table(Users::Table).if_exists().to_owned(),
        seed: None,
    }
}

fn director_config() -> EntityConfig {
    let table = Table::create()
        .table(Directors::Table)
        .if_not_exists()
        .col(uuid(Directors::Id).primary_key())
        .col(string_len(Directors::Lastname, NAME_MAX_LEN))
        .col(string_len(Directors::Firstname, NAME_MAX_LEN))
        .check(max_len(Directors::Lastname, NAME_MAX_LEN))
        .check(max_len(Directors::Firstname, NAME_MAX_LEN))
        .to_owned();

    EntityConfig {
        kind: EntityKind::Director,
        table,
        drop: Table::drop().table(Directors::Table).if_exists().to_owned(),
        seed: None,
    }
}

/// SQLite ignores declared `VARCHAR` widths, so lengths are checked explicitly.
/// A NULL column passes.
fn max_len<C: IntoIden + 'static>(col: C, len: u32) -> SimpleExpr {
    Expr::expr(Func::cust(Alias::new("length")).arg(Expr::col(col))).lte(len)
}

#[derive(DeriveIden)]
pub enum Films {
    #[sea_orm(iden = "Films")]
    Table,
    Id,
    Title,
    ReleasedYear,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Users {
    #[sea_orm(iden = "Users")]
    Table,
    Id,
    Email,
    Lastname,
    Firstname,
}

#[derive(DeriveIden)]
pub enum Directors {
    #[sea_orm(iden = "Directors")]
    Table,
    Id,
    Lastname,
    Firstname,
}
