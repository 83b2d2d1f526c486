use jiff::Timestamp;
use sea_orm::{ActiveValue::NotSet, Set};
use uuid::Uuid;

use crate::entities::{director, film, user};

#[derive(Clone, Debug, PartialEq)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub released_year: i32,
    pub created_at: Option<Timestamp>,
}

impl Film {
    pub fn new(title: impl Into<String>, released_year: i32) -> Self {
        Self { id: Uuid::new_v4(), title: title.into(), released_year, created_at: None }
    }
}

impl From<film::Model> for Film {
    fn from(model: film::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            released_year: model.released_year,
            created_at: model.created_at.and_then(|s| Timestamp::from_second(s).ok()),
        }
    }
}

impl From<Film> for film::ActiveModel {
    fn from(film: Film) -> Self {
        Self {
            id: Set(film.id),
            title: Set(film.title),
            released_year: Set(film.released_year),
            // Left unset so the column default applies.
            created_at: match film.created_at {
                Some(ts) => Set(Some(ts.as_second())),
                None => NotSet,
            },
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub lastname: Option<String>,
    pub firstname: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), email: email.into(), lastname: None, firstname: None }
    }

    pub fn with_names(mut self, firstname: Option<String>, lastname: Option<String>) -> Self {
        self.firstname = firstname;
        self.lastname = lastname;
        self
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            lastname: model.lastname,
            firstname: model.firstname,
        }
    }
}

impl From<User> for user::ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            email: Set(user.email),
            lastname: Set(user.lastname),
            firstname: Set(user.firstname),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Director {
    pub id: Uuid,
    pub lastname: String,
    pub firstname: String,
}

impl Director {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), lastname: lastname.into(), firstname: firstname.into() }
    }
}

impl From<director::Model> for Director {
    fn from(model: director::Model) -> Self {
        Self { id: model.id, lastname: model.lastname, firstname: model.firstname }
    }
}

impl From<Director> for director::ActiveModel {
    fn from(director: Director) -> Self {
        Self {
            id: Set(director.id),
            lastname: Set(director.lastname),
            firstname: Set(director.firstname),
        }
    }
}
