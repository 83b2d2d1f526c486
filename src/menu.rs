use sea_orm::ColumnTrait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::warn;

use crate::{
    entities::{director, film, user},
    error::{AppError, AppResult},
    gateway::Gateway,
    models::{Director, Film, User},
};

/// Console front end over a [`Gateway`]. End of input is treated as quitting.
pub struct Menu<'a, R, W> {
    gateway: &'a mut Gateway,
    input: Lines<R>,
    out: W,
}

impl<'a, R, W> Menu<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(gateway: &'a mut Gateway, input: R, out: W) -> Self {
        Self { gateway, input: input.lines(), out }
    }

    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            self.write("\n1. CRUD demonstrations\n0. Quit\n\n").await?;
            let Some(choice) = self.prompt("Enter your choice: ").await? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.crud().await?,
                "0" => return Ok(()),
                _ => self.write("Invalid choice.\n").await?,
            }
        }
    }

    async fn crud(&mut self) -> AppResult<()> {
        loop {
            self.write(
                "\n1. Create - add a record\n\
                 2. Read - fetch one or more records\n\
                 3. Update - change a record\n\
                 4. Delete - remove a record\n\
                 0. Back to main menu\n\n",
            )
            .await?;
            let Some(choice) = self.prompt("Enter your choice: ").await? else {
                return Ok(());
            };
            let result = match choice.as_str() {
                "1" => self.create().await,
                "2" => self.read().await,
                "3" => self.update().await,
                "4" => self.delete().await,
                "0" => return Ok(()),
                _ => {
                    self.write("Invalid choice.\n").await?;
                    continue;
                },
            };
            self.report(result).await?;
        }
    }

    /// Storage and not-implemented failures end the operation, not the menu.
    async fn report(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(AppError::Io(err)) => Err(AppError::Io(err)),
            Err(err @ AppError::NotImplemented(_)) => self.write(&format!("{err}.\n")).await,
            Err(err) if err.is_constraint() => {
                self.write(&format!("Could not save: {err}\n")).await
            },
            Err(err) => {
                warn!(error = %err, "operation failed");
                self.write(&format!("Operation failed: {err}\n")).await
            },
        }
    }

    async fn create(&mut self) -> AppResult<()> {
        self.write("\nCreate:\n1. Film\n2. User\n3. Director\n0. Back\n\n").await?;
        let Some(choice) = self.prompt("Enter your choice: ").await? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => self.create_film().await,
            "2" => self.create_user().await,
            "3" => self.create_director().await,
            "0" => Ok(()),
            _ => self.write("Invalid choice.\n").await,
        }
    }

    async fn create_film(&mut self) -> AppResult<()> {
        let Some(title) = self.prompt("Title: ").await? else {
            return Ok(());
        };
        let released_year = loop {
            let Some(year) = self.prompt("Released year: ").await? else {
                return Ok(());
            };
            match year.parse::<i32>() {
                Ok(year) => break year,
                Err(_) => self.write("Please enter a number.\n").await?,
            }
        };

        self.gateway.add(Film::new(title, released_year));
        self.gateway.commit().await?;
        self.write("Film saved.\n").await
    }

    async fn create_user(&mut self) -> AppResult<()> {
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(());
        };
        let Some(firstname) = self.prompt("First name (optional): ").await? else {
            return Ok(());
        };
        let Some(lastname) = self.prompt("Last name (optional): ").await? else {
            return Ok(());
        };

        self.gateway.add(User::new(email).with_names(non_empty(firstname), non_empty(lastname)));
        self.gateway.commit().await?;
        self.write("User saved.\n").await
    }

    async fn create_director(&mut self) -> AppResult<()> {
        let Some(firstname) = self.prompt("First name: ").await? else {
            return Ok(());
        };
        let Some(lastname) = self.prompt("Last name: ").await? else {
            return Ok(());
        };

        self.gateway.add(Director::new(firstname, lastname));
        self.gateway.commit().await?;
        self.write("Director saved.\n").await
    }

    async fn read(&mut self) -> AppResult<()> {
        self.write(
            "\nRead:\n\
             1. All films, newest first\n\
             2. Find a film by title\n\
             3. All users\n\
             4. All directors\n\
             0. Back\n\n",
        )
        .await?;
        let Some(choice) = self.prompt("Enter your choice: ").await? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => self.list_films().await,
            "2" => self.find_film().await,
            "3" => self.list_users().await,
            "4" => self.list_directors().await,
            "0" => Ok(()),
            _ => self.write("Invalid choice.\n").await,
        }
    }

    async fn list_films(&mut self) -> AppResult<()> {
        let query = self.gateway.films().order_by_desc(film::Column::ReleasedYear);
        let total = query.count().await?;
        let films = query.all().await?;

        let mut text = format!("{total} films:\n");
        for film in films {
            text.push_str(&format!("  {} - {}\n", film.released_year, film.title));
        }
        self.write(&text).await
    }

    async fn find_film(&mut self) -> AppResult<()> {
        let Some(title) = self.prompt("Title: ").await? else {
            return Ok(());
        };
        let query = self.gateway.films().filter(film::Column::Title.eq(title.as_str()));
        let found = query.first().await?;
        match found {
            Some(film) => self.write(&format!("{} ({})\n", film.title, film.released_year)).await,
            None => self.write(&format!("No film titled \"{title}\".\n")).await,
        }
    }

    async fn list_users(&mut self) -> AppResult<()> {
        let users = self.gateway.users().order_by_asc(user::Column::Email).all().await?;

        let mut text = format!("{} users:\n", users.len());
        for user in users {
            let name = [user.firstname, user.lastname].into_iter().flatten().collect::<Vec<_>>();
            if name.is_empty() {
                text.push_str(&format!("  {}\n", user.email));
            } else {
                text.push_str(&format!("  {} ({})\n", user.email, name.join(" ")));
            }
        }
        self.write(&text).await
    }

    async fn list_directors(&mut self) -> AppResult<()> {
        let directors =
            self.gateway.directors().order_by_asc(director::Column::Lastname).all().await?;

        let mut text = format!("{} directors:\n", directors.len());
        for director in directors {
            text.push_str(&format!("  {} {}\n", director.firstname, director.lastname));
        }
        self.write(&text).await
    }

    async fn update(&mut self) -> AppResult<()> {
        Err(AppError::NotImplemented("update"))
    }

    async fn delete(&mut self) -> AppResult<()> {
        Err(AppError::NotImplemented("delete"))
    }

    async fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        self.write(label).await?;
        let line = self.input.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
