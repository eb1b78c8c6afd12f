#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::AppError;
    use crate::models::college::{College, Course, FavoriteCollege, Location};
    use crate::models::review::{NewReview, Review};
    use crate::models::user::{Session, User};
    use crate::store::{CollegeStore, SessionStore};
    use crate::validation::validate_new_review;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::types::Type;
    use rusqlite::{Connection, Error, OptionalExtension, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[cfg(test)]
    mod tests {
        use super::*;

        // Helper function to create test database
        async fn create_test_db() -> Database {
            log!("[TEST] Creating in-memory test database");
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            log!("[TEST] Database schema created");
            db
        }

        fn college(name: &str, location: Location, course: Course, fee: u32) -> College {
            College {
                id: Uuid::new_v4().to_string(),
                name: name.into(),
                location,
                course,
                fee,
                is_favorite: false,
            }
        }

        fn review(name: &str, rating: u8, user_id: &str) -> NewReview {
            NewReview {
                college_name: name.into(),
                rating,
                comment: "Labs are well equipped and staff helpful.".into(),
                user_id: user_id.into(),
            }
        }

        #[tokio::test]
        async fn test_schema_creation() {
            let db = create_test_db().await;

            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            for table in ["users", "sessions", "colleges", "favorites", "reviews"] {
                assert!(tables.contains(&table.to_string()), "missing table {table}");
            }
        }

        #[tokio::test]
        async fn test_colleges_keep_insertion_order() {
            let db = create_test_db().await;
            let first = college("Osmania University", Location::Hyderabad, Course::Mba, 90_000);
            let second = college("IIT Madras", Location::Chennai, Course::Electronics, 210_000);
            db.insert_college(&first).await.unwrap();
            db.insert_college(&second).await.unwrap();

            let colleges = db.list_colleges().await.unwrap();
            assert_eq!(colleges, vec![first, second]);
        }

        #[tokio::test]
        async fn test_seed_catalog_runs_once() {
            let db = create_test_db().await;
            let seeded = db.seed_catalog().await.unwrap();
            assert!(seeded > 0);
            assert_eq!(db.seed_catalog().await.unwrap(), 0);
            assert_eq!(db.list_colleges().await.unwrap().len(), seeded);
        }

        #[tokio::test]
        async fn test_favorite_lifecycle() {
            let db = create_test_db().await;
            let user = db.sign_in("asha@example.com").await.unwrap().user;
            let iith = college("IIT Hyderabad", Location::Hyderabad, Course::ComputerScience, 220_000);
            let christ = college("Christ University", Location::Bangalore, Course::Mba, 150_000);
            db.insert_college(&iith).await.unwrap();
            db.insert_college(&christ).await.unwrap();

            db.add_favorite(&iith.id, &user.id).await.unwrap();
            db.add_favorite(&christ.id, &user.id).await.unwrap();
            let ids = db.favorite_college_ids(&user.id).await.unwrap();
            assert_eq!(ids.len(), 2);
            assert!(ids.contains(&iith.id));

            // one row per (user, college)
            assert!(matches!(
                db.add_favorite(&iith.id, &user.id).await,
                Err(AppError::Remote(_))
            ));

            let joined = db.list_favorites(&user.id).await.unwrap();
            assert_eq!(joined.len(), 2);
            assert_eq!(joined[0].college, iith);

            db.remove_favorite(&iith.id, &user.id).await.unwrap();
            assert_eq!(db.favorite_college_ids(&user.id).await.unwrap(), vec![christ.id.clone()]);

            let favorite_id = db.list_favorites(&user.id).await.unwrap()[0].favorite_id.clone();
            db.remove_favorite_by_id(&favorite_id).await.unwrap();
            assert!(db.list_favorites(&user.id).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_favorites_are_per_user() {
            let db = create_test_db().await;
            let asha = db.sign_in("asha@example.com").await.unwrap().user;
            let ravi = db.sign_in("ravi@example.com").await.unwrap().user;
            let iisc = college("IISc Bangalore", Location::Bangalore, Course::Electronics, 120_000);
            db.insert_college(&iisc).await.unwrap();

            db.add_favorite(&iisc.id, &asha.id).await.unwrap();
            assert_eq!(db.favorite_college_ids(&asha.id).await.unwrap(), vec![iisc.id.clone()]);
            assert!(db.favorite_college_ids(&ravi.id).await.unwrap().is_empty());

            // removing by pair only touches the matching user's row
            db.remove_favorite(&iisc.id, &ravi.id).await.unwrap();
            assert_eq!(db.favorite_college_ids(&asha.id).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_reviews_newest_first() {
            let db = create_test_db().await;
            let user = db.sign_in("asha@example.com").await.unwrap().user;

            let older = db.insert_review(&review("Anna University", 3, &user.id)).await.unwrap();
            let newer = db.insert_review(&review("IIT Madras", 5, &user.id)).await.unwrap();
            assert!(newer.created_at >= older.created_at);

            let reviews = db.list_reviews().await.unwrap();
            assert_eq!(reviews.len(), 2);
            assert_eq!(reviews[0].id, newer.id);
            assert_eq!(reviews[1].id, older.id);
        }

        #[tokio::test]
        async fn test_insert_review_is_validated_and_trimmed() {
            let db = create_test_db().await;
            let user = db.sign_in("asha@example.com").await.unwrap().user;

            let mut bad = review("IIT Madras", 6, &user.id);
            assert!(matches!(
                db.insert_review(&bad).await,
                Err(AppError::Validation(_))
            ));
            bad.rating = 4;
            bad.college_name = "  IIT Madras  ".into();
            let stored = db.insert_review(&bad).await.unwrap();
            assert_eq!(stored.college_name, "IIT Madras");
            assert_eq!(stored.rating, 4);
        }

        #[tokio::test]
        async fn test_sessions() {
            let db = create_test_db().await;
            let first = db.sign_in("asha@example.com").await.unwrap();
            let second = db.sign_in("asha@example.com").await.unwrap();
            // same identity, fresh session
            assert_eq!(first.user, second.user);
            assert_ne!(first.token, second.token);

            db.sign_out(&first.token).await.unwrap();
            let conn = db.conn.lock().await;
            let remaining: i64 = conn
                .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
                .unwrap();
            assert_eq!(remaining, 1);
        }

        #[tokio::test]
        async fn test_token_resolves_until_sign_out() {
            let db = create_test_db().await;
            let session = db.sign_in("asha@example.com").await.unwrap();
            assert_eq!(
                db.user_for_token(&session.token).await.unwrap(),
                Some(session.user.clone())
            );
            assert_eq!(db.user_for_token("not-a-token").await.unwrap(), None);

            db.sign_out(&session.token).await.unwrap();
            assert_eq!(db.user_for_token(&session.token).await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_favorite_owner() {
            let db = create_test_db().await;
            let user = db.sign_in("asha@example.com").await.unwrap().user;
            let iisc = college("IISc Bangalore", Location::Bangalore, Course::Electronics, 120_000);
            db.insert_college(&iisc).await.unwrap();
            db.add_favorite(&iisc.id, &user.id).await.unwrap();

            let favorite_id = db.list_favorites(&user.id).await.unwrap()[0].favorite_id.clone();
            assert_eq!(db.favorite_owner(&favorite_id).await.unwrap(), Some(user.id.clone()));
            db.remove_favorite_by_id(&favorite_id).await.unwrap();
            assert_eq!(db.favorite_owner(&favorite_id).await.unwrap(), None);
        }
    }

    const REVIEW_TIMESTAMP_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

    // Catalog written on first start when the colleges table is empty
    const DEMO_CATALOG: &[(&str, Location, Course, u32)] = &[
        ("IIT Hyderabad", Location::Hyderabad, Course::ComputerScience, 220_000),
        ("IIIT Hyderabad", Location::Hyderabad, Course::Electronics, 180_000),
        ("Osmania University", Location::Hyderabad, Course::Mba, 75_000),
        ("IISc Bangalore", Location::Bangalore, Course::Electronics, 120_000),
        ("Christ University", Location::Bangalore, Course::Mba, 150_000),
        ("St. John's Medical College", Location::Bangalore, Course::Mbbs, 280_000),
        ("IIT Madras", Location::Chennai, Course::ComputerScience, 210_000),
        ("Anna University", Location::Chennai, Course::Electronics, 60_000),
        ("Madras Medical College", Location::Chennai, Course::Mbbs, 40_000),
    ];

    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // 1. Users and their sessions
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                );
                CREATE TABLE IF NOT EXISTS sessions (
                    token TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating users/sessions tables: {}", e);
                e
            })?;

            // 2. Colleges table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS colleges (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    location TEXT NOT NULL,
                    course TEXT NOT NULL,
                    fee INTEGER NOT NULL CHECK (fee >= 0)
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating colleges table: {}", e);
                e
            })?;

            // 3. Favorites, one row per (user, college)
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS favorites (
                    id TEXT PRIMARY KEY,
                    college_id TEXT NOT NULL,
                    user_id TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (user_id, college_id),
                    FOREIGN KEY (college_id) REFERENCES colleges(id) ON DELETE CASCADE,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating favorites table: {}", e);
                e
            })?;

            // 4. Reviews name colleges by free text
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    college_name TEXT NOT NULL,
                    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                    comment TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT ({REVIEW_TIMESTAMP_SQL}),
                    user_id TEXT NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS reviews_created_at ON reviews (created_at);"
            ))
            .map_err(|e| {
                logging::error!("Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        pub async fn insert_college(&self, college: &College) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO colleges (id, name, location, course, fee) VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    &college.id,
                    &college.name,
                    college.location.as_str(),
                    college.course.as_str(),
                    college.fee
                ],
            )?;
            log!("[DB] College inserted: {}", college.name);
            Ok(())
        }

        /// Writes the demo catalog if no college exists yet. Returns how many rows were added.
        pub async fn seed_catalog(&self) -> Result<usize, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM colleges", [], |row| row.get(0))?;
            if existing > 0 {
                log!("[DB] Catalog already has {} colleges, skipping seed", existing);
                return Ok(0);
            }

            for (name, location, course, fee) in DEMO_CATALOG {
                tx.execute(
                    "INSERT INTO colleges (id, name, location, course, fee) VALUES (?, ?, ?, ?, ?)",
                    rusqlite::params![
                        Uuid::new_v4().to_string(),
                        name,
                        location.as_str(),
                        course.as_str(),
                        fee
                    ],
                )?;
            }
            tx.commit()?;
            log!("[DB] Seeded {} colleges", DEMO_CATALOG.len());
            Ok(DEMO_CATALOG.len())
        }

        /// The user an open session token belongs to, if any.
        pub async fn user_for_token(&self, token: &str) -> Result<Option<User>, AppError> {
            let conn = self.conn.lock().await;
            let user = conn
                .query_row(
                    "SELECT users.id, users.email
                     FROM sessions JOIN users ON users.id = sessions.user_id
                     WHERE sessions.token = ?",
                    [token],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        }

        /// Who owns the favorite row `favorite_id`; `None` once it is gone.
        pub async fn favorite_owner(&self, favorite_id: &str) -> Result<Option<String>, AppError> {
            let conn = self.conn.lock().await;
            let owner = conn
                .query_row(
                    "SELECT user_id FROM favorites WHERE id = ?",
                    [favorite_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(owner)
        }
    }

    fn text_column<T, E>(row: &Row<'_>, idx: usize, parse: impl FnOnce(&str) -> Result<T, E>) -> Result<T, Error>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let raw: String = row.get(idx)?;
        parse(&raw).map_err(|e| Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    // Expects id, name, location, course, fee starting at `offset`
    fn college_from_row(row: &Row<'_>, offset: usize) -> Result<College, Error> {
        Ok(College {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            location: text_column(row, offset + 2, str::parse::<Location>)?,
            course: text_column(row, offset + 3, str::parse::<Course>)?,
            fee: row.get(offset + 4)?,
            is_favorite: false,
        })
    }

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        Ok(Review {
            id: row.get(0)?,
            college_name: row.get(1)?,
            rating: row.get(2)?,
            comment: row.get(3)?,
            created_at: text_column(row, 4, |raw| {
                DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
            })?,
            user_id: row.get(5)?,
        })
    }

    #[async_trait(?Send)]
    impl CollegeStore for Database {
        async fn list_colleges(&self) -> Result<Vec<College>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, location, course, fee FROM colleges ORDER BY rowid ASC",
            )?;
            let colleges = stmt
                .query_map([], |row| college_from_row(row, 0))?
                .collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} colleges", colleges.len());
            Ok(colleges)
        }

        async fn favorite_college_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare("SELECT college_id FROM favorites WHERE user_id = ?")?;
            let ids = stmt
                .query_map([user_id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(ids)
        }

        async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteCollege>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT f.id, c.id, c.name, c.location, c.course, c.fee
                 FROM favorites f
                 JOIN colleges c ON f.college_id = c.id
                 WHERE f.user_id = ?
                 ORDER BY f.rowid ASC",
            )?;
            let favorites = stmt
                .query_map([user_id], |row| {
                    Ok(FavoriteCollege {
                        favorite_id: row.get(0)?,
                        college: college_from_row(row, 1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} favorites for user {}", favorites.len(), user_id);
            Ok(favorites)
        }

        async fn add_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO favorites (id, college_id, user_id) VALUES (?, ?, ?)",
                rusqlite::params![Uuid::new_v4().to_string(), college_id, user_id],
            )?;
            log!("[DB] Favorite added: user {} college {}", user_id, college_id);
            Ok(())
        }

        async fn remove_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            let removed = conn.execute(
                "DELETE FROM favorites WHERE college_id = ? AND user_id = ?",
                [college_id, user_id],
            )?;
            log!("[DB] Removed {} favorite(s): user {} college {}", removed, user_id, college_id);
            Ok(())
        }

        async fn remove_favorite_by_id(&self, favorite_id: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            conn.execute("DELETE FROM favorites WHERE id = ?", [favorite_id])?;
            log!("[DB] Favorite deleted: {}", favorite_id);
            Ok(())
        }

        async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, college_name, rating, comment, created_at, user_id
                 FROM reviews
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let reviews = stmt
                .query_map([], review_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }

        async fn insert_review(&self, review: &NewReview) -> Result<Review, AppError> {
            let valid = validate_new_review(review)?;
            let id = Uuid::new_v4().to_string();

            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (id, college_name, rating, comment, user_id) VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![&id, &valid.college_name, valid.rating, &valid.comment, &review.user_id],
            )?;
            let stored = conn.query_row(
                "SELECT id, college_name, rating, comment, created_at, user_id FROM reviews WHERE id = ?",
                [&id],
                review_from_row,
            )?;
            log!("[DB] Review {} stored for '{}'", stored.id, stored.college_name);
            Ok(stored)
        }
    }

    #[async_trait(?Send)]
    impl SessionStore for Database {
        async fn sign_in(&self, email: &str) -> Result<Session, AppError> {
            let email = email.trim().to_lowercase();
            if email.is_empty() {
                return Err(AppError::Unauthenticated);
            }

            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO users (id, email) VALUES (?, ?)",
                [Uuid::new_v4().to_string(), email.clone()],
            )?;
            let user_id: String =
                tx.query_row("SELECT id FROM users WHERE email = ?", [&email], |row| row.get(0))?;

            let token = Uuid::new_v4().to_string();
            tx.execute(
                "INSERT INTO sessions (token, user_id) VALUES (?, ?)",
                [&token, &user_id],
            )?;
            tx.commit()?;
            log!("[DB] Session opened for {}", email);

            Ok(Session {
                token,
                user: User { id: user_id, email },
            })
        }

        async fn sign_out(&self, token: &str) -> Result<(), AppError> {
            let conn = self.conn.lock().await;
            let closed = conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
            log!("[DB] Closed {} session(s)", closed);
            Ok(())
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
