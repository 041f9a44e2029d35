//! SQLite-backed album repository.
//!
//! # Responsibility
//! - Persist the catalog in the `albums` table.
//! - Translate SQLite constraint/not-found signals into contract errors.
//!
//! # Invariants
//! - Each contract operation is one parameterized statement.
//! - The table must exist with all required columns, and `id` must be a
//!   unique key, before the repository is handed out.
//! - `read_all` orders by `rowid`, which matches insertion order.

use crate::db::{open_db, open_db_in_memory, ALBUMS_COLUMNS, ALBUMS_TABLE};
use crate::model::album::Album;
use crate::repo::album_repo::{AlbumRepository, RepoError, RepoResult};
use log::info;
use rusqlite::{ffi, params, Connection, ErrorCode, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const ALBUM_SELECT_SQL: &str = "SELECT id, title, artist, price FROM albums";
const ALBUMS_KEY_COLUMN: &str = "id";

/// Album repository over a single SQLite connection.
///
/// `rusqlite::Connection` is `Send` but not `Sync`; the mutex serializes
/// statements issued from concurrent request workers.
#[derive(Debug)]
pub struct SqliteAlbumRepository {
    conn: Mutex<Connection>,
}

impl SqliteAlbumRepository {
    /// Opens (or creates) a database file and verifies its schema.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let repo = Self::try_new(open_db(path)?)?;
        info!(
            "event=repo_open module=repo status=ok backend=sqlite path={}",
            path.display()
        );
        Ok(repo)
    }

    /// Opens a private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Wraps an existing connection after checking the `albums` schema.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `albums` does not exist.
    /// - `MissingRequiredColumn` when a required column is absent.
    /// - `MissingPrimaryKey` when `id` is neither the sole primary key nor
    ///   covered by a single-column unique index.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        verify_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts every album whose id is not stored yet.
    ///
    /// Returns the number of rows actually inserted.
    pub fn seed(&self, albums: &[Album]) -> RepoResult<usize> {
        for album in albums {
            album.validate()?;
        }

        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO albums (id, title, artist, price)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for album in albums {
                inserted += stmt.execute(params![
                    album.id.as_str(),
                    album.title.as_str(),
                    album.artist.as_str(),
                    album.price,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlbumRepository for SqliteAlbumRepository {
    fn create(&self, album: &Album) -> RepoResult<Album> {
        album.validate()?;

        let result = self.lock().execute(
            "INSERT INTO albums (id, title, artist, price) VALUES (?1, ?2, ?3, ?4);",
            params![
                album.id.as_str(),
                album.title.as_str(),
                album.artist.as_str(),
                album.price,
            ],
        );

        match result {
            Ok(_) => Ok(album.clone()),
            Err(err) if is_key_conflict(&err) => Err(RepoError::DuplicateId(album.id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    fn read_all(&self) -> RepoResult<Vec<Album>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("{ALBUM_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut albums = Vec::new();

        while let Some(row) = rows.next()? {
            albums.push(parse_album_row(row)?);
        }

        Ok(albums)
    }

    fn read_one(&self, id: &str) -> RepoResult<Album> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("{ALBUM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;

        if let Some(row) = rows.next()? {
            return parse_album_row(row);
        }

        Err(RepoError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, album: &Album) -> RepoResult<Album> {
        let replacement = album.with_id(id);
        replacement.validate()?;

        let changed = self.lock().execute(
            "UPDATE albums
             SET
                title = ?1,
                artist = ?2,
                price = ?3
             WHERE id = ?4;",
            params![
                replacement.title.as_str(),
                replacement.artist.as_str(),
                replacement.price,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(replacement)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .lock()
            .execute("DELETE FROM albums WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn verify_schema(conn: &Connection) -> RepoResult<()> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [ALBUMS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(ALBUMS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([ALBUMS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in ALBUMS_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: ALBUMS_TABLE,
                column,
            });
        }
    }

    if !id_is_unique_key(conn)? {
        return Err(RepoError::MissingPrimaryKey {
            table: ALBUMS_TABLE,
            column: ALBUMS_KEY_COLUMN,
        });
    }

    Ok(())
}

fn id_is_unique_key(conn: &Connection) -> RepoResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) WHERE pk > 0;")?;
    let pk_columns = stmt
        .query_map([ALBUMS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if pk_columns == [ALBUMS_KEY_COLUMN] {
        return Ok(true);
    }

    let unique_index: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_index_list(?1) AS idx
            WHERE idx.\"unique\" = 1
              AND (SELECT COUNT(*) FROM pragma_index_info(idx.name)) = 1
              AND (SELECT name FROM pragma_index_info(idx.name)) = ?2
        );",
        [ALBUMS_TABLE, ALBUMS_KEY_COLUMN],
        |row| row.get(0),
    )?;
    Ok(unique_index)
}

fn parse_album_row(row: &Row<'_>) -> RepoResult<Album> {
    let album = decode_album_row(row)
        .map_err(|err| RepoError::InvalidData(format!("row in albums: {err}")))?;
    album.validate().map_err(|err| {
        RepoError::InvalidData(format!("row `{}` in albums: {err}", album.id))
    })?;
    Ok(album)
}

fn decode_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get("id")?,
        title: row.get("title")?,
        artist: row.get("artist")?,
        price: row.get("price")?,
    })
}

fn is_key_conflict(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                )
        }
        _ => false,
    }
}
