use album_core::db::{ensure_schema, open_db, open_db_in_memory, DbError};
use album_core::{
    open_repository, Album, AlbumRepository, RepoError, RepoErrorKind, SqliteAlbumRepository,
    StorageBackend,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_albums_table() {
    let conn = open_db_in_memory().unwrap();
    assert_table_exists(&conn, "albums");
}

#[test]
fn ensure_schema_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();
    assert_table_exists(&conn, "albums");
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albums.sqlite3");

    let repo = SqliteAlbumRepository::open(&path).unwrap();
    repo.create(&Album::new("1", "Blue Train", "John Coltrane", 56.99))
        .unwrap();
    repo.create(&Album::new("2", "Jeru", "Gerry Mulligan", 17.99))
        .unwrap();
    drop(repo);

    let reopened = SqliteAlbumRepository::open(&path).unwrap();
    let albums = reopened.read_all().unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].title, "Blue Train");
    assert_eq!(albums[1].price, 17.99);
}

#[test]
fn opening_unreachable_path_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("albums.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));

    let err = open_repository(&StorageBackend::Sqlite { path, seed: false })
        .err()
        .expect("unreachable database must fail");
    assert_eq!(err.kind(), RepoErrorKind::BackendUnavailable);
}

#[test]
fn repository_rejects_connection_without_albums_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteAlbumRepository::try_new(conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("albums"))));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE albums (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL
        );",
    )
    .unwrap();

    let result = SqliteAlbumRepository::try_new(conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "albums",
            column: "price"
        })
    ));
}

#[test]
fn repository_rejects_table_without_unique_id() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE albums (id TEXT, title TEXT, artist TEXT, price REAL);")
        .unwrap();

    let result = SqliteAlbumRepository::try_new(conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingPrimaryKey {
            table: "albums",
            column: "id"
        })
    ));
}

#[test]
fn repository_rejects_composite_key_covering_id() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE albums (
            id TEXT NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            price REAL NOT NULL,
            PRIMARY KEY (id, title)
        );",
    )
    .unwrap();

    let err = SqliteAlbumRepository::try_new(conn).err().unwrap();
    assert_eq!(err.code(), "missing_primary_key");
}

#[test]
fn repository_accepts_unique_index_on_id() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE albums (id TEXT NOT NULL, title TEXT, artist TEXT, price REAL);
         CREATE UNIQUE INDEX albums_id ON albums (id);",
    )
    .unwrap();

    let repo = SqliteAlbumRepository::try_new(conn).unwrap();
    repo.create(&Album::new("2", "X", "Y", 10.0)).unwrap();
    let err = repo.create(&Album::new("2", "Z", "W", 20.0)).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(_)));
}

#[test]
fn opening_file_with_keyless_table_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albums.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE albums (id TEXT, title TEXT, artist TEXT, price REAL);")
        .unwrap();

    let err = open_repository(&StorageBackend::Sqlite { path, seed: false })
        .err()
        .expect("keyless albums table must be rejected");
    assert_eq!(err.kind(), RepoErrorKind::Internal);
    assert_eq!(err.code(), "missing_primary_key");
}

#[test]
fn repository_accepts_externally_prepared_connection() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let repo = SqliteAlbumRepository::try_new(conn).unwrap();
    assert!(repo.read_all().unwrap().is_empty());
}

#[test]
fn dropped_table_surfaces_as_backend_unavailable_not_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albums.sqlite3");
    let repo = SqliteAlbumRepository::open(&path).unwrap();

    let other = Connection::open(&path).unwrap();
    other.execute_batch("DROP TABLE albums;").unwrap();
    drop(other);

    let err = repo.read_one("1").unwrap_err();
    assert_eq!(err.kind(), RepoErrorKind::BackendUnavailable);
    assert!(!matches!(err, RepoError::NotFound(_)));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
