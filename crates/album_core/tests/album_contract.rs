use album_core::{
    Album, AlbumRepository, InMemoryAlbumRepository, RepoError, RepoErrorKind,
    SqliteAlbumRepository,
};
use std::collections::HashSet;
use std::sync::Arc;

fn backends() -> Vec<(&'static str, Arc<dyn AlbumRepository>)> {
    let memory: Arc<dyn AlbumRepository> = Arc::new(InMemoryAlbumRepository::new());
    let sqlite: Arc<dyn AlbumRepository> =
        Arc::new(SqliteAlbumRepository::open_in_memory().unwrap());
    vec![("memory", memory), ("sqlite", sqlite)]
}

fn blue_train() -> Album {
    Album::new("1", "Blue Train", "John Coltrane", 56.99)
}

fn ids(repo: &dyn AlbumRepository) -> Vec<String> {
    repo.read_all()
        .unwrap()
        .into_iter()
        .map(|album| album.id)
        .collect()
}

#[test]
fn create_and_read_one_roundtrip() {
    for (name, repo) in backends() {
        let album = blue_train();
        let created = repo.create(&album).unwrap();
        assert_eq!(created, album, "{name}");

        let loaded = repo.read_one("1").unwrap();
        assert_eq!(loaded, album, "{name}");
    }
}

#[test]
fn duplicate_create_is_rejected_and_keeps_first_record() {
    for (name, repo) in backends() {
        let first = Album::new("2", "X", "Y", 10.0);
        repo.create(&first).unwrap();

        let err = repo.create(&Album::new("2", "Z", "W", 20.0)).unwrap_err();
        assert!(matches!(&err, RepoError::DuplicateId(id) if id == "2"), "{name}: {err}");
        assert_eq!(err.kind(), RepoErrorKind::DuplicateId, "{name}");

        assert_eq!(repo.read_one("2").unwrap(), first, "{name}");
        assert_eq!(repo.read_all().unwrap().len(), 1, "{name}");
    }
}

#[test]
fn seeded_record_can_be_read_then_deleted() {
    for (name, repo) in backends() {
        repo.create(&blue_train()).unwrap();
        assert_eq!(repo.read_one("1").unwrap(), blue_train(), "{name}");

        repo.delete("1").unwrap();

        let err = repo.read_one("1").unwrap_err();
        assert!(matches!(&err, RepoError::NotFound(id) if id == "1"), "{name}: {err}");
    }
}

#[test]
fn delete_missing_returns_not_found_and_changes_nothing() {
    for (name, repo) in backends() {
        repo.create(&blue_train()).unwrap();
        let before = repo.read_all().unwrap();

        let err = repo.delete("404").unwrap_err();
        assert!(matches!(&err, RepoError::NotFound(id) if id == "404"), "{name}: {err}");
        assert_eq!(err.kind(), RepoErrorKind::NotFound, "{name}");

        assert_eq!(repo.read_all().unwrap(), before, "{name}");
    }
}

#[test]
fn read_one_missing_returns_not_found() {
    for (name, repo) in backends() {
        let err = repo.read_one("nope").unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)), "{name}");
    }
}

#[test]
fn update_replaces_fields_and_keeps_addressed_id() {
    for (name, repo) in backends() {
        repo.create(&blue_train()).unwrap();

        let replacement = Album::new("99", "Blue Train (Remaster)", "John Coltrane", 60.0);
        let updated = repo.update("1", &replacement).unwrap();
        assert_eq!(updated.id, "1", "{name}");

        let loaded = repo.read_one("1").unwrap();
        assert_eq!(loaded, replacement.with_id("1"), "{name}");
        assert!(matches!(repo.read_one("99"), Err(RepoError::NotFound(_))), "{name}");
    }
}

#[test]
fn update_missing_returns_not_found() {
    for (name, repo) in backends() {
        let err = repo.update("5", &blue_train()).unwrap_err();
        assert!(matches!(&err, RepoError::NotFound(id) if id == "5"), "{name}: {err}");
        assert!(repo.read_all().unwrap().is_empty(), "{name}");
    }
}

#[test]
fn read_all_is_a_snapshot() {
    for (name, repo) in backends() {
        repo.create(&blue_train()).unwrap();
        let snapshot = repo.read_all().unwrap();

        repo.create(&Album::new("2", "Jeru", "Gerry Mulligan", 17.99))
            .unwrap();
        repo.update("1", &Album::new("1", "Changed", "Someone", 1.0))
            .unwrap();

        assert_eq!(snapshot, vec![blue_train()], "{name}");
    }
}

#[test]
fn read_all_keeps_insertion_order_through_update_and_delete() {
    for (name, repo) in backends() {
        for id in ["c", "a", "b", "d"] {
            repo.create(&Album::new(id, "t", "a", 1.0)).unwrap();
        }
        repo.update("a", &Album::new("a", "t2", "a2", 2.0)).unwrap();
        repo.delete("b").unwrap();
        repo.create(&Album::new("b", "again", "a", 3.0)).unwrap();

        assert_eq!(ids(&*repo), ["c", "a", "d", "b"], "{name}");
        assert_eq!(ids(&*repo), ids(&*repo), "{name}");
    }
}

#[test]
fn validation_failure_blocks_create_and_update() {
    for (name, repo) in backends() {
        let negative = Album::new("n", "t", "a", -1.0);
        let err = repo.create(&negative).unwrap_err();
        assert_eq!(err.kind(), RepoErrorKind::InvalidInput, "{name}");

        let err = repo.create(&Album::new("", "t", "a", 1.0)).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "{name}");

        repo.create(&blue_train()).unwrap();
        let err = repo
            .update("1", &Album::new("1", "t", "a", f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "{name}");
        assert_eq!(repo.read_one("1").unwrap(), blue_train(), "{name}");
    }
}

#[test]
fn update_with_empty_body_id_uses_addressed_id() {
    for (name, repo) in backends() {
        repo.create(&blue_train()).unwrap();
        let updated = repo
            .update("1", &Album::new("", "Blue Train", "John Coltrane", 9.99))
            .unwrap();
        assert_eq!(updated.id, "1", "{name}");
        assert_eq!(repo.read_one("1").unwrap().price, 9.99, "{name}");
    }
}

#[test]
fn concurrent_creates_with_distinct_ids_are_all_kept() {
    const WORKERS: usize = 8;
    const PER_WORKER: usize = 25;

    for (name, repo) in backends() {
        std::thread::scope(|scope| {
            for worker in 0..WORKERS {
                let repo = &repo;
                scope.spawn(move || {
                    for n in 0..PER_WORKER {
                        let id = format!("{worker}-{n}");
                        repo.create(&Album::new(id, "t", "a", n as f64)).unwrap();
                    }
                });
            }
        });

        let stored = repo.read_all().unwrap();
        assert_eq!(stored.len(), WORKERS * PER_WORKER, "{name}");
        let unique: HashSet<_> = stored.iter().map(|album| album.id.as_str()).collect();
        assert_eq!(unique.len(), WORKERS * PER_WORKER, "{name}");
    }
}

#[test]
fn concurrent_duplicate_creates_admit_exactly_one() {
    for (name, repo) in backends() {
        let outcomes: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let repo = &repo;
                    scope.spawn(move || repo.create(&Album::new("same", "t", "a", n as f64)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let created = outcomes.iter().filter(|r| r.is_ok()).count();
        let duplicates = outcomes
            .iter()
            .filter(|r| matches!(r, Err(RepoError::DuplicateId(_))))
            .count();
        assert_eq!(created, 1, "{name}");
        assert_eq!(duplicates, 7, "{name}");
        assert_eq!(repo.read_all().unwrap().len(), 1, "{name}");
    }
}
