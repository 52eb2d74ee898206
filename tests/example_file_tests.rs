//! Example store behavior against real files on disk.

use nlq::infrastructure::storage::examples;
use std::io::Write;

#[tokio::test]
async fn written_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("examples.sql");

    let pairs = [
        ("count all actors", "SELECT COUNT(*) FROM actor;"),
        (
            "top five longest films",
            "SELECT title FROM film ORDER BY length DESC LIMIT 5;",
        ),
        (
            "rentals per store",
            "SELECT store_id, COUNT(*) FROM rental GROUP BY store_id;",
        ),
    ];

    let mut file = std::fs::File::create(&path).unwrap();
    for (description, statement) in &pairs {
        writeln!(file, "-- {}", description).unwrap();
        writeln!(file, "{}", statement).unwrap();
        writeln!(file).unwrap();
    }
    drop(file);

    let loaded = examples::load(&path).await;
    assert_eq!(loaded.len(), pairs.len());
    for (example, (description, statement)) in loaded.iter().zip(&pairs) {
        assert_eq!(&example.description, description);
        assert_eq!(&example.statement, statement);
    }
}

#[tokio::test]
async fn empty_file_loads_as_no_examples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.sql");
    std::fs::write(&path, "").unwrap();

    assert!(examples::load(&path).await.is_empty());
}

#[tokio::test]
async fn missing_file_loads_as_no_examples() {
    let dir = tempfile::tempdir().unwrap();
    assert!(examples::load(dir.path().join("nope.sql")).await.is_empty());
}

#[test]
fn multiline_statements_keep_their_shape() {
    let source = "\
-- revenue by category
SELECT c.name, SUM(p.amount)
FROM payment p
JOIN rental r ON r.rental_id = p.rental_id
GROUP BY c.name;
";
    let parsed = examples::parse(source);
    assert_eq!(parsed.len(), 1);
    assert!(parsed[0].statement.starts_with("SELECT c.name"));
    assert!(parsed[0].statement.ends_with("GROUP BY c.name;"));
    assert_eq!(parsed[0].statement.lines().count(), 4);
}
