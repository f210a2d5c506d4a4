use crate::core::{BangCollection, BangEntry, BangId, ConflictDetector};

/// Helper to create test bangs
fn test_bang(keyword: &str, url: &str) -> (BangId, BangEntry) {
    (BangId::new(), BangEntry::new(keyword, [url]))
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert_eq!(detector.find_conflicts().len(), 0);
}

#[test]
fn test_no_conflicts_with_unique_keywords() {
    let mut detector = ConflictDetector::new();

    let (id, entry) = test_bang("g", "https://google.com/?q=%s");
    detector.add_bang(id, entry);
    let (id, entry) = test_bang("ddg", "https://duckduckgo.com/?q=%s");
    detector.add_bang(id, entry);
    let (id, entry) = test_bang("w", "https://en.wikipedia.org/w/index.php?search=%s");
    detector.add_bang(id, entry);

    assert_eq!(detector.find_conflicts().len(), 0);
}

#[test]
fn test_detects_simple_conflict() {
    let mut detector = ConflictDetector::new();

    // Same keyword, different destinations
    let (id, entry) = test_bang("g", "https://google.com/?q=%s");
    detector.add_bang(id, entry);
    let (id, entry) = test_bang("g", "https://github.com/search?q=%s");
    detector.add_bang(id, entry);

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].conflicting_bangs.len(), 2);
    assert_eq!(conflicts[0].keyword, "g");
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let mut detector = ConflictDetector::new();

    let (id, entry) = test_bang("gh", "https://github.com/search?q=%s");
    detector.add_bang(id, entry);
    let (id, entry) = test_bang(" gh ", "https://gitlab.com/search?search=%s");
    detector.add_bang(id, entry);

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].keyword, "gh");
}

#[test]
fn test_keywords_are_case_sensitive() {
    let mut detector = ConflictDetector::new();

    let (id, entry) = test_bang("a", "https://amazon.com/s?k=%s");
    detector.add_bang(id, entry);
    let (id, entry) = test_bang("A", "https://apple.com/search?q=%s");
    detector.add_bang(id, entry);

    assert!(detector.find_conflicts().is_empty());
}

#[test]
fn test_multiple_conflicts_in_first_seen_order() {
    let mut collection = BangCollection::new();
    for (keyword, url) in [
        ("w", "https://a.example/%s"),
        ("g", "https://b.example/%s"),
        ("w", "https://c.example/%s"),
        ("g", "https://d.example/%s"),
        ("yt", "https://e.example/%s"),
    ] {
        let (id, entry) = test_bang(keyword, url);
        collection.insert(id, entry);
    }

    let detector = ConflictDetector::from_collection(&collection);
    let conflicts = detector.find_conflicts();

    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].keyword, "w");
    assert_eq!(conflicts[1].keyword, "g");
}
