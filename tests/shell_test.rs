mod common;

use std::fs;

use common::{create_db, names, FixtureCookie};
use crumbs::config::Config;
use crumbs::shell::Shell;
use tempfile::tempdir;
use time::macros::datetime;

fn fixture() -> Vec<FixtureCookie<'static>> {
    vec![
        FixtureCookie {
            host: ".tracker.net",
            name: "track",
            created: datetime!(2024-01-03 0:00 UTC),
            expires: Some(datetime!(2099-01-01 0:00 UTC)),
        },
        FixtureCookie {
            host: "bank.example.com",
            name: "session",
            created: datetime!(2024-01-02 0:00 UTC),
            expires: None,
        },
        FixtureCookie {
            host: ".old.example.com",
            name: "stale",
            created: datetime!(2024-01-01 0:00 UTC),
            expires: Some(datetime!(2000-01-01 0:00 UTC)),
        },
    ]
}

fn config(dir: &std::path::Path) -> Config {
    Config::default()
        .with_cookies(dir.join("Cookies"))
        .with_blacklist(dir.join("blacklist.json"))
        .with_whitelist(dir.join("whitelist.json"))
        .with_page_size(10)
}

#[test]
fn test_batch_scrub_and_save() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());
    fs::write(dir.path().join("blacklist.json"), r#"[".tracker.net"]"#).unwrap();

    let session = config(dir.path()).open_session().unwrap();
    let mut out = Vec::new();
    Shell::new(session, &mut out, false)
        .run_batch("sca; de; db; swa; ah bank.example.com")
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Deleting: host=.old.example.com name=stale path=/"));
    assert!(out.contains("Deleting: host=.tracker.net name=track path=/"));
    assert!(out.contains("Added '.bank.example.com' to whitelist."));
    assert_eq!(names(&dir.path().join("Cookies")), ["session"]);

    let whitelist = fs::read_to_string(dir.path().join("whitelist.json")).unwrap();
    let hosts: Vec<String> = serde_json::from_str(&whitelist).unwrap();
    assert_eq!(hosts, [".bank.example.com"]);
}

#[test]
fn test_exit_without_saving_discards_list_edits() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());

    let session = config(dir.path()).open_session().unwrap();
    Shell::new(session, Vec::new(), false)
        .run_batch("sba; ah foo.com; ah .foo.com; x")
        .unwrap();

    assert!(!dir.path().join("blacklist.json").exists());
}

#[test]
fn test_saved_blacklist_has_one_entry_per_host() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());

    let session = config(dir.path()).open_session().unwrap();
    Shell::new(session, Vec::new(), false)
        .run_batch("sba; ah foo.com; ah .foo.com")
        .unwrap();

    let body = fs::read_to_string(dir.path().join("blacklist.json")).unwrap();
    let hosts: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(hosts, [".foo.com"]);
}

#[test]
fn test_delete_by_number_reports_each_bad_reference() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());

    let session = config(dir.path()).open_session().unwrap();
    let mut out = Vec::new();
    Shell::new(session, &mut out, false)
        .run_batch("sca; dn 1,5,7")
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Index '5' is out of range"));
    assert!(out.contains("Index '7' is out of range"));
    assert!(out.contains("Deleted 1 cookies"));
    assert_eq!(names(&dir.path().join("Cookies")), ["session", "stale"]);
}

#[test]
fn test_whitelisted_cookie_survives_delete_all() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());
    fs::write(dir.path().join("whitelist.json"), r#"["bank.example.com"]"#).unwrap();

    let session = config(dir.path()).open_session().unwrap();
    let mut out = Vec::new();
    Shell::new(session, &mut out, false).run_batch("sch example; da").unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(
        "Cookie matches whitelist, ignoring: host=bank.example.com name=session path=/"
    ));
    assert_eq!(names(&dir.path().join("Cookies")), ["session", "track"]);
}

#[test]
fn test_invalid_list_file_prevents_startup() {
    let dir = tempdir().unwrap();
    create_db(&dir.path().join("Cookies"), &fixture());
    fs::write(dir.path().join("blacklist.json"), "{").unwrap();

    let err = config(dir.path()).open_session().err().unwrap();
    assert!(err.to_string().contains("invalid JSON"));
}
