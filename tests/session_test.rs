use crumbs::base::error::CrumbError;
use crumbs::cookies::memory::MemoryCookieStore;
use crumbs::cookies::store::CookieStore;
use crumbs::hostlist::{HostLists, ListKind};
use crumbs::session::selection::Row;
use crumbs::session::Session;
use time::macros::datetime;
use time::OffsetDateTime;

fn created(n: i64) -> Option<OffsetDateTime> {
    Some(OffsetDateTime::from_unix_timestamp(1_600_000_000 + n).unwrap())
}

#[test]
fn test_count_matches_store_for_every_filter() {
    let mut store = MemoryCookieStore::new();
    for (i, host) in [".google.com", "mail.google.com", ".example.org", "Google.de"]
        .iter()
        .enumerate()
    {
        store.add(host, "c", "/", created(i as i64), None);
    }
    let expected = store.query_by_host("google").unwrap().len();
    let mut session = Session::new(store, HostLists::default(), 10);

    session.select_all_cookies().unwrap();
    assert_eq!(session.count().unwrap().count, 4);

    session.select_cookies_by_host("google").unwrap();
    assert_eq!(session.count().unwrap().count, expected);
    assert_eq!(expected, 2);
}

#[test]
fn test_delete_expired_scenario() {
    let mut store = MemoryCookieStore::new();
    let a = store.add("x.com", "A", "/", created(1), Some(datetime!(2000-01-01 0:00 UTC)));
    let b = store.add("x.com", "B", "/", created(2), None);
    let mut session = Session::new(store, HostLists::default(), 10);

    session.select_all_cookies().unwrap();
    let report = session.delete_expired().unwrap();

    assert_eq!(report.to_string(), "Deleted 1 cookies");
    assert!(!session.store().contains(a));
    assert!(session.store().contains(b));
}

#[test]
fn test_delete_blacklisted_scenario() {
    let mut store = MemoryCookieStore::new();
    let plain = store.add(".x.com", "plain", "/", created(1), None);
    let sub = store.add(".y.x.com", "sub", "/", created(2), None);
    let mut lists = HostLists::default();
    lists.blacklist.insert(".x.com");
    lists.whitelist.insert(".y.x.com");
    let mut session = Session::new(store, lists, 10);

    session.select_all_cookies().unwrap();
    let report = session.delete_blacklisted().unwrap();

    assert_eq!(report.to_string(), "Deleted 1 cookies");
    let spared: Vec<_> = report.spared().map(Row::host).collect();
    assert_eq!(spared, [".y.x.com"]);
    assert!(!session.store().contains(plain));
    assert!(session.store().contains(sub));
}

#[test]
fn test_host_in_both_lists_is_always_preserved() {
    let mut store = MemoryCookieStore::new();
    let both = store.add("both.com", "c", "/", created(1), Some(datetime!(2001-01-01 0:00 UTC)));
    let mut lists = HostLists::default();
    lists.blacklist.insert("both.com");
    lists.whitelist.insert("both.com");
    let mut session = Session::new(store, lists, 10);

    session.select_all_cookies().unwrap();
    assert_eq!(session.delete_blacklisted().unwrap().deleted(), 0);
    assert_eq!(session.delete_all().unwrap().deleted(), 0);
    assert!(session.store().contains(both));
}

#[test]
fn test_add_host_twice_keeps_one_entry() {
    let mut session = Session::new(MemoryCookieStore::new(), HostLists::default(), 10);
    session.select_list(ListKind::Blacklist, None);
    session.add_host("foo.com").unwrap();
    session.add_host(".foo.com").unwrap();

    assert_eq!(session.lists().blacklist.entries(), [".foo.com"]);
    assert_eq!(session.count().unwrap().count, 1);
}

#[test]
fn test_view_is_page_relative() {
    let mut store = MemoryCookieStore::new();
    for i in 0..7 {
        store.add(&format!(".h{i}.com"), "c", "/", created(-i), None);
    }
    let mut session = Session::new(store, HostLists::default(), 3);
    session.select_all_cookies().unwrap();
    session.next_page().unwrap();

    let page: Vec<String> = session
        .list()
        .unwrap()
        .rows
        .iter()
        .map(|r| r.host().to_string())
        .collect();
    assert_eq!(page, [".h3.com", ".h4.com", ".h5.com"]);

    for (i, host) in page.iter().enumerate() {
        assert_eq!(session.view(i + 1).unwrap().host(), host);
    }
    assert!(matches!(session.view(0), Err(CrumbError::InvalidReference(_))));
    assert!(matches!(session.view(4), Err(CrumbError::InvalidReference(_))));
}

#[test]
fn test_pagination_clamps_at_both_ends() {
    let mut store = MemoryCookieStore::new();
    for i in 0..4 {
        store.add(".h.com", &format!("c{i}"), "/", created(i), None);
    }
    let mut session = Session::new(store, HostLists::default(), 2);
    session.select_all_cookies().unwrap();

    assert!(!session.previous_page().unwrap());
    assert_eq!(session.selection().unwrap().page(), 0);
    assert!(session.next_page().unwrap());
    assert!(!session.next_page().unwrap());
    assert_eq!(session.selection().unwrap().page(), 1);
}

#[test]
fn test_deleting_list_entries_marks_list_dirty() {
    let mut lists = HostLists::default();
    lists.whitelist.insert("a.com");
    lists.whitelist.insert("b.com");
    let mut session = Session::new(MemoryCookieStore::new(), lists, 10);

    session.select_list(ListKind::Whitelist, Some("b."));
    let report = session.delete_by_numbers(&[1]).unwrap();

    assert_eq!(report.to_string(), "Deleted 1 entries from whitelist");
    assert_eq!(session.lists().whitelist.entries(), [".a.com"]);
    assert!(session.lists().whitelist.is_dirty());
}

#[test]
fn test_count_matches_list_for_every_filter() {
    let mut lists = HostLists::default();
    for host in ["ads.com", "adserver.net", "news.org"] {
        lists.blacklist.insert(host);
    }
    for host in ["bank.com", "mail.bank.com"] {
        lists.whitelist.insert(host);
    }
    let mut session = Session::new(MemoryCookieStore::new(), lists, 10);

    for (list, filter) in [
        (ListKind::Blacklist, None),
        (ListKind::Blacklist, Some("ad")),
        (ListKind::Blacklist, Some("zzz")),
        (ListKind::Whitelist, None),
        (ListKind::Whitelist, Some("mail")),
    ] {
        let expected = match filter {
            Some(filter) => session.lists().get(list).matching(filter).len(),
            None => session.lists().get(list).len(),
        };
        let report = session.select_list(list, filter);
        assert_eq!(report.count, expected);
        assert_eq!(session.count().unwrap().count, expected);
    }
}

#[test]
fn test_delete_all_empties_whitelist_selection() {
    let mut lists = HostLists::default();
    lists.whitelist.insert("a.com");
    lists.whitelist.insert("b.com");
    let mut session = Session::new(MemoryCookieStore::new(), lists, 10);

    session.select_list(ListKind::Whitelist, None);
    let report = session.delete_all().unwrap();

    assert_eq!(report.to_string(), "Deleted 2 entries from whitelist");
    assert_eq!(report.spared().count(), 0);
    assert!(session.lists().whitelist.is_empty());
    assert_eq!(session.count().unwrap().count, 0);
}

#[test]
fn test_numbers_follow_refreshed_page_after_delete() {
    let mut store = MemoryCookieStore::new();
    for i in 0..3 {
        store.add(&format!(".h{i}.com"), "c", "/", created(-i), None);
    }
    let mut session = Session::new(store, HostLists::default(), 2);
    session.select_all_cookies().unwrap();

    let report = session.delete_by_numbers(&[1]).unwrap();
    assert_eq!(report.deleted_rows().next().unwrap().host(), ".h0.com");

    // The page is refreshed at once: row 1 is now the next cookie.
    assert_eq!(session.view(1).unwrap().host(), ".h1.com");
    assert_eq!(session.view(2).unwrap().host(), ".h2.com");
    let report = session.delete_by_numbers(&[2]).unwrap();
    assert_eq!(report.deleted_rows().next().unwrap().host(), ".h2.com");
}
