//! Host-facing glue: year, fonts, service worker, vitals.

mod common;

use spark_page::{report_web_vitals, ClassList, Page, PageConfig, PageEvent, SystemHost};

use common::{landing_page, setup, setup_with_host, text, MockHost};

#[test]
fn test_year_comes_from_host() {
    let (page, _, f, _) = setup();
    assert_eq!(text(&page, f.year), "2031");
}

#[test]
fn test_year_from_system_clock() {
    let (doc, f) = landing_page();
    let mut page = Page::new(doc, PageConfig::default());
    page.install_standard_components();
    page.mount().unwrap();

    let year: i32 = text(&page, f.year).parse().unwrap();
    assert!(year >= 2024);
}

#[test]
fn test_fonts_loaded_flag() {
    let (page, _, _, host) = setup();

    let body = page.document().body();
    assert!(page.document().has_class(body, ClassList::FONTS_LOADED));
    assert_eq!(
        host.log.borrow().fonts,
        vec!["normal 1em XLSMARTSans-Regular", "600 1em XLSMARTSans-SemiBold"]
    );
}

#[test]
fn test_font_failure_leaves_body_unflagged() {
    let mut host = MockHost::new();
    host.fail_font = Some("600 1em XLSMARTSans-SemiBold".to_string());
    let (page, _, _, _) = setup_with_host(host);

    let body = page.document().body();
    assert!(!page.document().has_class(body, ClassList::FONTS_LOADED));
}

#[test]
fn test_service_worker_registers_on_load() {
    let (mut page, _, _, host) = setup();
    assert!(host.log.borrow().service_workers.is_empty());

    page.dispatch(PageEvent::Load);
    page.dispatch(PageEvent::Load);
    assert_eq!(host.log.borrow().service_workers, vec!["/sw.js"]);
}

#[test]
fn test_service_worker_failure_is_contained() {
    let mut host = MockHost::new();
    host.fail_service_worker = true;
    let (mut page, _, f, host) = setup_with_host(host);

    page.dispatch(PageEvent::Load);
    assert_eq!(host.log.borrow().service_workers, vec!["/sw.js"]);

    // The rest of the page keeps working
    page.click(f.hamburger);
    assert!(page.document().has_class(f.menu, ClassList::ACTIVE));
}

#[test]
fn test_failed_service_worker_retries_on_next_load() {
    let mut host = MockHost::new();
    host.fail_service_worker = true;
    let (mut page, _, _, host) = setup_with_host(host);

    page.dispatch(PageEvent::Load);
    page.dispatch(PageEvent::Load);
    assert_eq!(host.log.borrow().service_workers.len(), 2);
}

#[test]
fn test_web_vitals() {
    assert_eq!(report_web_vitals(&MockHost::new()), 5);
    assert_eq!(report_web_vitals(&SystemHost), 0);
}
