//! Scroll-linked behaviour of the standard components on a full page.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_page::{ClassList, Element, LayoutSpec, PageEvent, PointerEvents, Tag, Transform};
use spark_signals::effect;

use common::{setup, text};

#[test]
fn test_scroll_top_visibility_follows_threshold() {
    let (mut page, handles, _, _) = setup();
    let button = page.document().query_class(ClassList::SCROLL_TO_TOP)[0];

    for (offset, expected) in [(0.0, false), (300.0, false), (301.0, true), (2000.0, true), (150.0, false)] {
        page.scroll_to(offset);
        assert_eq!(handles.scroll_top_visible.get(), expected, "offset {offset}");

        let style = page.document().style(button).unwrap();
        assert_eq!(style.opacity, Some(if expected { 1.0 } else { 0.0 }));
    }
}

#[test]
fn test_scroll_top_signal_only_changes_on_crossing() {
    let (mut page, handles, _, _) = setup();

    let runs = Rc::new(Cell::new(0));
    let count = runs.clone();
    let visible = handles.scroll_top_visible.clone();
    let _stop = effect(move || {
        let _ = visible.get();
        count.set(count.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    page.scroll_to(500.0);
    page.scroll_to(900.0);
    page.scroll_to(1200.0);
    assert_eq!(runs.get(), 2);

    page.scroll_to(100.0);
    assert_eq!(runs.get(), 3);
}

#[test]
fn test_scroll_top_button_is_created_once() {
    let (mut page, _, _, _) = setup();
    page.mount().unwrap();
    assert_eq!(page.document().query_class(ClassList::SCROLL_TO_TOP).len(), 1);
}

#[test]
fn test_scroll_top_click_smooth_scrolls_home() {
    let (mut page, handles, _, _) = setup();
    page.scroll_to(1000.0);
    let button = page.document().query_class(ClassList::SCROLL_TO_TOP)[0];

    let offsets = Rc::new(RefCell::new(Vec::new()));
    let seen = offsets.clone();
    let scroll = page.viewport().scroll_signal();
    let _stop = effect(move || seen.borrow_mut().push(scroll.get()));

    page.click(button);
    page.advance(2000);

    let offsets = offsets.borrow();
    assert!(offsets.len() > 3, "expected intermediate frames, got {offsets:?}");
    assert!(offsets.windows(2).all(|w| w[1] <= w[0]), "{offsets:?}");
    assert_eq!(page.viewport().scroll_y(), 0.0);
    assert!(!handles.scroll_top_visible.get());
}

#[test]
fn test_hidden_scroll_top_ignores_clicks() {
    let (mut page, handles, _, _) = setup();
    page.scroll_to(200.0);
    let button = page.document().query_class(ClassList::SCROLL_TO_TOP)[0];
    assert_eq!(page.document().style(button).unwrap().pointer_events, Some(PointerEvents::None));

    page.click(button);
    page.advance(1000);
    assert!(page.viewport().scroll_requests().is_empty());
    assert_eq!(page.viewport().scroll_y(), 200.0);
    assert!(!handles.scroll_top_visible.get());
}

#[test]
fn test_sections_start_hidden_and_reveal_once() {
    let (mut page, _, f, _) = setup();

    // Home is on screen at mount, about is below the fold
    assert!(page.document().has_class(f.home, ClassList::REVEALED));
    assert!(!page.document().has_class(f.about, ClassList::REVEALED));

    let style = page.document().style(f.about).unwrap();
    assert_eq!(style.opacity, Some(0.0));
    assert_eq!(style.transform, Some(Transform::TranslateY(30.0)));

    page.scroll_to(300.0);
    assert!(page.document().has_class(f.about, ClassList::REVEALED));
    let style = page.document().style(f.about).unwrap();
    assert_eq!(style.opacity, Some(1.0));
    assert_eq!(style.transform, Some(Transform::TranslateY(0.0)));

    // Scrolling away does not hide it again
    page.scroll_to(0.0);
    assert!(page.document().has_class(f.about, ClassList::REVEALED));
    assert_eq!(page.document().style(f.about).unwrap().opacity, Some(1.0));
    assert!(!page.visibility().is_watching(f.about));
}

#[test]
fn test_reveal_needs_ten_percent_above_trimmed_bottom() {
    let (mut page, _, f, _) = setup();

    // About's top sits at 880 - offset; the bottom 50px of the viewport
    // do not count, so 60px (10% of 600) must be above 750.
    page.scroll_to(180.0);
    assert!(!page.document().has_class(f.about, ClassList::REVEALED));

    page.scroll_to(200.0);
    assert!(page.document().has_class(f.about, ClassList::REVEALED));
}

#[test]
fn test_benefit_cards_are_staggered() {
    let (page, _, f, _) = setup();

    for (index, &card) in f.cards.iter().enumerate() {
        let style = page.document().style(card).unwrap();
        let expected = index as f32 * 0.1;
        assert_eq!(style.transition.len(), 2);
        for transition in &style.transition {
            assert!((transition.delay_s - expected).abs() < 1e-6);
            assert_eq!(transition.duration_s, 0.6);
        }
    }
}

#[test]
fn test_active_link_tracks_section_under_line() {
    let (mut page, handles, f, _) = setup();
    let active_links = |page: &spark_page::Page| -> Vec<usize> {
        f.links
            .iter()
            .enumerate()
            .filter(|&(_, &link)| page.document().has_class(link, ClassList::ACTIVE))
            .map(|(i, _)| i)
            .collect()
    };

    page.scroll_to(0.0);
    page.scroll_to(1.0);
    assert_eq!(handles.nav.active_section_id.get(), "home");
    assert_eq!(active_links(&page), vec![0]);

    page.scroll_to(800.0);
    assert_eq!(handles.nav.active_section_id.get(), "about");
    assert_eq!(active_links(&page), vec![1]);

    // Stats top lands exactly on the line
    page.scroll_to(1380.0);
    assert_eq!(handles.nav.active_section_id.get(), "stats");
    assert_eq!(active_links(&page), vec![2]);

    page.scroll_to(2380.0);
    assert_eq!(handles.nav.active_section_id.get(), "contact");
    assert_eq!(active_links(&page), vec![3]);
}

#[test]
fn test_scroll_offsets_are_clamped() {
    let (mut page, _, _, _) = setup();

    page.scroll_to(99_999.0);
    assert_eq!(page.viewport().scroll_y(), 2380.0);

    page.dispatch(PageEvent::Scroll { offset: -50.0 });
    assert_eq!(page.viewport().scroll_y(), 0.0);
}

#[test]
fn test_counter_animates_once_to_exact_target() {
    let (mut page, _, f, _) = setup();
    assert_eq!(text(&page, f.counter), "1500+");

    page.scroll_to(1000.0);
    assert_eq!(text(&page, f.counter), "0");
    assert!(page.document().has_class(f.counter, ClassList::ANIMATED));

    // Start delay, then the first step runs synchronously
    page.advance(299);
    assert_eq!(text(&page, f.counter), "0");
    page.advance(1);
    assert_eq!(text(&page, f.counter), "9");

    let mut last = 9;
    for _ in 0..200 {
        page.advance(16);
        let value: i64 = text(&page, f.counter).parse().unwrap();
        assert!(value >= last, "{value} < {last}");
        last = value;
    }
    assert_eq!(text(&page, f.counter), "1500");

    // Leaving and re-entering does not restart it
    page.scroll_to(0.0);
    page.scroll_to(1000.0);
    page.advance(1000);
    assert_eq!(text(&page, f.counter), "1500");
}

#[test]
fn test_counter_needs_half_visibility() {
    let (mut page, _, f, _) = setup();

    // Container spans 1480..1580; half of it is above 800 from offset 730
    page.scroll_to(720.0);
    assert_eq!(text(&page, f.counter), "1500+");

    page.scroll_to(730.0);
    assert_eq!(text(&page, f.counter), "0");
}

#[test]
fn test_malformed_counter_is_left_alone() {
    let (mut page, _, f, _) = setup();

    page.scroll_to(1200.0);
    page.advance(3000);

    assert_eq!(text(&page, f.broken_counter), "abc");
    assert!(!page.document().has_class(f.broken_counter, ClassList::ANIMATED));
    assert_eq!(text(&page, f.counter), "1500");
}

#[test]
fn test_lazy_images_wait_for_dom_ready_and_range() {
    let (mut page, _, f, _) = setup();

    // Image spans 2130..2330; the 50px margin extends the viewport to 850
    page.scroll_to(1400.0);
    assert_eq!(page.document().attr(f.lazy_image, "src"), None);

    page.scroll_to(0.0);
    page.dispatch(PageEvent::DomContentLoaded);
    assert_eq!(page.document().attr(f.lazy_image, "src"), None);
    assert!(page.visibility().is_watching(f.lazy_image));

    page.scroll_to(1270.0);
    assert_eq!(page.document().attr(f.lazy_image, "src"), None);

    page.scroll_to(1290.0);
    assert_eq!(page.document().attr(f.lazy_image, "src"), Some("/img/komunitas.webp"));
    assert_eq!(page.document().attr(f.lazy_image, "data-src"), None);
    assert!(!page.visibility().is_watching(f.lazy_image));
}

#[test]
fn test_lazy_image_without_data_src_is_dropped_untouched() {
    let (mut page, _, f, _) = setup();
    let contact = f.contact;
    let bare = page
        .document_mut()
        .append(
            contact,
            Element::new(Tag::Img)
                .with_attr("loading", "lazy")
                .with_attr("src", "/img/peta.png")
                .with_layout(LayoutSpec::sized(300.0, 200.0)),
        )
        .unwrap();

    page.dispatch(PageEvent::DomContentLoaded);
    assert!(page.visibility().is_watching(bare));

    page.scroll_to(2380.0);
    assert!(!page.visibility().is_watching(bare));
    assert_eq!(page.document().attr(bare, "src"), Some("/img/peta.png"));
    assert_eq!(page.document().attr(bare, "data-src"), None);
}
