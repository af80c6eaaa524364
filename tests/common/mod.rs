//! Shared landing-page fixture for the scenario tests.
//!
//! ```text
//! doc y     element
//!    0      header (80)      hamburger, menu with four nav links
//!   80      #home (800)      .hero-text > h1
//!  880      #about (600)     row of three .benefit-card (300x200, gap 20)
//! 1480      #stats (600)     .anggota "1500+", .anggota "abc"
//! 2080      #contact (1000)  .btn (200x50), lazy img (300x200), unsized img
//! 3080      footer (100)     #year
//! ```
//!
//! Viewport 1280x800, so the page scrolls 0..=2380.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use spark_page::{
    ClassList, Document, Element, ElementId, Host, LayoutSpec, Page, PageConfig, PageError,
    PageHandles, Result, Tag, VitalMetric,
};

pub const VIEWPORT: (f32, f32) = (1280.0, 800.0);

pub struct Fixture {
    pub hamburger: ElementId,
    pub menu: ElementId,
    pub links: Vec<ElementId>,
    pub home: ElementId,
    pub heading: ElementId,
    pub about: ElementId,
    pub cards: Vec<ElementId>,
    pub stats: ElementId,
    pub counter: ElementId,
    pub broken_counter: ElementId,
    pub contact: ElementId,
    pub button: ElementId,
    pub lazy_image: ElementId,
    pub unsized_image: ElementId,
    pub year: ElementId,
}

pub fn landing_page() -> (Document, Fixture) {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append(body, Element::new(Tag::Header).with_layout(LayoutSpec::block(80.0))).unwrap();
    let hamburger = doc
        .append(header, Element::new(Tag::Button).with_class(ClassList::HAMBURGER).with_layout(LayoutSpec::sized(40.0, 40.0)))
        .unwrap();
    let menu = doc
        .append(header, Element::new(Tag::Nav).with_class(ClassList::NAV_MENU).with_layout(LayoutSpec::row(0.0)))
        .unwrap();
    let links = ["#home", "#about", "#stats", "#contact"]
        .into_iter()
        .map(|href| {
            doc.append(
                menu,
                Element::new(Tag::A)
                    .with_class(ClassList::NAV_LINK)
                    .with_href(href)
                    .with_layout(LayoutSpec::sized(100.0, 30.0)),
            )
            .unwrap()
        })
        .collect();

    let home = section(&mut doc, "home", 800.0);
    let hero = doc.append(home, Element::new(Tag::Div).with_class(ClassList::HERO_TEXT)).unwrap();
    let heading = doc.append(hero, Element::new(Tag::H1).with_text("Bergabung")).unwrap();

    let about = section(&mut doc, "about", 600.0);
    let row = doc.append(about, Element::new(Tag::Div).with_layout(LayoutSpec::row(20.0))).unwrap();
    let cards = (0..3)
        .map(|_| {
            doc.append(
                row,
                Element::new(Tag::Div)
                    .with_class(ClassList::BENEFIT_CARD)
                    .with_layout(LayoutSpec::sized(300.0, 200.0)),
            )
            .unwrap()
        })
        .collect();

    let stats = section(&mut doc, "stats", 600.0);
    let counter = counter_block(&mut doc, stats, "1500+");
    let broken_counter = counter_block(&mut doc, stats, "abc");

    let contact = section(&mut doc, "contact", 1000.0);
    let button = doc
        .append(
            contact,
            Element::new(Tag::Button)
                .with_class(ClassList::BTN)
                .with_text("Daftar")
                .with_layout(LayoutSpec::sized(200.0, 50.0)),
        )
        .unwrap();
    let lazy_image = doc
        .append(
            contact,
            Element::new(Tag::Img)
                .with_attr("loading", "lazy")
                .with_attr("data-src", "/img/komunitas.webp")
                .with_layout(LayoutSpec::sized(300.0, 200.0)),
        )
        .unwrap();
    let unsized_image = doc.append(contact, Element::new(Tag::Img).with_attr("src", "/img/logo.png")).unwrap();

    let footer = doc.append(body, Element::new(Tag::Div).with_layout(LayoutSpec::block(100.0))).unwrap();
    let year = doc.append(footer, Element::new(Tag::Span).with_id("year").with_text("2024")).unwrap();

    let fixture = Fixture {
        hamburger,
        menu,
        links,
        home,
        heading,
        about,
        cards,
        stats,
        counter,
        broken_counter,
        contact,
        button,
        lazy_image,
        unsized_image,
        year,
    };
    (doc, fixture)
}

fn section(doc: &mut Document, id: &str, height: f32) -> ElementId {
    let body = doc.body();
    doc.append(body, Element::new(Tag::Section).with_id(id).with_layout(LayoutSpec::block(height)))
        .unwrap()
}

/// Counter container with its value span; returns the span.
fn counter_block(doc: &mut Document, parent: ElementId, value: &str) -> ElementId {
    let container = doc
        .append(parent, Element::new(Tag::Div).with_class(ClassList::COUNTER).with_layout(LayoutSpec::block(100.0)))
        .unwrap();
    doc.append(container, Element::new(Tag::Span).with_text(value).with_layout(LayoutSpec::sized(100.0, 40.0)))
        .unwrap()
}

/// What the mock host was asked to do.
#[derive(Debug, Default)]
pub struct HostLog {
    pub fonts: Vec<String>,
    pub service_workers: Vec<String>,
}

/// Host with every capability, recording calls into a shared log.
#[derive(Clone)]
pub struct MockHost {
    pub year: i32,
    pub fail_font: Option<String>,
    pub fail_service_worker: bool,
    pub log: Rc<RefCell<HostLog>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            year: 2031,
            fail_font: None,
            fail_service_worker: false,
            log: Rc::new(RefCell::new(HostLog::default())),
        }
    }
}

impl Host for MockHost {
    fn current_year(&self) -> i32 {
        self.year
    }

    fn supports_fonts(&self) -> bool {
        true
    }

    fn load_font(&mut self, descriptor: &str) -> Result<()> {
        self.log.borrow_mut().fonts.push(descriptor.to_string());
        if self.fail_font.as_deref() == Some(descriptor) {
            return Err(PageError::FontLoad {
                descriptor: descriptor.to_string(),
                reason: "404".to_string(),
            });
        }
        Ok(())
    }

    fn supports_service_worker(&self) -> bool {
        true
    }

    fn register_service_worker(&mut self, script: &str) -> Result<String> {
        self.log.borrow_mut().service_workers.push(script.to_string());
        if self.fail_service_worker {
            return Err(PageError::ServiceWorker("registration rejected".to_string()));
        }
        Ok("/".to_string())
    }

    fn supports_web_vitals(&self) -> bool {
        true
    }

    fn web_vital(&self, metric: VitalMetric) -> Option<f64> {
        match metric {
            VitalMetric::Cls => Some(0.02),
            VitalMetric::Fid => Some(12.0),
            VitalMetric::Fcp => Some(900.0),
            VitalMetric::Lcp => Some(1800.0),
            VitalMetric::Ttfb => Some(120.0),
        }
    }
}

/// Mounted landing page with the standard components and a mock host.
pub fn setup() -> (Page, PageHandles, Fixture, MockHost) {
    setup_with_host(MockHost::new())
}

pub fn setup_with_host(host: MockHost) -> (Page, PageHandles, Fixture, MockHost) {
    let (doc, fixture) = landing_page();
    let mut page = Page::new(doc, PageConfig::default())
        .with_host(host.clone())
        .with_viewport(VIEWPORT.0, VIEWPORT.1);
    let handles = page.install_standard_components();
    page.mount().unwrap();
    (page, handles, fixture, host)
}

pub fn text(page: &Page, id: ElementId) -> String {
    page.document().text(id).unwrap_or_default().to_string()
}
