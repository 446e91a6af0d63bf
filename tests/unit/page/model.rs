use super::*;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 800.0).unwrap()
}

fn sample() -> Page {
    Page::from_spec(PageSpec {
        viewport: viewport(),
        scroll_y: 0.0,
        elements: vec![
            ElementSpec::block("hero", 0.0, 800.0).attr("data-bg", "#111"),
            ElementSpec::block("card", 900.0, 300.0)
                .flag("data-animate")
                .class("tableau-item"),
            ElementSpec::block("footer", 1200.0, 800.0).attr("data-bg", "#fff"),
        ],
    })
    .unwrap()
}

#[test]
fn ids_follow_document_order() {
    let page = sample();
    assert_eq!(page.element("hero"), Some(ElementId(0)));
    assert_eq!(page.element("footer"), Some(ElementId(2)));
    assert_eq!(page.key(ElementId(1)), Some("card"));
    assert_eq!(
        page.query_attribute("data-bg"),
        vec![ElementId(0), ElementId(2)]
    );
}

#[test]
fn client_rect_tracks_scroll_and_scroll_is_clamped() {
    let mut page = sample();
    page.scroll_to(500.0);
    assert_eq!(
        page.bounding_client_rect(ElementId(1)),
        Some(Rect::new(0.0, 400.0, 1280.0, 700.0))
    );

    page.scroll_to(10_000.0);
    assert_eq!(page.scroll_y(), 2000.0 - 800.0);
    page.scroll_to(-40.0);
    assert_eq!(page.scroll_y(), 0.0);
}

#[test]
fn class_writes_are_logged_only_on_change() {
    let mut page = sample();
    let card = page.element("card").unwrap();
    assert!(page.has_class(card, "tableau-item"));

    assert!(page.set_class(card, "is-visible", true));
    assert!(!page.set_class(card, "is-visible", true));
    assert!(page.set_class(card, "is-visible", false));
    assert_eq!(page.take_mutations().len(), 2);
    assert!(page.mutations().is_empty());
}

#[test]
fn body_attribute_removal_of_absent_attribute_is_silent() {
    let mut page = sample();
    page.set_body_attribute("data-theme", None);
    assert!(page.mutations().is_empty());

    page.set_body_style("background-color", "#111");
    page.set_body_attribute("data-theme", Some("dark"));
    page.set_body_attribute("data-theme", None);
    assert_eq!(
        page.body().style.get("background-color").map(String::as_str),
        Some("#111")
    );
    assert!(page.body().attributes.is_empty());
    assert_eq!(page.mutations().len(), 3);
}

#[test]
fn invalid_fixtures_are_rejected() {
    let dup = Page::from_spec(PageSpec {
        viewport: viewport(),
        scroll_y: 0.0,
        elements: vec![
            ElementSpec::block("a", 0.0, 10.0),
            ElementSpec::block("a", 10.0, 10.0),
        ],
    });
    assert!(matches!(dup, Err(ScrollFxError::Markup(_))));

    let flipped = Page::from_spec(PageSpec {
        viewport: viewport(),
        scroll_y: 0.0,
        elements: vec![ElementSpec::new("a", Rect::new(0.0, 50.0, 10.0, 10.0))],
    });
    assert!(matches!(flipped, Err(ScrollFxError::Markup(_))));
}

#[test]
fn parses_json_fixture() {
    let page = Page::from_json_str(
        r##"{
            "viewport": { "width": 400, "height": 300 },
            "scroll_y": 120,
            "elements": [
                { "key": "s0", "rect": { "x0": 0, "y0": 0, "x1": 400, "y1": 900 },
                  "attributes": { "data-bg": "#222", "data-bg-dark": "" } }
            ]
        }"##,
    )
    .unwrap();
    let s0 = page.element("s0").unwrap();
    assert_eq!(page.attribute(s0, "data-bg"), Some("#222"));
    assert!(page.has_attribute(s0, "data-bg-dark"));
    assert_eq!(page.scroll_y(), 120.0);
}
