use super::*;
use crate::{
    foundation::core::Viewport,
    page::model::{ElementSpec, Page, PageSpec},
};

fn page() -> Page {
    Page::from_spec(PageSpec {
        viewport: Viewport::new(1280.0, 800.0).unwrap(),
        scroll_y: 0.0,
        elements: vec![
            ElementSpec::block("intro", 0.0, 800.0)
                .attr("data-bg", "#111")
                .flag("data-bg-dark"),
            ElementSpec::block("title", 100.0, 80.0).flag("data-animate"),
            ElementSpec::block("loop", 300.0, 80.0)
                .flag("data-animate")
                .flag("data-animate-repeat"),
            ElementSpec::block("tile", 500.0, 80.0)
                .flag("data-animate")
                .class("tableau-item"),
            ElementSpec::block("plain", 600.0, 80.0).class("tableau-item"),
            ElementSpec::block("blank", 800.0, 800.0).flag("data-bg"),
        ],
    })
    .unwrap()
}

#[test]
fn animatables_are_discovered_in_order_with_repeat_semantics() {
    let page = page();
    let found = discover_animatables(&page, &Markers::default());
    let summary: Vec<_> = found
        .iter()
        .map(|a| (page.key(a.id).unwrap(), a.config.repeatable))
        .collect();
    assert_eq!(
        summary,
        vec![("title", false), ("loop", true), ("tile", true)]
    );
}

#[test]
fn sections_read_color_and_dark_flag() {
    let page = page();
    let sections = discover_sections(&page, &Markers::default());
    assert_eq!(sections.len(), 2);
    assert_eq!(
        sections[0].config,
        SectionConfig {
            color: "#111".to_string(),
            is_dark: true
        }
    );
    assert_eq!(sections[1].config.color, "");
    assert!(!sections[1].config.is_dark);
}

#[test]
fn custom_markers_are_honoured() {
    let page = page();
    let markers = Markers {
        repeat_class: "never-used".to_string(),
        ..Markers::default()
    };
    let tile = page.element("tile").unwrap();
    assert!(!reveal_config(&page, tile, &markers).repeatable);
}

#[test]
fn markers_validate_rejects_blank_and_spaced_names() {
    assert!(Markers::default().validate().is_ok());
    let blank = Markers {
        animate: String::new(),
        ..Markers::default()
    };
    assert!(blank.validate().is_err());
    let spaced = Markers {
        visible_class: "is visible".to_string(),
        ..Markers::default()
    };
    assert!(spaced.validate().is_err());
}
