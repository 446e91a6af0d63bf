use super::*;

#[test]
fn shorthand_expands_like_css() {
    let one = RootMargin::parse("10px").unwrap();
    assert_eq!(one.left, MarginLength::Px(10.0));

    let two = RootMargin::parse("-35% 0px").unwrap();
    assert_eq!(two.top, MarginLength::Percent(-35.0));
    assert_eq!(two.bottom, MarginLength::Percent(-35.0));
    assert_eq!(two.right, MarginLength::Px(0.0));

    let three = RootMargin::parse("1px 2px 3px").unwrap();
    assert_eq!(three.left, MarginLength::Px(2.0));
    assert_eq!(three.bottom, MarginLength::Px(3.0));

    let four = RootMargin::parse("50px 0px -20px 0").unwrap();
    assert_eq!(four.top, MarginLength::Px(50.0));
    assert_eq!(four.bottom, MarginLength::Px(-20.0));
    assert_eq!(four.left, MarginLength::Px(0.0));
}

#[test]
fn rejects_bad_values() {
    for bad in ["", "1px 2px 3px 4px 5px", "10em", "px", "abc%", "NaN%", "5"] {
        assert!(RootMargin::parse(bad).is_err(), "'{bad}' should fail");
    }
}

#[test]
fn apply_grows_and_shrinks_root() {
    let root = Rect::new(0.0, 0.0, 1000.0, 800.0);

    let reveal = RootMargin::parse("50px 0px -20px 0px").unwrap();
    assert_eq!(reveal.apply(root), Rect::new(0.0, -50.0, 1000.0, 780.0));

    let band = RootMargin::parse("-35% 0px -35% 0px").unwrap();
    assert_eq!(band.apply(root), Rect::new(0.0, 280.0, 1000.0, 520.0));

    let horizontal = RootMargin::parse("0px 10%").unwrap();
    assert_eq!(horizontal.apply(root), Rect::new(-100.0, 0.0, 1100.0, 800.0));
}

#[test]
fn display_and_serde_use_css_text() {
    let m = RootMargin::parse("-35% 0px -35% 0px").unwrap();
    assert_eq!(m.to_string(), "-35% 0px -35% 0px");

    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, "\"-35% 0px -35% 0px\"");
    let back: RootMargin = serde_json::from_str("\"50px 0px -20px 0px\"").unwrap();
    assert_eq!(back.top, MarginLength::Px(50.0));
    assert!(serde_json::from_str::<RootMargin>("\"wide\"").is_err());
}
