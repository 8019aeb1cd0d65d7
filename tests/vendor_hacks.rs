use css_events::ast::Hack;
use css_events::{Event, EventLog, Parser, ParserOptions};

#[test]
fn star_and_underscore_hacks_are_recognized_together() {
    let options = ParserOptions::new().with_star_hack(true).with_underscore_hack(true);
    let parser = Parser::new(options);
    let mut log = EventLog::new();
    parser
        .parse_stylesheet("*.foo { _color: red; *color: blue }", &mut log)
        .unwrap();

    let properties: Vec<_> = log
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::Property { property, .. } => Some(property),
            _ => None,
        })
        .collect();

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].name, "color");
    assert_eq!(properties[0].hack, Some(Hack::Underscore));
    assert_eq!(properties[1].name, "color");
    assert_eq!(properties[1].hack, Some(Hack::Star));
}

#[test]
fn hacks_are_ignored_unless_enabled() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    // with star_hack disabled, the leading '*' is read as a universal type
    // selector, not a property-name hack marker, so this still parses fine
    // as a plain rule with an (unhacked) underscore-prefixed property name.
    parser.parse_stylesheet("a { _color: red }", &mut log).unwrap();
    match &log.events()[2] {
        Event::Property { property, .. } => {
            assert_eq!(property.name, "_color");
            assert!(property.hack.is_none());
        }
        other => panic!("expected a property event, got {other:?}"),
    }
}

#[test]
fn ie_filter_function_is_recognized_as_a_term_when_enabled() {
    let options = ParserOptions::new().with_ie_filters(true);
    let parser = Parser::new(options);
    let value = parser
        .parse_property_value("progid:DXImageTransform.Microsoft.Alpha(opacity=50)")
        .unwrap();
    assert_eq!(value.parts.len(), 1);
}
