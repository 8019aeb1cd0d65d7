use pretty_assertions::assert_eq;

use css_events::ast::{ValueOperator, ValuePart};
use css_events::{Event, EventLog, Parser, ParserOptions};

#[test]
fn media_rule_wraps_its_rulesets_with_one_query() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet("@media screen and (max-width: 600px) { .x { a: 1 } }", &mut log)
        .unwrap();
    let evs = log.events();

    match &evs[1] {
        Event::StartMedia { media } => {
            assert_eq!(media.len(), 1);
            let query = &media[0];
            assert!(query.qualifier.is_none());
            assert_eq!(query.media_type.as_deref(), Some("screen"));
            assert_eq!(query.expressions.len(), 1);
            assert_eq!(query.expressions[0].feature, "max-width");
            let value = query.expressions[0].value.as_ref().expect("expression has a value");
            assert_eq!(value.parts.len(), 1);
        }
        other => panic!("expected a startmedia event, got {other:?}"),
    }
    assert!(matches!(&evs[2], Event::StartRule { .. }));
    assert!(matches!(&evs[4], Event::EndMedia { .. }));
}

#[test]
fn parse_media_query_standalone() {
    let parser = Parser::new(ParserOptions::new());
    let query = parser.parse_media_query("only screen and (min-width: 10px)").unwrap();
    assert!(matches!(query.qualifier, Some(css_events::ast::MediaQualifier::Only)));
    assert_eq!(query.media_type.as_deref(), Some("screen"));
    assert_eq!(query.expressions.len(), 1);
}

#[test]
fn media_query_list_with_multiple_comma_separated_queries() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet("@media screen, print and (color) { a { b: c } }", &mut log)
        .unwrap();
    match &log.events()[1] {
        Event::StartMedia { media } => assert_eq!(media.len(), 2),
        other => panic!("expected a startmedia event, got {other:?}"),
    }
}

#[test]
fn property_value_round_trips_through_a_fresh_parse() {
    let parser = Parser::new(ParserOptions::new());
    let value = parser.parse_property_value("1px solid red").unwrap();
    let mut rendered = String::new();
    for (i, part) in value.parts.iter().enumerate() {
        if i > 0 {
            rendered.push(' ');
        }
        match part {
            ValuePart::Term(_) => rendered.push_str("T"),
            ValuePart::Operator(ValueOperator::Slash) => rendered.push('/'),
            ValuePart::Operator(ValueOperator::Comma) => rendered.push(','),
        }
    }
    assert_eq!(rendered, "T T T");
}
