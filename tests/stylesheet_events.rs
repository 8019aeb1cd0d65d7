use pretty_assertions::assert_eq;

use css_events::{Event, EventLog, Parser, ParserOptions};

fn events(input: &str) -> Vec<Event> {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet(input, &mut log).unwrap();
    log.events().to_vec()
}

#[test]
fn simple_rule_emits_paired_events_in_order() {
    let evs = events("a { color: red; }");
    assert!(matches!(evs[0], Event::StartStylesheet));
    assert!(matches!(&evs[1], Event::StartRule { selectors } if selectors.len() == 1));
    match &evs[2] {
        Event::Property {
            property,
            value,
            important,
        } => {
            assert_eq!(property.name, "color");
            assert!(!important);
            assert_eq!(value.parts.len(), 1);
        }
        other => panic!("expected a property event, got {other:?}"),
    }
    assert!(matches!(evs[3], Event::EndRule { .. }));
    assert!(matches!(evs[4], Event::EndStylesheet));
    assert_eq!(evs.len(), 5);
}

#[test]
fn empty_input_yields_only_the_stylesheet_pair() {
    let evs = events("");
    assert_eq!(evs.len(), 2);
    assert!(matches!(evs[0], Event::StartStylesheet));
    assert!(matches!(evs[1], Event::EndStylesheet));
}

#[test]
fn comment_only_input_yields_only_the_stylesheet_pair() {
    let evs = events("/* just a comment, nothing else */");
    assert_eq!(evs.len(), 2);
    assert!(matches!(evs[0], Event::StartStylesheet));
    assert!(matches!(evs[1], Event::EndStylesheet));
}

#[test]
fn mid_declaration_truncation_is_fatal() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    let result = parser.parse_stylesheet("a { color:", &mut log);
    assert!(result.is_err());
}

#[test]
fn every_start_event_has_a_matching_end_event() {
    let evs = events(
        "@media screen { a { color: red } } @page { @top-left { content: \"x\" } } @font-face { font-family: x }",
    );
    let mut depth = 0i32;
    for ev in &evs {
        match ev {
            Event::StartStylesheet
            | Event::StartMedia { .. }
            | Event::StartPage { .. }
            | Event::StartPageMargin { .. }
            | Event::StartFontFace
            | Event::StartRule { .. } => depth += 1,
            Event::EndStylesheet
            | Event::EndMedia { .. }
            | Event::EndPage { .. }
            | Event::EndPageMargin { .. }
            | Event::EndFontFace
            | Event::EndRule { .. } => depth -= 1,
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}
