use css_events::{Event, EventLog, Parser, ParserOptions};

fn events(input: &str) -> Vec<Event> {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet(input, &mut log).unwrap();
    log.events().to_vec()
}

#[test]
fn charset_then_rule() {
    let evs = events(r#"@charset "utf-8"; p { }"#);
    assert!(matches!(&evs[1], Event::Charset { charset } if charset == "utf-8"));
    assert!(matches!(&evs[2], Event::StartRule { selectors } if selectors.len() == 1));
    assert!(matches!(evs[3], Event::EndRule { .. }));
}

#[test]
fn import_carries_uri_and_media_list() {
    let evs = events(r#"@import url("foo.css") screen, print;"#);
    match &evs[1] {
        Event::Import { uri, media } => {
            assert_eq!(uri, "foo.css");
            assert_eq!(media.len(), 2);
            assert_eq!(media[0].media_type.as_deref(), Some("screen"));
            assert_eq!(media[1].media_type.as_deref(), Some("print"));
        }
        other => panic!("expected an import event, got {other:?}"),
    }
}

#[test]
fn import_with_bare_string_uri() {
    let evs = events(r#"@import "foo.css";"#);
    match &evs[1] {
        Event::Import { uri, media } => {
            assert_eq!(uri, "foo.css");
            assert!(media.is_empty());
        }
        other => panic!("expected an import event, got {other:?}"),
    }
}

#[test]
fn namespace_with_and_without_prefix() {
    let evs = events(r#"@namespace svg url(http://www.w3.org/2000/svg); @namespace "http://default";"#);
    match &evs[1] {
        Event::Namespace { prefix, uri } => {
            assert_eq!(prefix.as_deref(), Some("svg"));
            assert_eq!(uri, "http://www.w3.org/2000/svg");
        }
        other => panic!("expected a namespace event, got {other:?}"),
    }
    match &evs[2] {
        Event::Namespace { prefix, uri } => {
            assert!(prefix.is_none());
            assert_eq!(uri, "http://default");
        }
        other => panic!("expected a namespace event, got {other:?}"),
    }
}
