use seabattle::{format_position, parse_position, ParseError};

#[test]
fn test_parse_numbers() {
    assert_eq!(parse_position("10 10", 10).unwrap(), (10, 10));
    assert_eq!(parse_position("1 10", 10).unwrap(), (1, 10));
    assert_eq!(parse_position("10 1", 10).unwrap(), (10, 1));
    assert_eq!(parse_position("1 2", 10).unwrap(), (1, 2));
    assert_eq!(parse_position("8 4", 10).unwrap(), (8, 4));
    assert_eq!(parse_position("  8   4 ", 10).unwrap(), (8, 4));
}

#[test]
fn test_parse_words_and_letters() {
    assert_eq!(parse_position("eight four", 10).unwrap(), (8, 4));
    assert_eq!(parse_position("Ten One", 10).unwrap(), (10, 1));
    assert_eq!(parse_position("a1", 10).unwrap(), (1, 1));
    assert_eq!(parse_position("J10", 10).unwrap(), (10, 10));
    assert_eq!(parse_position("a 10", 10).unwrap(), (1, 10));
    assert_eq!(parse_position("c five", 10).unwrap(), (3, 5));
}

#[test]
fn test_parse_misheard_words() {
    assert_eq!(parse_position("tree for", 10).unwrap(), (3, 4));
    assert_eq!(parse_position("won too", 10).unwrap(), (1, 2));
    assert_eq!(parse_position("ate to", 10).unwrap(), (8, 2));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        parse_position("1", 10).unwrap_err(),
        ParseError::Unrecognized("1".to_string())
    );
    assert_eq!(
        parse_position("fire at will", 10).unwrap_err(),
        ParseError::Unrecognized("fire at will".to_string())
    );
    assert_eq!(
        parse_position("k 1", 10).unwrap_err(),
        ParseError::InvalidX("k".to_string())
    );
    assert_eq!(
        parse_position("1 b", 10).unwrap_err(),
        ParseError::InvalidY("b".to_string())
    );
    assert_eq!(
        parse_position("11 1", 10).unwrap_err(),
        ParseError::OutOfRange {
            x: 11,
            y: 1,
            size: 10
        }
    );
    assert_eq!(
        parse_position("0 3", 10).unwrap_err(),
        ParseError::OutOfRange {
            x: 0,
            y: 3,
            size: 10
        }
    );
    assert!(matches!(
        parse_position("f 6", 5).unwrap_err(),
        ParseError::OutOfRange { .. }
    ));
}

#[test]
fn test_format_position() {
    assert_eq!(format_position((6, 5), true), "6, 5");
    assert_eq!(format_position((1, 1), false), "a, 1");
    assert_eq!(format_position((10, 3), false), "j, 3");
}

#[test]
fn test_format_then_parse() {
    for x in 1..=10 {
        for y in 1..=10 {
            let letters = format_position((x, y), false).replace(',', "");
            assert_eq!(parse_position(&letters, 10).unwrap(), (x, y));
        }
    }
}
