#![cfg(test)]

use std::collections::HashSet;

use super::*;
use crate::collections::contiguous::error::{IndexOutOfBounds, InteriorNul};

#[test]
fn test_push_and_growth() {
    let mut text = Text::new();
    assert_eq!(text.cap(), 0);

    text.push_str("abc");
    assert_eq!(text, "abc");
    assert_eq!(text.cap(), 4, "Text should grow by doubling like its Buffer.");

    text.push('ß');
    text += "!";
    assert_eq!(text.as_str(), "abcß!");
    assert_eq!(text.len(), 6);
    assert_eq!(text.chars().count(), 5);
}

#[test]
fn test_pop_multibyte() {
    let mut text: Text = "añ🦀".chars().collect();

    assert_eq!(text.pop(), Some('🦀'));
    assert_eq!(text, "añ");
    assert_eq!(text.pop(), Some('ñ'));
    assert_eq!(text.pop(), Some('a'));
    assert_eq!(text.pop(), None);
    assert!(text.is_empty());
}

#[test]
fn test_byte_at() {
    let text = Text::from("hey");

    assert_eq!(text.byte_at(0), Ok(b'h'));
    assert_eq!(text.byte_at(2), Ok(b'y'));
    assert_eq!(text.byte_at(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
}

#[test]
fn test_nul_terminated() {
    let text = Text::from("name");
    let terminated = text.to_nul_terminated().unwrap();

    assert_eq!(terminated, [b'n', b'a', b'm', b'e', 0]);
    assert_eq!(terminated.cap(), 5);
    assert_eq!(text.len(), 4, "The Text itself shouldn't gain a terminator.");

    assert_eq!(Text::new().to_nul_terminated().unwrap(), [0]);
    assert_eq!(
        Text::from("ab\0cd").to_nul_terminated(),
        Err(InteriorNul { position: 2 })
    );
}

#[test]
fn test_concatenation_and_clone() {
    let greeting = Text::from("Hello");
    let full = greeting.clone() + ", " + "world";

    assert_eq!(greeting, "Hello", "Concatenating a clone shouldn't change the original.");
    assert_eq!(full, "Hello, world");
    assert_eq!(full.to_string(), "Hello, world");
    assert_eq!(format!("{full:?}"), "\"Hello, world\"");

    let mut parts = Text::from('>');
    parts.extend(["a", "b", "c"]);
    assert_eq!(parts, ">abc");
}

#[test]
fn test_ordering_and_lookup() {
    let mut names = [Text::from("bob"), Text::from("alice"), Text::from("carol")];
    names.sort();
    assert_eq!(names, [Text::from("alice"), Text::from("bob"), Text::from("carol")]);

    let set: HashSet<Text> = names.into_iter().collect();
    assert!(set.contains("bob"), "Text should be found by its str form.");
    assert!(!set.contains("dave"));
}

#[test]
fn test_clear() {
    let mut text = Text::from("temporary");
    text.clear();

    assert!(text.is_empty());
    assert_eq!(text.cap(), 0);
    text.push_str("again");
    assert_eq!(text.into_bytes(), *b"again");
}

#[test]
fn test_truncate() {
    let mut text = Text::from("añb");

    text.truncate(10);
    assert_eq!(text, "añb");

    text.truncate(3);
    assert_eq!(text, "añ");
    assert_eq!(text.cap(), 4, "Truncating shouldn't change the capacity.");

    text.truncate(0);
    assert!(text.is_empty());
}

#[test]
#[should_panic]
fn test_truncate_inside_char() {
    let mut text = Text::from("añ");
    text.truncate(2);
}

#[test]
fn test_find_from() {
    let text = Text::from("mars rover on mars");

    assert_eq!(text.find_from("mars", 0), Some(0));
    assert_eq!(text.find_from("mars", 1), Some(14));
    assert_eq!(text.find_from("mars", 15), None);
    assert_eq!(text.find_from("venus", 0), None);
    assert_eq!(text.find_from("", 5), Some(5));
    assert_eq!(text.find_from("", 100), None, "A start past the end should never match.");
    assert_eq!(Text::from("ab").find_from("abc", 0), None);
}

#[test]
fn test_front_and_text_operators() {
    assert_eq!(Text::from("éa").front(), Some('é'));
    assert_eq!(Text::new().front(), None);

    let mut rover = Text::from("Mars");
    let suffix = Text::from(" Rover");
    rover += &suffix;
    assert_eq!(rover, "Mars Rover");

    let joined = Text::from("a") + &Text::from("b");
    assert_eq!(joined, Text::from("ab"));
    assert_eq!(suffix, " Rover", "The right-hand side should be left as it was.");
}
