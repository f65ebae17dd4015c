//
//  trello-api
//  api/encoding.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! URL encoding rules expected by the Trello API.
//!
//! Query strings and form bodies use form-style encoding: every byte of the
//! UTF-8 input except ASCII alphanumerics and `-`, `_`, `.` becomes `%XX`
//! (uppercase hex) and a space becomes `+`. Path segments use RFC 3986
//! encoding, which additionally keeps `~` and encodes a space as `%20`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in query keys and values (space is handled separately).
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Characters escaped in a single path segment.
const PATH_SEGMENT: &AsciiSet = &FORM.remove(b'~');

/// Encodes one query key or value, form style.
pub fn encode_form_component(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Encodes ordered key/value pairs as `k1=v1&k2=v2`.
pub fn encode_query<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_form_component(key.as_ref()),
                encode_form_component(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Encodes a value for use as a single path segment.
pub fn encode_path_segment(input: &str) -> String {
    utf8_percent_encode(input, PATH_SEGMENT).to_string()
}

/// Appends an encoded query fragment to a target, choosing `?` or `&`.
pub fn append_query(target: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    target.push(if target.contains('?') { '&' } else { '?' });
    target.push_str(query);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_component_space_and_reserved() {
        assert_eq!(encode_form_component("a b"), "a+b");
        assert_eq!(encode_form_component("a+b"), "a%2Bb");
        assert_eq!(encode_form_component("x&y=z"), "x%26y%3Dz");
        assert_eq!(encode_form_component("*~"), "%2A%7E");
        assert_eq!(encode_form_component("safe-_.AZ09"), "safe-_.AZ09");
    }

    #[test]
    fn test_form_component_utf8() {
        assert_eq!(encode_form_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_encode_query_keeps_order() {
        let pairs = vec![("value", "red"), ("name", "My Label")];
        assert_eq!(encode_query(&pairs), "value=red&name=My+Label");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(encode_path_segment("5f1a~b c/d"), "5f1a~b%20c%2Fd");
    }

    #[test]
    fn test_append_query_separator() {
        let mut target = "1/cards".to_string();
        append_query(&mut target, "a=1");
        assert_eq!(target, "1/cards?a=1");
        append_query(&mut target, "b=2");
        assert_eq!(target, "1/cards?a=1&b=2");
        append_query(&mut target, "");
        assert_eq!(target, "1/cards?a=1&b=2");
    }
}
