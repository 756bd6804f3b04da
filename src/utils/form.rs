//! `application/x-www-form-urlencoded` pair codec

use crate::limits::MAX_PAIRS;

/// Decode `&`-separated `key=value` pairs
///
/// Percent escapes are decoded, `+` becomes a space, empty segments are
/// skipped and a segment without `=` yields an empty value. Only the first
/// `MAX_PAIRS` pairs are returned.
pub fn decode_pairs(input: &str) -> impl Iterator<Item = (String, String)> + '_ {
    form_urlencoded::parse(input.as_bytes())
        .take(MAX_PAIRS)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
}

/// Encode pairs in order, spaces as `+`
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pairs() {
        let pairs: Vec<_> = decode_pairs("a=1&b=hello+world&c=%26%3D").collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "hello world".to_string()),
                ("c".to_string(), "&=".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_pairs_skips_empty_segments() {
        let pairs: Vec<_> = decode_pairs("&&a=1&&").collect();
        assert_eq!(pairs, vec![("a".to_string(), "1".to_string())]);
        assert_eq!(decode_pairs("").count(), 0);
        assert_eq!(decode_pairs("&&&").count(), 0);
    }

    #[test]
    fn test_decode_pairs_without_value() {
        let pairs: Vec<_> = decode_pairs("flag&x=").collect();
        assert_eq!(
            pairs,
            vec![
                ("flag".to_string(), String::new()),
                ("x".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_decode_pairs_is_bounded() {
        let input = (0..MAX_PAIRS + 50)
            .map(|i| format!("k{i}=v"))
            .collect::<Vec<_>>()
            .join("&");
        assert_eq!(decode_pairs(&input).count(), MAX_PAIRS);
    }

    #[test]
    fn test_encode_pairs() {
        let encoded = encode_pairs([("name", "Jane Doe"), ("url", "http://a.com/?x=1&y")]);
        assert_eq!(encoded, "name=Jane+Doe&url=http%3A%2F%2Fa.com%2F%3Fx%3D1%26y");
    }

    #[test]
    fn test_encode_then_decode_preserves_order() {
        let encoded = encode_pairs([("z", "1"), ("a", "2"), ("m", "3")]);
        let keys: Vec<_> = decode_pairs(&encoded).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
