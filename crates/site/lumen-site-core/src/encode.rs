//! Percent-encoding with the browser's `encodeURIComponent` rules, used
//! for mailto links and inline SVG data URIs.

/// Encode `input` for use in a URI component. ASCII alphanumerics and
/// `-_.!~*'()` stay literal; everything else becomes `%XX` per UTF-8
/// byte.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push_str(&format!("{:02X}", byte));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(percent_encode("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("x@y:z"), "x%40y%3Az");
        assert_eq!(percent_encode("line\nbreak"), "line%0Abreak");
        assert_eq!(percent_encode("#"), "%23");
    }

    #[test]
    fn multibyte_input_encodes_per_byte() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }
}
