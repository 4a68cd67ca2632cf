use url::form_urlencoded;

/// Percent-encode a value the way the signature algorithm expects (RFC 3986).
///
/// Starts from `application/x-www-form-urlencoded` serialization and then fixes up the three
/// places where it differs: space (`+` → `%20`), asterisk (`*` → `%2A`) and tilde
/// (`%7E` → `~`). A literal `+` in the input is already `%2B` at that point.
pub fn percent_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

#[cfg(test)]
mod tests {
    use super::percent_encode;

    #[test]
    fn fixups_for_space_asterisk_and_tilde() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(percent_encode("~"), "~");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(percent_encode("AZaz09-_."), "AZaz09-_.");
        assert_eq!(percent_encode(""), "");
    }

    #[test]
    fn reserved_characters_are_escaped_uppercase() {
        assert_eq!(percent_encode("&=+%/"), "%26%3D%2B%25%2F");
        assert_eq!(percent_encode("a b*c~d"), "a%20b%2Ac~d");
        assert_eq!(percent_encode("%7E"), "%257E");
    }

    #[test]
    fn non_ascii_is_utf8_escaped() {
        assert_eq!(percent_encode("短信"), "%E7%9F%AD%E4%BF%A1");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }
}
