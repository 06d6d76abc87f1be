/// Expands a peer API template: `{r}` becomes the resource id, `{q}`
/// the query, both percent-encoded.
#[must_use]
pub fn expand_template(template: &str, resource_id: &str, query: &str) -> String {
    template
        .replace("{r}", &encode_component(resource_id))
        .replace("{q}", &encode_component(query))
}

/// Percent-encodes everything outside the URL-unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_both_placeholders() {
        let url = expand_template("http://peer.org/{r}?q={q}", "wiki", "federated search");
        assert_eq!(url, "http://peer.org/wiki?q=federated%20search");
    }

    #[test]
    fn test_expand_without_resource_placeholder() {
        let url = expand_template("http://peer.org/search?q={q}", "ignored", "rust");
        assert_eq!(url, "http://peer.org/search?q=rust");
    }

    #[test]
    fn test_encode_reserved_characters() {
        let url = expand_template("http://peer.org/{r}?q={q}", "a/b", "x&y=z");
        assert_eq!(url, "http://peer.org/a%2Fb?q=x%26y%3Dz");
    }
}
