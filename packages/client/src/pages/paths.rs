//! In-app locations. These are the router's paths, built as strings so they
//! can be stored as the article referrer and compared later.

pub const HOME: &str = "/";
pub const AUTH: &str = "/auth";
pub const SESSION_TIMEOUT: &str = "/session-timeout";
pub const BOOKMARKS: &str = "/bookmarks";
pub const YOUR_ARTICLES: &str = "/your-articles";
pub const CREATE: &str = "/create";
pub const PROFILE: &str = "/profile";
pub const TRENDING_TAG: &str = "/trending";
pub const TRENDING_AUTHOR: &str = "/author";
pub const SEARCH: &str = "/search";
pub const VIEW: &str = "/view";
pub const EDIT: &str = "/edit";

pub fn view(article_id: i64) -> String {
    format!("{VIEW}?article_id={article_id}")
}

pub fn edit(article_id: i64) -> String {
    format!("{EDIT}?id={article_id}")
}

pub fn trending_tag(tag_id: i64) -> String {
    format!("{TRENDING_TAG}?tag_id={tag_id}")
}

pub fn trending_author(author_id: i64) -> String {
    format!("{TRENDING_AUTHOR}?author_id={author_id}")
}

pub fn search(query: &str) -> String {
    format!("{SEARCH}?q={}", encode_component(query))
}

/// Percent-encode a query value.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// The path part of a location, without query string.
pub fn route_of(location: &str) -> &str {
    location.split('?').next().unwrap_or(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query_locations() {
        assert_eq!(view(12), "/view?article_id=12");
        assert_eq!(edit(3), "/edit?id=3");
        assert_eq!(trending_tag(4), "/trending?tag_id=4");
        assert_eq!(search("rust & wasm"), "/search?q=rust%20%26%20wasm");
        assert_eq!(route_of("/author?author_id=9"), TRENDING_AUTHOR);
    }
}
