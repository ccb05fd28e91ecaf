use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;

/// Attribute-based selector for one markup fragment on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `tag` whose `class` attribute contains every listed class token.
    Class {
        tag: &'static str,
        classes: &'static [&'static str],
    },
    /// `tag` whose attribute `name` equals `value` exactly.
    Attr {
        tag: &'static str,
        name: &'static str,
        value: &'static str,
    },
}

impl Marker {
    pub const fn class(tag: &'static str, classes: &'static [&'static str]) -> Self {
        Self::Class { tag, classes }
    }

    pub const fn attr(tag: &'static str, name: &'static str, value: &'static str) -> Self {
        Self::Attr { tag, name, value }
    }

    pub fn css(&self) -> String {
        match self {
            Self::Class { tag, classes } => {
                let mut css = tag.to_string();
                for class in classes.iter() {
                    css.push('.');
                    css.push_str(class);
                }
                css
            }
            Self::Attr { tag, name, value } => format!("{}[{}=\"{}\"]", tag, name, value),
        }
    }

    pub fn selector(&self) -> Result<Selector> {
        let css = self.css();
        Selector::parse(&css).map_err(|e| ScrapeError::Selector {
            message: e.to_string(),
            selector: css.clone(),
        })
    }
}

/// Parsed listing page. Lookups follow document order.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw page bytes. Malformed markup is tolerated and invalid UTF-8
    /// sequences become U+FFFD; only an empty body is rejected.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ScrapeError::Parse {
                reason: "empty response body".to_string(),
            });
        }
        let text = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = text {
            tracing::warn!("Page is not valid UTF-8, invalid bytes were replaced");
        }
        Ok(Self::from_html(&text))
    }

    pub fn from_html(text: &str) -> Self {
        let html = Html::parse_document(text);
        if !html.errors.is_empty() {
            tracing::debug!("Markup had {} recoverable parse errors", html.errors.len());
        }
        Self { html }
    }

    pub fn find_all(&self, marker: &Marker) -> Result<Vec<ElementRef<'_>>> {
        let selector = marker.selector()?;
        Ok(self.html.select(&selector).collect())
    }

    pub fn find_first(&self, marker: &Marker) -> Result<Option<ElementRef<'_>>> {
        let selector = marker.selector()?;
        Ok(self.html.select(&selector).next())
    }

    pub fn find_last(&self, marker: &Marker) -> Result<Option<ElementRef<'_>>> {
        let selector = marker.selector()?;
        Ok(self.html.select(&selector).last())
    }
}

/// First descendant of `scope` carrying `marker`.
pub fn first_within<'a>(scope: ElementRef<'a>, marker: &Marker) -> Result<Option<ElementRef<'a>>> {
    let selector = marker.selector()?;
    Ok(scope.select(&selector).next())
}

/// Concatenated text of the element and its descendants, untrimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn attr_of<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: Marker = Marker::class("li", &["item"]);

    #[test]
    fn test_marker_css() {
        assert_eq!(
            Marker::class("div", &["show-more-content", "text-body"]).css(),
            "div.show-more-content.text-body"
        );
        assert_eq!(
            Marker::attr("span", "itemprop", "genre").css(),
            "span[itemprop=\"genre\"]"
        );
    }

    #[test]
    fn test_first_and_last_follow_document_order() {
        let doc = Document::from_html(
            r#"<ul><li class="item">one</li><li class="other">x</li><li class="item big">two</li></ul>"#,
        );
        assert_eq!(text_of(doc.find_first(&ITEM).unwrap().unwrap()), "one");
        assert_eq!(text_of(doc.find_last(&ITEM).unwrap().unwrap()), "two");
        assert_eq!(doc.find_all(&ITEM).unwrap().len(), 2);
    }

    #[test]
    fn test_first_within_is_scoped() {
        let doc = Document::from_html(
            r#"<li class="item">outside</li><div class="box"><li class="item">inside</li></div>"#,
        );
        let scope = doc
            .find_first(&Marker::class("div", &["box"]))
            .unwrap()
            .unwrap();
        let found = first_within(scope, &ITEM).unwrap().unwrap();
        assert_eq!(text_of(found), "inside");
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let doc = Document::parse(b"<div class=\"item\"><li class=\"item\">unclosed <b>bold").unwrap();
        let li = doc.find_first(&ITEM).unwrap().unwrap();
        assert_eq!(text_of(li), "unclosed bold");
    }

    #[test]
    fn test_text_of_keeps_whitespace_and_nested_text() {
        let doc = Document::from_html(r#"<li class="item">  a <em>b</em> c </li>"#);
        assert_eq!(text_of(doc.find_first(&ITEM).unwrap().unwrap()), "  a b c ");
    }

    #[test]
    fn test_attr_of() {
        let doc = Document::from_html(r#"<img class="shot" src="//x/a.png"><img class="shot">"#);
        let imgs = doc.find_all(&Marker::class("img", &["shot"])).unwrap();
        assert_eq!(attr_of(imgs[0], "src"), Some("//x/a.png"));
        assert_eq!(attr_of(imgs[1], "src"), None);
    }

    #[test]
    fn test_empty_body_is_parse_error() {
        assert!(matches!(Document::parse(b""), Err(ScrapeError::Parse { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let mut body = b"<li class=\"item\">caf".to_vec();
        body.push(0xff);
        body.extend_from_slice("</li><li class=\"item\">héllo ✓</li>".as_bytes());

        let doc = Document::parse(&body).unwrap();
        let items = doc.find_all(&ITEM).unwrap();
        assert_eq!(text_of(items[0]), "caf\u{FFFD}");
        assert_eq!(text_of(items[1]), "héllo ✓");
    }
}
