//! Result items and the preview cards drawn for them

use serde::Serialize;

/// One search hit, projected from a catalog record.
///
/// Only `id` is guaranteed. Every other field may be missing in the
/// catalog's response and stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    /// Stable key for list rendering
    pub id: String,
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
    pub preview_link: Option<String>,
}

impl ResultItem {
    /// An item with nothing but a key
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            authors: None,
            thumbnail_url: None,
            preview_link: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = Some(authors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_preview_link(mut self, url: impl Into<String>) -> Self {
        self.preview_link = Some(url.into());
        self
    }
}

/// What a card shows for one [`ResultItem`].
///
/// Blank strings count as missing: a card never links to an empty URL
/// and never draws an image without a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard<'a> {
    pub key: &'a str,
    pub title: Option<&'a str>,
    /// Authors joined with ", "
    pub authors: Option<String>,
    pub thumbnail_url: Option<&'a str>,
    pub preview_link: Option<&'a str>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl<'a> From<&'a ResultItem> for PreviewCard<'a> {
    fn from(item: &'a ResultItem) -> Self {
        let authors = item.authors.as_ref().and_then(|names| {
            let names: Vec<&str> = names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        });

        Self {
            key: &item.id,
            title: present(&item.title),
            authors,
            thumbnail_url: present(&item.thumbnail_url),
            preview_link: present(&item.preview_link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_fills_every_field() {
        let item = ResultItem::new("zyTCAlFPjgYC")
            .with_title("The Google Story")
            .with_authors(["David A. Vise", "Mark Malseed"])
            .with_thumbnail("http://books.google.com/thumb.jpg")
            .with_preview_link("http://books.google.com/preview");

        let card = PreviewCard::from(&item);
        assert_eq!(card.key, "zyTCAlFPjgYC");
        assert_eq!(card.title, Some("The Google Story"));
        assert_eq!(card.authors.as_deref(), Some("David A. Vise, Mark Malseed"));
        assert_eq!(card.thumbnail_url, Some("http://books.google.com/thumb.jpg"));
        assert_eq!(card.preview_link, Some("http://books.google.com/preview"));
    }

    #[test]
    fn missing_fields_are_omitted() {
        let item = ResultItem::new("abc").with_title("Only a title");
        let card = PreviewCard::from(&item);
        assert_eq!(card.title, Some("Only a title"));
        assert!(card.authors.is_none());
        assert!(card.thumbnail_url.is_none());
        assert!(card.preview_link.is_none());
    }

    #[test]
    fn bare_item_still_has_a_key() {
        let item = ResultItem::new("k");
        let card = PreviewCard::from(&item);
        assert_eq!(card.key, "k");
        assert!(card.title.is_none());
    }

    #[test]
    fn blank_values_count_as_missing() {
        let item = ResultItem::new("k")
            .with_title("  ")
            .with_authors(["", " "])
            .with_thumbnail("")
            .with_preview_link(" ");
        let card = PreviewCard::from(&item);
        assert!(card.title.is_none());
        assert!(card.authors.is_none());
        assert!(card.thumbnail_url.is_none());
        assert!(card.preview_link.is_none());
    }
}
