//! Catalog link construction.

/// Base URL of the NCMA catalog site.
pub const CATALOG_BASE_URL: &str = "https://ncma.bigelow.org";

/// Anchor text of every generated link.
pub const LINK_LABEL: &str = "NCMA";

/// Position of the strain identifier within a record.
pub const ID_FIELD: usize = 0;

/// Position of the link column within a record.
pub const LINK_FIELD: usize = 9;

/// Smallest record that has both an identifier and a link column.
pub const MIN_FIELDS: usize = LINK_FIELD + 1;

/// Builds the anchor tag pointing at the catalog page of strain `id`.
///
/// The identifier is concatenated verbatim: no trimming, escaping or
/// URL-encoding is applied.
#[must_use]
pub fn catalog_link(id: &str) -> String {
    format!("<a href=\"{CATALOG_BASE_URL}/{id}\">{LINK_LABEL}</a>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_for_plain_id() {
        assert_eq!(
            catalog_link("id123"),
            r#"<a href="https://ncma.bigelow.org/id123">NCMA</a>"#
        );
    }

    #[test]
    fn link_keeps_special_characters() {
        assert_eq!(
            catalog_link(" CCMP 1/2&\"x\" "),
            r#"<a href="https://ncma.bigelow.org/ CCMP 1/2&"x" ">NCMA</a>"#
        );
    }

    #[test]
    fn link_for_empty_id() {
        assert_eq!(
            catalog_link(""),
            r#"<a href="https://ncma.bigelow.org/">NCMA</a>"#
        );
    }

    #[test]
    fn min_fields_covers_link_column() {
        assert_eq!(MIN_FIELDS, 10);
        assert!(ID_FIELD < MIN_FIELDS);
    }
}
