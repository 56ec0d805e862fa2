/// Column holding the executive order number; the only column a table must have.
pub const ID_COLUMN: &str = "executive_order_number";

/// One decoded source row. Missing columns decode as empty text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    pub executive_order_number: String,
    pub title: String,
    pub signing_date: String,
    pub publication_date: String,
    pub citation: String,
    pub html_url: String,
    pub pdf_url: String,
    /// Free-text notes, one relationship clause per line.
    pub disposition_notes: String,
}
