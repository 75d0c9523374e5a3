//! Import set definitions
//!
//! An import set ties one source query to the DocuWare index fields it fills.
//! Additional master-data tables become additional sets in [`import_sets`].

/// One unit of import work: a source query, the columns that identify a
/// record, and the mapping onto DocuWare field names.
#[derive(Debug, Clone, Copy)]
pub struct ImportSet {
    pub name: &'static str,
    pub query: &'static str,
    /// Columns whose values identify a record; together they form the cache key.
    pub key_columns: &'static [&'static str],
    /// (DocuWare field name, source column). A source that is not a column of
    /// the result set is sent verbatim as a constant.
    pub field_mapping: &'static [(&'static str, &'static str)],
}

const VENDORS: ImportSet = ImportSet {
    name: "vendors",
    query: "SELECT VendorNo, VendorName FROM Vendors",
    key_columns: &["VendorNo", "VendorName"],
    field_mapping: &[
        ("VENDOR_NUMBER", "VendorNo"),
        ("VENDOR_NAME", "VendorName"),
    ],
};

/// Every import set the `insert` workflow runs, in order.
pub fn import_sets() -> &'static [ImportSet] {
    &[VENDORS]
}
