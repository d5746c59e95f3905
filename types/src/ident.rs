//! Three-level table identifiers

/// A destination table addressed as `catalog.schema.table`.
///
/// All three components are guaranteed non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentifier {
    catalog: String,
    schema: String,
    table: String,
}

impl TableIdentifier {
    /// Build an identifier from its three components.
    pub fn new(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let (catalog, schema, table) = (catalog.into(), schema.into(), table.into());
        if [&catalog, &schema, &table]
            .iter()
            .any(|part| part.trim().is_empty())
        {
            return Err(IdentifierError::EmptyPart(format!(
                "{catalog}.{schema}.{table}"
            )));
        }
        Ok(Self {
            catalog,
            schema,
            table,
        })
    }

    /// Parse a dotted `catalog.schema.table` name.
    ///
    /// ```
    /// use deltaload_types::TableIdentifier;
    ///
    /// let ident = TableIdentifier::parse("main.sales.orders").unwrap();
    /// assert_eq!(ident.catalog(), "main");
    /// assert_eq!(ident.schema(), "sales");
    /// assert_eq!(ident.table(), "orders");
    ///
    /// assert!(TableIdentifier::parse("sales.orders").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, IdentifierError> {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            [catalog, schema, table] => Self::new(*catalog, *schema, *table)
                .map_err(|_| IdentifierError::EmptyPart(name.to_string())),
            _ => Err(IdentifierError::WrongPartCount {
                name: name.to_string(),
                parts: parts.len(),
            }),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    #[inline]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl core::fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.catalog, self.schema, self.table)
    }
}

impl core::str::FromStr for TableIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error returned for a table name that is not a valid `catalog.schema.table`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error(
        "invalid table name '{name}': expected catalog.schema.table, got {parts} part(s)"
    )]
    WrongPartCount { name: String, parts: usize },

    #[error("invalid table name '{0}': catalog, schema and table must all be non-empty")]
    EmptyPart(String),
}

impl IdentifierError {
    /// The offending table name as supplied by the caller.
    pub fn name(&self) -> &str {
        match self {
            Self::WrongPartCount { name, .. } | Self::EmptyPart(name) => name,
        }
    }
}
