use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::{Catalog, CatalogError, Melon, Price};

/// Stock shipped with the binary, used when no catalog file is configured.
const DEFAULT_STOCK: &str = "\
# id|melon_type|common_name|price|image_url|color|seedless
musk|Muskmelon|Musk Melon|5.00|/static/img/musk.jpg|green|0
hdew|Honeydew|Honeydew|3.50|/static/img/honeydew.jpg|pale green|0
cren|Crenshaw|Crenshaw|2.00|/static/img/crenshaw.jpg|yellow|0
cant|Cantaloupe|Cantaloupe|2.50|/static/img/cantaloupe.jpg|orange|0
casa|Casaba|Casaba|3.00|/static/img/casaba.jpg|white|0
yell|Watermelon|Yellow Watermelon|3.25|/static/img/yellow-watermelon.jpg|yellow|1
sugb|Watermelon|Sugar Baby Watermelon|4.50|/static/img/sugar-baby.jpg|red|1
";

/// Catalog repository trait for read-only melon lookups
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Melon>, CatalogError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Melon>, CatalogError>;
    async fn count(&self) -> Result<usize, CatalogError>;
}

/// Catalog held in memory for the life of the process
pub struct InMemoryCatalogRepository {
    catalog: Arc<Catalog>,
}

impl InMemoryCatalogRepository {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn with_default_stock() -> Result<Self, CatalogError> {
        Ok(Self::new(parse_catalog(DEFAULT_STOCK)?))
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = parse_catalog(&contents)?;
        if catalog.is_empty() {
            warn!("Catalog file {} lists no melons", path.display());
        } else {
            info!("Loaded {} melons from {}", catalog.len(), path.display());
        }
        Ok(Self::new(catalog))
    }

    /// Shared handle for callers that render carts against this catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn find_all(&self) -> Result<Vec<Melon>, CatalogError> {
        Ok(self.catalog.list_all().to_vec())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Melon>, CatalogError> {
        match self.catalog.get_by_id(id) {
            Ok(melon) => Ok(Some(melon.clone())),
            Err(CatalogError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.catalog.len())
    }
}

/// Parse pipe-delimited catalog text:
/// `id|melon_type|common_name|price|image_url|color|seedless`.
///
/// Blank lines and `#` comments are skipped. Errors carry the 1-based line number.
pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let mut melons = Vec::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        melons.push(parse_line(line, index + 1)?);
    }

    debug!("Parsed {} catalog records", melons.len());
    Catalog::new(melons)
}

fn parse_line(line: &str, line_number: usize) -> Result<Melon, CatalogError> {
    let parse_error = |message: String| CatalogError::Parse {
        line: line_number,
        message,
    };

    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() != 7 {
        return Err(parse_error(format!("expected 7 fields, found {}", fields.len())));
    }

    let price: Price = fields[3]
        .parse()
        .map_err(|e| parse_error(format!("{}", e)))?;

    let seedless = match fields[6].to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" | "" => false,
        other => return Err(parse_error(format!("invalid seedless flag '{}'", other))),
    };

    Ok(Melon::new(fields[0], fields[1], fields[2], price)
        .with_image_url(fields[4])
        .with_color(fields[5])
        .with_seedless(seedless))
}
