//! Catalog records
//!
//! Supporting records read alongside artworks: artists, categories, banners, curated home page
//! collections and the store configuration document.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::{
    documents::{Document, DocumentError, FromDocument, collections, fields},
    pricing::{PricingError, parse_currency},
};

/// Currency used when the configuration document does not name one.
pub const DEFAULT_CURRENCY_CODE: &str = "INR";

/// Artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist id
    pub id: String,

    /// Display name
    pub name: String,

    /// Biography
    pub bio: String,

    /// Portrait URL
    pub image_url: Option<String>,

    /// Shown in the featured artists strip
    pub is_featured: bool,
}

impl FromDocument for Artist {
    const COLLECTION: &'static str = collections::ARTISTS;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        Ok(Self {
            id: document.id.clone(),
            name: fields::text(fields, "name"),
            bio: fields::first_text(fields, &["bio", "description"]),
            image_url: fields::optional_text(fields, "imageUrl")
                .or_else(|| fields::optional_text(fields, "image")),
            is_featured: fields::flag(fields, "isFeatured"),
        })
    }
}

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: String,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Tile image URL
    pub image_url: Option<String>,

    /// Rendered as a home page section
    pub is_section: bool,

    /// Visible in the storefront
    pub is_active: bool,

    /// Sort key, ascending
    pub display_order: f64,
}

impl FromDocument for Category {
    const COLLECTION: &'static str = collections::PRODUCT_CATEGORIES;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;
        let name = fields::text(fields, "name");
        let slug = fields::optional_text(fields, "slug").unwrap_or_else(|| slugify(&name));

        Ok(Self {
            id: document.id.clone(),
            name,
            slug,
            image_url: fields::optional_text(fields, "imageUrl")
                .or_else(|| fields::optional_text(fields, "image")),
            is_section: fields::flag(fields, "isSection"),
            is_active: fields::flag(fields, "isActive"),
            display_order: fields::ordinal(fields, "displayOrder"),
        })
    }
}

/// Home page hero banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    /// Banner id
    pub id: String,

    /// Headline
    pub title: String,

    /// Sub-headline
    pub subtitle: String,

    /// Background image URL
    pub image_url: String,

    /// Call to action target
    pub link: Option<String>,

    /// Shown in the carousel
    pub is_active: bool,

    /// Sort key, ascending
    pub display_order: f64,
}

impl FromDocument for Banner {
    const COLLECTION: &'static str = collections::BANNERS;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        Ok(Self {
            id: document.id.clone(),
            title: fields::text(fields, "title"),
            subtitle: fields::text(fields, "subtitle"),
            image_url: fields::first_text(fields, &["imageUrl", "image"]),
            link: fields::optional_text(fields, "link"),
            is_active: fields::flag(fields, "isActive"),
            display_order: fields::ordinal(fields, "displayOrder"),
        })
    }
}

/// Curated collection of artworks shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeCollection {
    /// Collection id
    pub id: String,

    /// Heading
    pub title: String,

    /// Member artwork ids, in display order
    pub product_ids: Vec<String>,

    /// Shown on the home page
    pub is_active: bool,

    /// Sort key, ascending
    pub display_order: f64,
}

impl FromDocument for HomeCollection {
    const COLLECTION: &'static str = collections::COLLECTIONS;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        Ok(Self {
            id: document.id.clone(),
            title: fields::first_text(fields, &["title", "name"]),
            product_ids: fields::strings(fields, "productIds"),
            is_active: fields::flag(fields, "isActive"),
            display_order: fields::ordinal(fields, "displayOrder"),
        })
    }
}

/// Store-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfiguration {
    /// ISO 4217 currency code prices are quoted in
    pub currency: String,

    /// Discount offered by the sign-up modal, in percent
    pub discount_percent: Decimal,

    /// Whether the discount modal is shown
    pub discount_popup_enabled: bool,

    /// Contact address used in outbound email
    pub contact_email: Option<String>,
}

impl StoreConfiguration {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownCurrency`] if the code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, PricingError> {
        parse_currency(&self.currency)
    }
}

impl Default for StoreConfiguration {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            discount_percent: Decimal::ZERO,
            discount_popup_enabled: false,
            contact_email: None,
        }
    }
}

impl FromDocument for StoreConfiguration {
    const COLLECTION: &'static str = collections::CONFIGURATION;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        Ok(Self {
            currency: fields::optional_text(fields, "currency")
                .map_or_else(|| DEFAULT_CURRENCY_CODE.to_string(), |code| code.to_uppercase()),
            discount_percent: fields::decimal(fields, "discountPercent"),
            discount_popup_enabled: fields::flag(fields, "discountPopupEnabled"),
            contact_email: fields::optional_text(fields, "contactEmail"),
        })
    }
}

/// Sort records ascending by display order, keeping the input order on ties.
pub fn sort_by_display_order<T>(records: &mut [T], order: impl Fn(&T) -> f64) {
    records.sort_by(|left, right| order(left).total_cmp(&order(right)));
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn document(value: serde_json::Value) -> Result<Document, DocumentError> {
        Document::try_from(value)
    }

    #[test]
    fn category_slug_falls_back_to_name() -> TestResult {
        let category: Category = document(json!({
            "id": "c1",
            "name": "Prints & Posters",
            "isSection": true,
            "isActive": "true",
            "displayOrder": "3"
        }))?
        .parse()?;

        assert_eq!(category.slug, "prints-posters");
        assert!(category.is_section);
        assert!(category.is_active);
        assert!((category.display_order - 3.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn configuration_defaults_currency() -> TestResult {
        let configuration: StoreConfiguration = document(json!({ "id": "store" }))?.parse()?;

        assert_eq!(configuration, StoreConfiguration::default());
        assert_eq!(configuration.currency()?, iso::INR);

        Ok(())
    }

    #[test]
    fn configuration_reads_discount_settings() -> TestResult {
        let configuration: StoreConfiguration = document(json!({
            "id": "store",
            "currency": "usd",
            "discountPercent": 10,
            "discountPopupEnabled": true,
            "contactEmail": "hello@example.com"
        }))?
        .parse()?;

        assert_eq!(configuration.currency()?, iso::USD);
        assert_eq!(configuration.discount_percent, Decimal::from(10));
        assert!(configuration.discount_popup_enabled);

        Ok(())
    }

    #[test]
    fn home_collection_keeps_product_order() -> TestResult {
        let collection: HomeCollection = document(json!({
            "id": "new-arrivals",
            "title": "New Arrivals",
            "productIds": ["p3", "p1", "p2"],
            "isActive": true
        }))?
        .parse()?;

        assert_eq!(collection.product_ids, vec!["p3", "p1", "p2"]);

        Ok(())
    }

    #[test]
    fn sort_by_display_order_is_stable() {
        let mut records = vec![("a", 2.0), ("b", 0.0), ("c", 2.0), ("d", 1.0)];

        sort_by_display_order(&mut records, |record| record.1);

        let names: Vec<&str> = records.iter().map(|record| record.0).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }
}
