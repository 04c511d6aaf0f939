//! Artworks

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category names whose availability is tracked by unit quantity rather than a stock flag.
pub const QUANTITY_TRACKED_CATEGORIES: [&str; 2] = ["Painting", "Sketch"];

/// Unit used for size options that do not declare one.
pub const DEFAULT_SIZE_UNIT: &str = "cm";

/// Order fulfilment type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Stock is held and tracked by discrete unit quantity.
    ReadyMade,

    /// Produced on demand once ordered.
    #[default]
    MadeToOrder,
}

impl OrderType {
    /// Parse an order type as stored by the admin system.
    ///
    /// Anything that is not recognisably ready-made is treated as made to order.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ready_made" | "ready-made" | "readymade" | "ready made" => Self::ReadyMade,
            _ => Self::MadeToOrder,
        }
    }

    /// Returns true for ready-made artworks.
    pub fn is_ready_made(self) -> bool {
        matches!(self, Self::ReadyMade)
    }
}

/// Category reference carried on an artwork
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category id
    pub id: String,

    /// Category display name
    pub name: String,
}

/// Gallery media type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Still image
    #[default]
    Image,

    /// Video clip
    Video,
}

/// A media reference used for gallery rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayImage {
    /// Media URL
    pub url: String,

    /// Media type
    pub media_type: MediaType,

    /// Id of the colour variant this image came from, if any.
    pub variant_id: Option<String>,
}

impl DisplayImage {
    /// Creates a still image not tied to any variant.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: MediaType::Image,
            variant_id: None,
        }
    }
}

/// One selectable dimension configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    /// Size name, unique within the artwork
    pub name: String,

    /// Width
    pub width: Decimal,

    /// Height
    pub height: Decimal,

    /// Length (depth); zero for flat pieces
    pub length: Decimal,

    /// Measurement unit
    pub unit: String,

    /// Amount added to the base price when this size is chosen
    pub price_adjustment: Decimal,
}

impl SizeOption {
    /// Human readable label, e.g. `Large (60 x 90 cm)`.
    pub fn label(&self) -> String {
        let measurements = if self.length.is_zero() {
            format!("{} x {}", self.width, self.height)
        } else {
            format!("{} x {} x {}", self.width, self.height, self.length)
        };

        format!("{} ({measurements} {})", self.name, self.unit)
    }
}

/// One selectable colour/SKU configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Variant id, unique within the artwork
    pub id: String,

    /// Colour name
    pub color_name: String,

    /// Colour hex code
    pub color_hex: String,

    /// Optional SKU
    pub sku: Option<String>,

    /// Amount added to the base price when this variant is chosen
    pub price_adjustment: Decimal,

    /// Units in stock; only meaningful for ready-made artworks
    pub quantity: Option<i64>,

    /// Variant images, in display order
    pub images: Vec<DisplayImage>,

    /// Whether the admin flagged this as the default variant
    pub is_default: bool,
}

impl ColorVariant {
    /// First image associated with the variant.
    pub fn first_image(&self) -> Option<&DisplayImage> {
        self.images.first()
    }

    /// A quantity of exactly zero marks the variant as unavailable.
    pub fn is_depleted(&self) -> bool {
        self.quantity == Some(0)
    }
}

/// Free-form description row shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionField {
    /// Field label
    pub field: String,

    /// Field value
    pub value: String,
}

/// A purchasable artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Artwork id
    pub id: String,

    /// Artwork name
    pub name: String,

    /// Base price before size and variant adjustments
    pub base_price: Decimal,

    /// Category
    pub category: CategoryRef,

    /// Order fulfilment type
    pub order_type: OrderType,

    /// Stock flag set by an administrator
    pub is_out_of_stock: bool,

    /// Units in stock
    pub quantity: Option<i64>,

    /// Shipping weight
    pub weight: Option<Decimal>,

    /// Artist id
    pub artist_id: Option<String>,

    /// Size options, in declared order
    pub dimensions: Vec<SizeOption>,

    /// Colour variants, in declared order
    pub variants: Vec<ColorVariant>,

    /// Base images, in display order
    pub images: Vec<DisplayImage>,

    /// Description rows
    pub description_fields: Vec<DescriptionField>,

    /// Ids of related artworks
    pub related_products: Vec<String>,
}

impl Artwork {
    /// A size must be chosen before this artwork can be added to the cart.
    pub fn requires_size(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// Whether availability is driven by quantities rather than the stock flag.
    pub fn is_quantity_tracked(&self) -> bool {
        QUANTITY_TRACKED_CATEGORIES.contains(&self.category.name.as_str())
    }

    /// Look up a size option by name.
    pub fn size(&self, name: &str) -> Option<&SizeOption> {
        self.dimensions.iter().find(|size| size.name == name)
    }

    /// Look up a colour variant by id.
    pub fn variant(&self, id: &str) -> Option<&ColorVariant> {
        self.variants.iter().find(|variant| variant.id == id)
    }
}
