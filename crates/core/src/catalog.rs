//! Product catalog.
//!
//! The catalog is a fixed list of customizable products. It stands in for a
//! real catalog provider; only the shape of [`Product`] matters to the rest
//! of the system.

use core::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Fonts offered for custom text on every product.
pub const FONTS: &[&str] = &["Arial", "Helvetica", "Times New Roman", "Georgia", "Verdana"];

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(rename = "tshirts")]
    TShirts,
    Mugs,
    PhoneCases,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 3] = [Self::TShirts, Self::Mugs, Self::PhoneCases];

    /// URL slug used in catalog query strings.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::TShirts => "tshirts",
            Self::Mugs => "mugs",
            Self::PhoneCases => "phone-cases",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TShirts => "T-Shirts",
            Self::Mugs => "Mugs",
            Self::PhoneCases => "Phone Cases",
        }
    }

    /// Parse a slug. `"all"` and unknown slugs yield `None` (no filter).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Price bucket filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// Strictly below 20.
    Under20,
    /// 20 to 30 inclusive.
    From20To30,
    /// Strictly above 30.
    Over30,
}

impl PriceRange {
    /// Every bucket, in menu order.
    pub const ALL: [Self; 4] = [Self::All, Self::Under20, Self::From20To30, Self::Over30];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Under20 => "under-20",
            Self::From20To30 => "20-30",
            Self::Over30 => "over-30",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Prices",
            Self::Under20 => "Under $20",
            Self::From20To30 => "$20 - $30",
            Self::Over30 => "Over $30",
        }
    }

    /// Parse a slug, falling back to [`PriceRange::All`].
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|r| r.slug() == slug)
            .unwrap_or_default()
    }

    /// Whether `amount` falls in this bucket.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        let twenty = Decimal::from(20);
        let thirty = Decimal::from(30);
        match self {
            Self::All => true,
            Self::Under20 => amount < twenty,
            Self::From20To30 => amount >= twenty && amount <= thirty,
            Self::Over30 => amount > thirty,
        }
    }
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Most reviews first.
    #[default]
    Popularity,
    /// Highest rating first.
    Rating,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortBy {
    pub const ALL: [Self; 4] = [Self::Popularity, Self::Rating, Self::PriceLow, Self::PriceHigh];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Popularity => "Sort by Popularity",
            Self::Rating => "Sort by Rating",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
        }
    }

    /// Parse a slug, falling back to [`SortBy::Popularity`].
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.slug() == slug)
            .unwrap_or_default()
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popularity => b.reviews.cmp(&a.reviews),
            Self::Rating => b.rating.cmp(&a.rating),
            Self::PriceLow => a.price.amount.cmp(&b.price.amount),
            Self::PriceHigh => b.price.amount.cmp(&a.price.amount),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    /// Pre-sale price, shown struck through.
    pub original_price: Option<Price>,
    pub image_ref: String,
    /// Average rating out of 5, one decimal place.
    pub rating: Decimal,
    pub reviews: u32,
    pub description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub fonts: Vec<String>,
}

impl Product {
    /// Whether `color` is one of this product's color options.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whether `size` is one of this product's size options.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `font` is one of this product's fonts.
    #[must_use]
    pub fn offers_font(&self, font: &str) -> bool {
        self.fonts.iter().any(|f| f == font)
    }

    /// Color preselected on the detail page: white when offered.
    #[must_use]
    pub fn default_color(&self) -> &str {
        if self.offers_color("white") {
            "white"
        } else {
            self.colors.first().map_or("", String::as_str)
        }
    }

    /// Size preselected on the detail page: M when offered.
    #[must_use]
    pub fn default_size(&self) -> &str {
        if self.offers_size("M") {
            "M"
        } else {
            self.sizes.first().map_or("", String::as_str)
        }
    }

    /// Number of whole stars to fill in a five-star rating display.
    #[must_use]
    pub fn full_stars(&self) -> u8 {
        self.rating.trunc().to_u8().unwrap_or(0).min(5)
    }
}

/// Hex swatch for a color option.
#[must_use]
pub fn swatch_hex(color: &str) -> &'static str {
    match color {
        "black" => "#000000",
        "navy" => "#1e3a8a",
        "red" => "#dc2626",
        "blue" => "#2563eb",
        "gray" => "#6b7280",
        "green" => "#15803d",
        "silver" => "#c0c0c0",
        "rose-gold" => "#b76e79",
        "clear" => "#f3f4f6",
        _ => "#FFFFFF",
    }
}

/// Filter and sort parameters for [`Catalog::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// `None` means all categories.
    pub category: Option<Category>,
    pub price_range: PriceRange,
    /// Case-insensitive substring of the product name; empty matches all.
    pub search: String,
    pub sort: SortBy,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        let category = self.category.is_none_or(|c| c == product.category);
        let search = self.search.trim();
        let name = search.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase());
        category && name && self.price_range.contains(product.price.amount)
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in six-product catalog.
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new(vec![
            fixture(
                1,
                "Premium Cotton T-Shirt",
                Category::TShirts,
                (2499, Some(2999)),
                "https://images.pexels.com/photos/8532616/pexels-photo-8532616.jpeg",
                (48, 124),
                "High-quality 100% cotton t-shirt perfect for custom designs. Soft, comfortable, and durable.",
                &["white", "black", "navy", "red"],
                &["XS", "S", "M", "L", "XL", "XXL"],
            ),
            fixture(
                2,
                "Ceramic Coffee Mug",
                Category::Mugs,
                (1699, None),
                "https://images.pexels.com/photos/302899/pexels-photo-302899.jpeg",
                (49, 89),
                "Dishwasher-safe glazed ceramic mug with a wide print area for photos and text.",
                &["white", "black", "blue"],
                &["11oz", "15oz"],
            ),
            fixture(
                3,
                "Protective Phone Case",
                Category::PhoneCases,
                (1999, None),
                "https://images.pexels.com/photos/1464625/pexels-photo-1464625.jpeg",
                (47, 156),
                "Shock-absorbing case with raised edges and a full-back printable surface.",
                &["clear", "black", "white"],
                &["iPhone 14", "iPhone 15", "Samsung S24"],
            ),
            fixture(
                4,
                "Vintage Style T-Shirt",
                Category::TShirts,
                (2299, None),
                "https://images.pexels.com/photos/8532616/pexels-photo-8532616.jpeg",
                (46, 78),
                "Garment-dyed tee with a worn-in feel, ideal for retro prints.",
                &["gray", "navy", "green"],
                &["S", "M", "L", "XL"],
            ),
            fixture(
                5,
                "Travel Mug with Handle",
                Category::Mugs,
                (2199, None),
                "https://images.pexels.com/photos/302899/pexels-photo-302899.jpeg",
                (48, 92),
                "Double-walled stainless travel mug that keeps drinks hot for hours.",
                &["silver", "black", "blue"],
                &["16oz", "20oz"],
            ),
            fixture(
                6,
                "Slim Phone Case",
                Category::PhoneCases,
                (1599, None),
                "https://images.pexels.com/photos/1464625/pexels-photo-1464625.jpeg",
                (45, 203),
                "Ultra-thin case that adds almost no bulk while showing off your design.",
                &["clear", "rose-gold", "black"],
                &["iPhone 14", "iPhone 15", "Samsung S24"],
            ),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filter then sort. Ties keep catalog order.
    #[must_use]
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut matches: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();
        matches.sort_by(|a, b| query.sort.compare(a, b));
        matches
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: u32,
    name: &str,
    category: Category,
    (price_cents, original_cents): (i64, Option<i64>),
    image_ref: &str,
    (rating_tenths, reviews): (i64, u32),
    description: &str,
    colors: &[&str],
    sizes: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        price: Price::from_cents(price_cents),
        original_price: original_cents.map(Price::from_cents),
        image_ref: image_ref.to_owned(),
        rating: Decimal::new(rating_tenths, 1),
        reviews,
        description: description.to_owned(),
        colors: colors.iter().map(|&c| c.to_owned()).collect(),
        sizes: sizes.iter().map(|&s| s.to_owned()).collect(),
        fonts: FONTS.iter().map(|&f| f.to_owned()).collect(),
    }
}
