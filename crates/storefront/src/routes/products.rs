//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use customcraft_core::catalog::swatch_hex;
use customcraft_core::{CatalogQuery, Category, PriceRange, Product, ProductId, SortBy};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::NavView;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: u32,
    pub name: String,
    pub category: &'static str,
    pub price: String,
    pub original_price: Option<String>,
    pub image: String,
    pub rating: String,
    pub reviews: u32,
    pub full_stars: u8,
    pub description: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            category: product.category.label(),
            price: product.price.display(),
            original_price: product.original_price.map(|p| p.display()),
            image: product.image_ref.clone(),
            rating: product.rating.to_string(),
            reviews: product.reviews,
            full_stars: product.full_stars(),
            description: product.description.clone(),
        }
    }
}

impl ProductCardView {
    /// Five-star rating row, filled up to the rounded-down rating.
    #[must_use]
    pub fn stars(&self) -> String {
        (0..5u8)
            .map(|i| if i < self.full_stars { '★' } else { '☆' })
            .collect()
    }
}

/// One choosable option (color, size or font).
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    /// Swatch color for color options.
    pub hex: &'static str,
    pub selected: bool,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub colors: Vec<OptionView>,
    pub sizes: Vec<OptionView>,
    pub fonts: Vec<OptionView>,
    /// Preview background for the default color.
    pub preview_hex: &'static str,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let default_color = product.default_color();
        let default_size = product.default_size();
        let default_font = product.fonts.first().map_or("", String::as_str);

        let colors = product
            .colors
            .iter()
            .map(|c| OptionView {
                value: c.clone(),
                label: capitalize(c),
                hex: swatch_hex(c),
                selected: c == default_color,
            })
            .collect();
        let sizes = product
            .sizes
            .iter()
            .map(|s| OptionView {
                value: s.clone(),
                label: s.clone(),
                hex: "",
                selected: s == default_size,
            })
            .collect();
        let fonts = product
            .fonts
            .iter()
            .map(|f| OptionView {
                value: f.clone(),
                label: f.clone(),
                hex: "",
                selected: f == default_font,
            })
            .collect();

        Self {
            card: ProductCardView::from(product),
            colors,
            sizes,
            fonts,
            preview_hex: swatch_hex(default_color),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Catalog query parameters.
///
/// Every field is optional; unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub category: Option<String>,
    pub price: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub view: Option<String>,
}

impl CatalogParams {
    fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category.as_deref().and_then(Category::from_slug),
            price_range: self
                .price
                .as_deref()
                .map(PriceRange::from_slug)
                .unwrap_or_default(),
            search: self.q.clone().unwrap_or_default(),
            sort: self
                .sort
                .as_deref()
                .map(SortBy::from_slug)
                .unwrap_or_default(),
        }
    }

    fn list_view(&self) -> bool {
        self.view.as_deref() == Some("list")
    }
}

/// A filter choice rendered in the sidebar.
#[derive(Clone)]
pub struct FilterOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: NavView,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<FilterOption>,
    pub price_ranges: Vec<FilterOption>,
    pub sorts: Vec<FilterOption>,
    pub search: String,
    pub list_view: bool,
    pub category_slug: &'static str,
    pub price_slug: &'static str,
    pub sort_slug: &'static str,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product: ProductDetailView,
}

/// Display the product catalog.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CatalogParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    let products = state
        .catalog()
        .search(&query)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    let mut categories = vec![FilterOption {
        slug: "all",
        label: "All Products",
        selected: query.category.is_none(),
    }];
    categories.extend(Category::ALL.iter().map(|c| FilterOption {
        slug: c.slug(),
        label: c.label(),
        selected: query.category == Some(*c),
    }));

    ProductsIndexTemplate {
        nav: NavView::load(&session).await,
        products,
        categories,
        price_ranges: PriceRange::ALL
            .iter()
            .map(|r| FilterOption {
                slug: r.slug(),
                label: r.label(),
                selected: *r == query.price_range,
            })
            .collect(),
        sorts: SortBy::ALL
            .iter()
            .map(|s| FilterOption {
                slug: s.slug(),
                label: s.label(),
                selected: *s == query.sort,
            })
            .collect(),
        search: query.search.clone(),
        list_view: params.list_view(),
        category_slug: query.category.map_or("all", |c| c.slug()),
        price_slug: query.price_range.slug(),
        sort_slug: query.sort.slug(),
    }
}

/// Display a product with its customizer.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        nav: NavView::load(&session).await,
        product: ProductDetailView::from(product),
    })
}

#[cfg(test)]
mod tests {
    use customcraft_core::Catalog;

    use super::*;

    #[test]
    fn test_params_fall_back_to_defaults() {
        let params = CatalogParams {
            category: Some("hats".to_string()),
            price: Some("cheap".to_string()),
            sort: Some("newest".to_string()),
            ..CatalogParams::default()
        };
        let query = params.to_query();
        assert_eq!(query, CatalogQuery::default());
        assert!(!params.list_view());
    }

    #[test]
    fn test_params_parse_known_values() {
        let params = CatalogParams {
            category: Some("mugs".to_string()),
            price: Some("20-30".to_string()),
            q: Some("travel".to_string()),
            sort: Some("price-low".to_string()),
            view: Some("list".to_string()),
        };
        let query = params.to_query();
        assert_eq!(query.category, Some(Category::Mugs));
        assert_eq!(query.price_range, PriceRange::From20To30);
        assert_eq!(query.sort, SortBy::PriceLow);
        assert_eq!(query.search, "travel");
        assert!(params.list_view());
    }

    #[test]
    fn test_detail_view_preselects_defaults() {
        let catalog = Catalog::fixtures();
        let Some(mug) = catalog.get(ProductId::new(2)) else {
            panic!("fixture 2 missing");
        };
        let view = ProductDetailView::from(mug);
        let selected: Vec<&str> = view
            .colors
            .iter()
            .chain(&view.sizes)
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["white", "11oz"]);
        assert_eq!(view.card.price, "$16.99");
    }

    #[test]
    fn test_stars() {
        let catalog = Catalog::fixtures();
        let Some(first) = catalog.products().first() else {
            panic!("fixtures are empty");
        };
        let card = ProductCardView::from(first);
        assert_eq!(card.stars().chars().count(), 5);
        assert_eq!(
            card.stars().chars().filter(|&c| c == '★').count(),
            usize::from(card.full_stars)
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("navy"), "Navy");
        assert_eq!(capitalize(""), "");
    }
}
