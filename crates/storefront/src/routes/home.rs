//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use customcraft_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use super::NavView;
use super::products::ProductCardView;
use crate::state::AppState;

/// Products shown in the "Featured Products" row.
const FEATURED: [u32; 3] = [1, 2, 3];

/// A customer quote.
#[derive(Clone)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
}

static TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sarah Johnson",
        role: "Marketing Director",
        content: "The quality exceeded our expectations. Perfect for our company event!",
    },
    Testimonial {
        name: "Mike Chen",
        role: "Small Business Owner",
        content: "Easy customization process and fast delivery. Highly recommended!",
    },
    Testimonial {
        name: "Lisa Rodriguez",
        role: "Event Coordinator",
        content: "Amazing customer service and beautiful final products.",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub featured: Vec<ProductCardView>,
    pub testimonials: &'static [Testimonial],
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let featured = FEATURED
        .iter()
        .filter_map(|&id| state.catalog().get(ProductId::new(id)))
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        nav: NavView::load(&session).await,
        featured,
        testimonials: &TESTIMONIALS,
    }
}
