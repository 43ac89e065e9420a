//! Fixed demo content for the account and admin dashboards.
//!
//! None of this is backed by a store; it fills the dashboards until real
//! order history and reporting exist.

use customcraft_core::{Catalog, CouponBook, OrderStatus, Price, ProductId};
use rust_decimal::Decimal;

/// Number of historical orders shown on every dashboard (`ORD-001`..`ORD-003`).
pub const DEMO_ORDER_COUNT: u32 = 3;

/// A past order in a customer's history.
#[derive(Debug, Clone)]
pub struct HistoricalOrder {
    pub id: &'static str,
    pub date: &'static str,
    pub status: OrderStatus,
    pub total: Price,
    pub product: &'static str,
    pub quantity: u32,
    pub customization: &'static str,
}

/// A design the customer saved for later.
#[derive(Debug, Clone)]
pub struct SavedDesign {
    pub id: &'static str,
    pub name: &'static str,
    pub product: &'static str,
    pub last_modified: &'static str,
    pub thumbnail: &'static str,
}

/// A product on the customer's wishlist.
#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Price,
    pub image: &'static str,
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub total_orders: u32,
    pub total_revenue: Price,
    pub total_customers: u32,
    pub pending_orders: u32,
}

/// A row in the admin "recent orders" table.
#[derive(Debug, Clone)]
pub struct RecentOrder {
    pub id: &'static str,
    pub customer: &'static str,
    pub product: &'static str,
    pub amount: Price,
    pub status: OrderStatus,
    pub date: &'static str,
}

/// Inventory figures for one catalog product.
#[derive(Debug, Clone)]
pub struct StockRow {
    pub product_id: ProductId,
    pub name: String,
    pub category: &'static str,
    pub price: Price,
    pub stock: u32,
    pub sales: u32,
}

/// Redemption figures for one coupon.
#[derive(Debug, Clone)]
pub struct CouponUsage {
    pub code: String,
    pub percent: Decimal,
    pub uses: u32,
    pub max_uses: u32,
    pub expires: &'static str,
}

const THUMB_TSHIRT: &str = "https://images.pexels.com/photos/8532616/pexels-photo-8532616.jpeg";
const THUMB_MUG: &str = "https://images.pexels.com/photos/302899/pexels-photo-302899.jpeg";

/// The customer's order history, newest first.
#[must_use]
pub fn order_history() -> Vec<HistoricalOrder> {
    vec![
        HistoricalOrder {
            id: "ORD-001",
            date: "2024-01-15",
            status: OrderStatus::Delivered,
            total: Price::from_cents(4998),
            product: "Custom T-Shirt",
            quantity: 2,
            customization: "Logo Design",
        },
        HistoricalOrder {
            id: "ORD-002",
            date: "2024-01-10",
            status: OrderStatus::Shipped,
            total: Price::from_cents(2499),
            product: "Personalized Mug",
            quantity: 1,
            customization: "Custom Text",
        },
        HistoricalOrder {
            id: "ORD-003",
            date: "2024-01-05",
            status: OrderStatus::Processing,
            total: Price::from_cents(3998),
            product: "Phone Case",
            quantity: 2,
            customization: "Photo Upload",
        },
    ]
}

#[must_use]
pub fn saved_designs() -> Vec<SavedDesign> {
    vec![
        SavedDesign {
            id: "DES-001",
            name: "Company Logo T-Shirt",
            product: "Premium Cotton T-Shirt",
            last_modified: "2024-01-14",
            thumbnail: THUMB_TSHIRT,
        },
        SavedDesign {
            id: "DES-002",
            name: "Birthday Mug",
            product: "Ceramic Coffee Mug",
            last_modified: "2024-01-12",
            thumbnail: THUMB_MUG,
        },
    ]
}

#[must_use]
pub fn wishlist() -> Vec<WishlistEntry> {
    vec![
        WishlistEntry {
            id: "WISH-001",
            name: "Premium Hoodie",
            price: Price::from_cents(4599),
            image: THUMB_TSHIRT,
        },
        WishlistEntry {
            id: "WISH-002",
            name: "Travel Tumbler",
            price: Price::from_cents(2899),
            image: THUMB_MUG,
        },
    ]
}

#[must_use]
pub fn store_stats() -> StoreStats {
    StoreStats {
        total_orders: 1247,
        total_revenue: Price::from_cents(4_567_890),
        total_customers: 892,
        pending_orders: 23,
    }
}

#[must_use]
pub fn recent_orders() -> Vec<RecentOrder> {
    vec![
        RecentOrder {
            id: "ORD-001",
            customer: "John Doe",
            product: "Custom T-Shirt",
            amount: Price::from_cents(2499),
            status: OrderStatus::Processing,
            date: "2024-01-15",
        },
        RecentOrder {
            id: "ORD-002",
            customer: "Jane Smith",
            product: "Personalized Mug",
            amount: Price::from_cents(1699),
            status: OrderStatus::Shipped,
            date: "2024-01-14",
        },
        RecentOrder {
            id: "ORD-003",
            customer: "Mike Johnson",
            product: "Phone Case",
            amount: Price::from_cents(1999),
            status: OrderStatus::Delivered,
            date: "2024-01-13",
        },
    ]
}

/// Stock and sales per catalog product.
///
/// Products without recorded figures show zero.
#[must_use]
pub fn product_stock(catalog: &Catalog) -> Vec<StockRow> {
    const FIGURES: &[(u32, u32, u32)] = &[
        (1, 150, 89),
        (2, 75, 67),
        (3, 200, 45),
        (4, 120, 38),
        (5, 60, 52),
        (6, 180, 71),
    ];

    catalog
        .products()
        .iter()
        .map(|product| {
            let (stock, sales) = FIGURES
                .iter()
                .find(|(id, _, _)| *id == product.id.as_u32())
                .map_or((0, 0), |&(_, stock, sales)| (stock, sales));
            StockRow {
                product_id: product.id,
                name: product.name.clone(),
                category: product.category.label(),
                price: product.price,
                stock,
                sales,
            }
        })
        .collect()
}

/// Redemption figures for every coupon in `coupons`.
#[must_use]
pub fn coupon_usage(coupons: &CouponBook) -> Vec<CouponUsage> {
    const FIGURES: &[(&str, u32, u32, &str)] = &[
        ("SAVE10", 45, 100, "2024-02-15"),
        ("WELCOME20", 23, 50, "2024-03-01"),
        ("STUDENT15", 12, 200, "2024-06-30"),
    ];

    coupons
        .coupons()
        .iter()
        .map(|coupon| {
            let (uses, max_uses, expires) = FIGURES
                .iter()
                .find(|(code, ..)| *code == coupon.code)
                .map_or((0, 0, "-"), |&(_, uses, max, expires)| (uses, max, expires));
            CouponUsage {
                code: coupon.code.clone(),
                percent: coupon.percent(),
                uses,
                max_uses,
                expires,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_history_matches_sequence_start() {
        let history = order_history();
        assert_eq!(history.len(), DEMO_ORDER_COUNT as usize);
        assert_eq!(history.last().map(|o| o.id), Some("ORD-003"));
    }

    #[test]
    fn test_product_stock_covers_catalog() {
        let catalog = Catalog::fixtures();
        let rows = product_stock(&catalog);
        assert_eq!(rows.len(), catalog.products().len());
        assert!(rows.iter().all(|row| row.stock > 0));
    }

    #[test]
    fn test_coupon_usage_follows_coupon_book() {
        let usage = coupon_usage(&CouponBook::standard());
        let codes: Vec<&str> = usage.iter().map(|u| u.code.as_str()).collect();
        assert_eq!(codes, ["SAVE10", "WELCOME20", "STUDENT15"]);
        assert_eq!(usage.first().map(|u| u.uses), Some(45));
        assert_eq!(usage.first().map(|u| u.percent), Some(Decimal::from(10)));
    }
}
