//! Seed data mirroring the production seeders.

use pos_core::{CatalogStore, Category, Money, NewProduct, Product, Result};

/// Menu used by the seeders: (category, [(product, price, stock, unit)]).
const MENU: &[(&str, &[(&str, i64, u32, &str)])] = &[
    (
        "Appetizers",
        &[
            ("French Fries", 25_000, 100, "pcs"),
            ("Chicken Wings", 35_000, 80, "pcs"),
            ("Mozzarella Sticks", 28_000, 60, "pcs"),
            ("Onion Rings", 22_000, 70, "pcs"),
        ],
    ),
    (
        "Main Courses",
        &[
            ("Grilled Salmon", 85_000, 25, "pcs"),
            ("Beef Steak", 95_000, 20, "pcs"),
            ("Chicken Parmesan", 65_000, 30, "pcs"),
            ("Lamb Chops", 105_000, 15, "pcs"),
        ],
    ),
    (
        "Coffee",
        &[
            ("Espresso", 18_000, 100, "cup"),
            ("Cappuccino", 28_000, 100, "cup"),
        ],
    ),
];

/// Seed the catalog with the standard menu and return the created products
/// in creation order.
///
/// # Errors
///
/// Propagates any store error.
pub async fn seed_catalog(catalog: &dyn CatalogStore) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    for (category_name, items) in MENU {
        let category: Category = catalog.create_category((*category_name).to_string()).await?;
        for (name, price, stock, unit) in *items {
            let product = catalog
                .create_product(NewProduct {
                    name: (*name).to_string(),
                    price: Money::from_minor(*price),
                    stock: *stock,
                    unit: (*unit).to_string(),
                    category_id: category.id,
                })
                .await?;
            products.push(product);
        }
    }
    Ok(products)
}
