//! Seed the database with demo users and products.
//!
//! Re-running is a no-op: users are keyed by email and products by name.

use eco_friendly_core::Decimal;
use sqlx::PgPool;

use super::{CommandError, connect};

struct DemoUser {
    user_name: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
}

struct DemoProduct {
    name: &'static str,
    /// Price in pence.
    price_minor: i64,
    description: &'static str,
    image: &'static str,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        user_name: "admin",
        first_name: "Shop",
        last_name: "Admin",
        email: "admin@ecofriendly.example",
    },
    DemoUser {
        user_name: "jsmith",
        first_name: "Jo",
        last_name: "Smith",
        email: "jo.smith@ecofriendly.example",
    },
];

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Bamboo Toothbrush",
        price_minor: 500,
        description: "Biodegradable handle, plant-based bristles.",
        image: "bamboo-toothbrush.jpg",
    },
    DemoProduct {
        name: "Beeswax Food Wraps",
        price_minor: 1000,
        description: "Set of three reusable wraps.",
        image: "beeswax-wraps.jpg",
    },
    DemoProduct {
        name: "Stainless Steel Bottle",
        price_minor: 1850,
        description: "750ml, double walled.",
        image: "steel-bottle.jpg",
    },
];

/// Insert any demo rows that are not already present.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a query fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let users = seed_users(&pool).await?;
    let products = seed_products(&pool).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Users inserted: {users}");
    tracing::info!("  Products inserted: {products}");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<u64, CommandError> {
    let mut inserted = 0;
    for user in USERS {
        let result = sqlx::query(
            r"
            INSERT INTO users (user_name, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(user.user_name)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn seed_products(pool: &PgPool) -> Result<u64, CommandError> {
    let mut inserted = 0;
    for product in PRODUCTS {
        let result = sqlx::query(
            r"
            INSERT INTO products (product_name, price, description, product_image)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE product_name = $1)
            ",
        )
        .bind(product.name)
        .bind(Decimal::new(product.price_minor, 2))
        .bind(product.description)
        .bind(product.image)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}
