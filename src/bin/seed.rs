use goodwin_storefront::{
    config::AppConfig,
    db::{MIGRATIONS_DIR, create_orm_conn, run_migrations},
    models::ProductData,
    store::{DocumentStore, SeaStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set to seed"))?;

    let orm = create_orm_conn(&url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm, MIGRATIONS_DIR).await?;
    let store = SeaStore::connect(orm).await?;

    seed_products(&store).await?;
    Ok(())
}

async fn seed_products(store: &SeaStore) -> anyhow::Result<()> {
    let existing = store.list_products().await?;
    if !existing.is_empty() {
        println!("Catalog already has {} products, skipping", existing.len());
        return Ok(());
    }

    let products = [
        ("Keeri Samba", "Samba", 6500, 40),
        ("Nadu", "Raw", 5200, 60),
        ("Basmati Premium", "Basmati", 12500, 25),
        ("Suduru Samba", "Samba", 7200, 30),
        ("Red Kekulu", "Red", 5400, 45),
        ("Boiled Nadu", "Boiled", 5000, 3),
    ];

    for (offset, (name, product_type, price, stock)) in products.into_iter().enumerate() {
        let data = ProductData {
            name: name.to_string(),
            product_type: product_type.to_string(),
            price,
            stock,
            visible: true,
            image: None,
        };
        store.create_product(offset as i64 + 1, data).await?;
    }

    println!("Seeded products");
    Ok(())
}
