use clap::Args;
use halfdrinks_app::domain::{
    products::{
        PgProductsService, ProductsService, ProductsServiceError, data::NewProduct,
        records::{ProductCategory, ProductUuid},
    },
    promotions::{
        PgPromotionsService, PromotionsService, PromotionsServiceError,
        data::{DiscountKind, NewPromotion},
        records::PromotionUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

struct SeedProduct {
    slug: &'static str,
    name: &'static str,
    short_description: &'static str,
    description: &'static str,
    sku: &'static str,
    price: u64,
    compare_price: Option<u64>,
    inventory: u64,
    category: ProductCategory,
    featured: bool,
    ingredients: &'static [&'static str],
    tags: &'static [&'static str],
}

const PRODUCTS: [SeedProduct; 6] = [
    SeedProduct {
        slug: "tropical-sunset-smoothie",
        name: "Tropical Sunset Smoothie",
        short_description: "Vibrant mango, pineapple, and coconut blend",
        description: "A vibrant blend of mango, pineapple, and coconut with our signature two-tone presentation.",
        sku: "TSS-001",
        price: 899,
        compare_price: Some(1_099),
        inventory: 50,
        category: ProductCategory::Smoothies,
        featured: true,
        ingredients: &["Mango", "Pineapple", "Coconut Milk", "Banana", "Honey", "Ice"],
        tags: &["tropical", "vitamin-c", "refreshing", "summer"],
    },
    SeedProduct {
        slug: "berry-bliss-juice",
        name: "Berry Bliss Juice",
        short_description: "Antioxidant-rich berry blend with mint",
        description: "A rich blend of blueberries, strawberries, and blackberries with a hint of mint.",
        sku: "BBJ-002",
        price: 799,
        compare_price: None,
        inventory: 75,
        category: ProductCategory::Juices,
        featured: true,
        ingredients: &["Blueberries", "Strawberries", "Blackberries", "Mint", "Lemon", "Water"],
        tags: &["antioxidants", "berries", "low-sugar", "healthy"],
    },
    SeedProduct {
        slug: "green-goddess-tea",
        name: "Green Goddess Tea",
        short_description: "Premium green tea with matcha and herbs",
        description: "A premium blend of green tea, matcha, and fresh herbs with a gentle caffeine boost.",
        sku: "GGT-003",
        price: 699,
        compare_price: None,
        inventory: 100,
        category: ProductCategory::Teas,
        featured: false,
        ingredients: &["Green Tea", "Matcha", "Mint", "Lemon Balm", "Ginger"],
        tags: &["antioxidants", "energy", "herbal", "premium"],
    },
    SeedProduct {
        slug: "chocolate-dream-coffee",
        name: "Chocolate Dream Coffee",
        short_description: "Rich coffee with dark chocolate and vanilla",
        description: "A decadent blend of premium coffee, dark chocolate, and vanilla.",
        sku: "CDC-004",
        price: 999,
        compare_price: Some(1_199),
        inventory: 40,
        category: ProductCategory::Coffee,
        featured: true,
        ingredients: &["Premium Coffee", "Dark Chocolate", "Vanilla", "Milk", "Cocoa Powder"],
        tags: &["coffee", "chocolate", "indulgent", "energy"],
    },
    SeedProduct {
        slug: "energy-boost-elixir",
        name: "Energy Boost Elixir",
        short_description: "Natural energy blend with ginseng and guarana",
        description: "A blend of ginseng, guarana, and B-vitamins for sustained energy without the crash.",
        sku: "EBE-005",
        price: 1_299,
        compare_price: None,
        inventory: 30,
        category: ProductCategory::EnergyDrinks,
        featured: false,
        ingredients: &["Ginseng", "Guarana", "B-Vitamins", "Green Tea Extract", "Natural Flavors"],
        tags: &["energy", "natural", "vitamins", "sustained"],
    },
    SeedProduct {
        slug: "custom-creation-starter",
        name: "Custom Creation Starter",
        short_description: "Base blend for custom drink creations",
        description: "Start your custom drink journey with our base blend.",
        sku: "CCS-006",
        price: 599,
        compare_price: None,
        inventory: 200,
        category: ProductCategory::Custom,
        featured: false,
        ingredients: &["Base Blend", "Custom Additions"],
        tags: &["custom", "personalized", "creative", "unique"],
    },
];

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn promotions() -> Result<Vec<NewPromotion>, String> {
    let parse = |value: &str| {
        value
            .parse()
            .map_err(|error| format!("invalid seed timestamp {value}: {error}"))
    };

    Ok(vec![
        NewPromotion {
            uuid: PromotionUuid::new(),
            code: "SUMMER20".to_string(),
            name: "Summer Sale".to_string(),
            description: None,
            discount: DiscountKind::PercentageOff { percentage: 20 },
            min_amount: Some(2_500),
            max_discount: Some(1_000),
            usage_limit: Some(1_000),
            starts_at: parse("2024-06-01T00:00:00Z")?,
            ends_at: parse("2024-08-31T23:59:59Z")?,
        },
        NewPromotion {
            uuid: PromotionUuid::new(),
            code: "WELCOME10".to_string(),
            name: "First Order Discount".to_string(),
            description: None,
            discount: DiscountKind::AmountOff { amount: 1_000 },
            min_amount: Some(2_000),
            max_discount: None,
            usage_limit: Some(1),
            starts_at: parse("2024-01-01T00:00:00Z")?,
            ends_at: parse("2024-12-31T23:59:59Z")?,
        },
    ])
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let products = PgProductsService::new(db.clone());

    for seed in &PRODUCTS {
        let result = products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                slug: seed.slug.to_string(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                short_description: Some(seed.short_description.to_string()),
                sku: Some(seed.sku.to_string()),
                price: seed.price,
                compare_price: seed.compare_price,
                inventory: seed.inventory,
                category: seed.category,
                tags: to_strings(seed.tags),
                ingredients: to_strings(seed.ingredients),
                is_featured: seed.featured,
            })
            .await;

        match result {
            Ok(product) => println!("created product {}", product.slug),
            Err(ProductsServiceError::AlreadyExists) => println!("product {} exists", seed.slug),
            Err(error) => return Err(format!("failed to seed product {}: {error}", seed.slug)),
        }
    }

    let promotions_service = PgPromotionsService::new(db);

    for promotion in promotions()? {
        let code = promotion.code.clone();

        match promotions_service.create_promotion(promotion).await {
            Ok(_) => println!("created promotion {code}"),
            Err(PromotionsServiceError::AlreadyExists) => println!("promotion {code} exists"),
            Err(error) => return Err(format!("failed to seed promotion {code}: {error}")),
        }
    }

    Ok(())
}
