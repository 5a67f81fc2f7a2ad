//! Fixtures shared by the service tests.

use jiff::{SignedDuration, Timestamp};
use serde_json::Map;
use testresult::TestResult;

use crate::{
    auth::{AuthServiceError, Customer, CustomerUuid, NewCustomer},
    domain::{
        carts::models::LineItemTarget,
        orders::{
            Address, OrderRecord, OrderUuid, generate_order_number,
            records::{NewOrder, NewOrderItem, OrderItemUuid},
            repository::PgOrdersRepository,
        },
        pricing::{OrderTotals, line_total},
        products::{
            data::NewProduct,
            records::{ProductCategory, ProductRecord, ProductUuid},
        },
        promotions::{
            PromotionsService,
            data::{DiscountKind, NewPromotion},
            records::{PromotionRecord, PromotionUuid},
        },
    },
};

use super::TestContext;

pub(crate) fn new_product(
    slug: &str,
    price: u64,
    inventory: u64,
    category: ProductCategory,
) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        description: format!("{slug} description"),
        short_description: None,
        sku: None,
        price,
        compare_price: None,
        inventory,
        category,
        tags: Vec::new(),
        ingredients: Vec::new(),
        is_featured: false,
    }
}

/// An active catalog record, for mocked product lookups.
pub(crate) fn product_record(
    uuid: ProductUuid,
    name: &str,
    price: u64,
    inventory: u64,
) -> ProductRecord {
    ProductRecord {
        uuid,
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        description: String::new(),
        short_description: None,
        sku: None,
        price,
        compare_price: None,
        inventory,
        category: ProductCategory::Smoothies,
        tags: Vec::new(),
        ingredients: Vec::new(),
        is_active: true,
        is_featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn address() -> Address {
    Address {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company: None,
        address1: "12 Analytical Way".to_string(),
        address2: None,
        city: "Portland".to_string(),
        state: "OR".to_string(),
        zip_code: "97201".to_string(),
        country: "US".to_string(),
        phone: None,
    }
}

/// 20% off orders of $25 or more, capped at $10.
pub(crate) fn summer20(starts_at: Timestamp, ends_at: Timestamp) -> NewPromotion {
    NewPromotion {
        uuid: PromotionUuid::new(),
        code: "SUMMER20".to_string(),
        name: "Summer Special".to_string(),
        description: Some("20% off all smoothies".to_string()),
        discount: DiscountKind::PercentageOff { percentage: 20 },
        min_amount: Some(2_500),
        max_discount: Some(1_000),
        usage_limit: Some(1_000),
        starts_at,
        ends_at,
    }
}

/// SUMMER20 valid from yesterday until tomorrow.
pub(crate) async fn create_active_promotion(ctx: &TestContext) -> TestResult<PromotionRecord> {
    let now = Timestamp::now();
    let day = SignedDuration::from_hours(24);

    Ok(ctx
        .promotions
        .create_promotion(summer20(now.checked_sub(day)?, now.checked_add(day)?))
        .await?)
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<Customer, AuthServiceError> {
    ctx.auth
        .create_customer(NewCustomer {
            uuid: CustomerUuid::new(),
            email: email.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        })
        .await
}

/// Insert a pending order for `quantity` units of `product`, as checkout
/// would leave it once the payment intent is attached.
pub(crate) async fn create_order(
    ctx: &TestContext,
    product: &ProductRecord,
    quantity: u32,
    customer: Option<CustomerUuid>,
) -> TestResult<OrderRecord> {
    insert_order(ctx, product, quantity, customer, None).await
}

/// Like [`create_order`], with the promotion's discount applied.
pub(crate) async fn create_promoted_order(
    ctx: &TestContext,
    product: &ProductRecord,
    quantity: u32,
    promotion: &PromotionRecord,
) -> TestResult<OrderRecord> {
    insert_order(ctx, product, quantity, None, Some(promotion)).await
}

async fn insert_order(
    ctx: &TestContext,
    product: &ProductRecord,
    quantity: u32,
    customer: Option<CustomerUuid>,
    promotion: Option<&PromotionRecord>,
) -> TestResult<OrderRecord> {
    let now = Timestamp::now();
    let subtotal = line_total(product.price, quantity)?;
    let discount = match promotion {
        Some(promotion) => promotion.discount_for(subtotal, now)?,
        None => 0,
    };

    let order = NewOrder {
        uuid: OrderUuid::new(),
        order_number: generate_order_number(now, &mut rand::thread_rng()),
        customer_uuid: customer,
        email: "fan@example.com".to_string(),
        totals: OrderTotals::calculate(subtotal, discount)?,
        shipping_address: address(),
        billing_address: None,
        promotion_uuid: promotion.map(|promotion| promotion.uuid),
        promotion_code: promotion.map(|promotion| promotion.code.clone()),
        items: vec![NewOrderItem {
            uuid: OrderItemUuid::new(),
            target: LineItemTarget::Product(product.uuid),
            name: product.name.clone(),
            quantity,
            price: product.price,
            total: subtotal,
            options: Map::new(),
        }],
    };

    let repository = PgOrdersRepository::new();
    let mut tx = ctx.db.pool().begin().await?;

    let created = repository.create_order(&mut tx, &order).await?;
    let intent_id = format!("pi_test_{}", created.uuid.into_uuid().simple());
    repository
        .set_payment_intent(&mut tx, created.uuid, &intent_id)
        .await?;

    let stored = repository.get_order(&mut tx, created.uuid).await?;

    tx.commit().await?;

    Ok(stored)
}
