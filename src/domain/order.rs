use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Lifecycle state of an order. `PreparedForDelivery` keeps the original
/// wire spelling `PreparedforDelivery` for compatibility with existing
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(rename = "PreparedforDelivery")]
    PreparedForDelivery,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::PreparedForDelivery => "PreparedforDelivery",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Confirmed" => Ok(OrderStatus::Confirmed),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            "PreparedforDelivery" => Ok(OrderStatus::PreparedForDelivery),
            other => Err(DomainError::InvalidInput(format!(
                "Invalid order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Completed" => Ok(PaymentStatus::Completed),
            "Failed" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::InvalidInput(format!(
                "Invalid payment status '{other}'"
            ))),
        }
    }
}

/// Convert a major-unit amount (rupees) to the gateway's minor units
/// (paise). The gateway only accepts positive integer amounts, so values
/// that are non-positive or carry sub-paisa precision are rejected rather
/// than truncated.
pub fn to_minor_units(amount: &BigDecimal) -> Result<i64, DomainError> {
    if amount <= &BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(
            "total_amount must be positive".to_string(),
        ));
    }
    let minor = amount * BigDecimal::from(100);
    if !minor.is_integer() {
        return Err(DomainError::InvalidInput(
            "total_amount has sub-minor-unit precision".to_string(),
        ));
    }
    minor
        .to_i64()
        .ok_or_else(|| DomainError::InvalidInput("total_amount out of range".to_string()))
}

// ── Inputs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub discount: BigDecimal,
}

/// A fully validated order ready for persistence. `new` is the single place
/// where field-presence and range constraints are enforced, instead of ad
/// hoc checks at call sites.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: Uuid,
    pub items: Vec<OrderItemInput>,
    pub total_amount: BigDecimal,
    pub delivery_address_id: Uuid,
    pub payment_method: String,
    pub amount_paid: BigDecimal,
    pub gateway_order_id: String,
}

impl OrderDraft {
    pub fn new(
        user_id: Uuid,
        items: Vec<OrderItemInput>,
        total_amount: BigDecimal,
        delivery_address_id: Uuid,
        payment_method: String,
        amount_paid: BigDecimal,
        gateway_order_id: String,
    ) -> Result<Self, DomainError> {
        let zero = BigDecimal::from(0);
        if total_amount < zero {
            return Err(DomainError::InvalidInput(
                "total_amount must not be negative".to_string(),
            ));
        }
        if payment_method.is_empty() {
            return Err(DomainError::InvalidInput(
                "payment_method is required".to_string(),
            ));
        }
        if gateway_order_id.is_empty() {
            return Err(DomainError::InvalidInput(
                "gateway order id is required".to_string(),
            ));
        }
        for item in &items {
            if item.quantity < 1 {
                return Err(DomainError::InvalidInput(
                    "item quantity must be at least 1".to_string(),
                ));
            }
            if item.total_price < zero {
                return Err(DomainError::InvalidInput(
                    "item total_price must not be negative".to_string(),
                ));
            }
            if item.discount < zero {
                return Err(DomainError::InvalidInput(
                    "item discount must not be negative".to_string(),
                ));
            }
        }
        Ok(Self {
            user_id,
            items,
            total_amount,
            delivery_address_id,
            payment_method,
            amount_paid,
            gateway_order_id,
        })
    }
}

/// Partial update merged into a stored order. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub amount_paid: Option<BigDecimal>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub shipping_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
}

// ── Views ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PaymentView {
    pub method: String,
    pub amount_paid: BigDecimal,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub discount: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItemView>,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub delivery_address_id: Uuid,
    pub shipping_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub payment: PaymentView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddressSummary {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

/// An order item with its product reference expanded. A dangling product
/// reference expands to `None`, matching the original populate semantics.
#[derive(Debug, Clone)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product: Option<ProductSummary>,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub discount: BigDecimal,
}

/// An order with user, product and address references expanded for reads.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub id: Uuid,
    pub user: Option<UserSummary>,
    pub items: Vec<OrderItemDetail>,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub delivery_address_id: Uuid,
    pub delivery_address: Option<AddressSummary>,
    pub shipping_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub payment: PaymentView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<OrderDetail>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn item(quantity: i32, total_price: &str, discount: &str) -> OrderItemInput {
        OrderItemInput {
            product_id: Some(Uuid::new_v4()),
            quantity,
            total_price: dec(total_price),
            discount: dec(discount),
        }
    }

    fn draft_with_items(items: Vec<OrderItemInput>) -> Result<OrderDraft, DomainError> {
        OrderDraft::new(
            Uuid::new_v4(),
            items,
            dec("500"),
            Uuid::new_v4(),
            "Razorpay".to_string(),
            dec("500"),
            "order_abc".to_string(),
        )
    }

    #[test]
    fn order_status_round_trips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::PreparedForDelivery,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn prepared_for_delivery_keeps_original_spelling() {
        assert_eq!(
            OrderStatus::PreparedForDelivery.as_str(),
            "PreparedforDelivery"
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::PreparedForDelivery).unwrap(),
            "\"PreparedforDelivery\""
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            OrderStatus::from_str("Shipping"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            PaymentStatus::from_str("Paid"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn minor_units_multiplies_by_hundred() {
        assert_eq!(to_minor_units(&dec("500")).unwrap(), 50000);
        assert_eq!(to_minor_units(&dec("499.99")).unwrap(), 49999);
        assert_eq!(to_minor_units(&dec("0.01")).unwrap(), 1);
    }

    #[test]
    fn minor_units_rejects_sub_paisa_precision() {
        assert!(to_minor_units(&dec("0.005")).is_err());
        assert!(to_minor_units(&dec("12.345")).is_err());
    }

    #[test]
    fn minor_units_rejects_non_positive_amounts() {
        assert!(to_minor_units(&dec("0")).is_err());
        assert!(to_minor_units(&dec("-5")).is_err());
    }

    #[test]
    fn draft_rejects_zero_quantity() {
        assert!(matches!(
            draft_with_items(vec![item(0, "10", "0")]),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn draft_rejects_negative_prices() {
        assert!(draft_with_items(vec![item(1, "-10", "0")]).is_err());
        assert!(draft_with_items(vec![item(1, "10", "-1")]).is_err());
    }

    #[test]
    fn draft_accepts_valid_items() {
        let draft = draft_with_items(vec![item(2, "250", "0"), item(1, "250", "10")])
            .expect("draft should validate");
        assert_eq!(draft.items.len(), 2);
    }
}
