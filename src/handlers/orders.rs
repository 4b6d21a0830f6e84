use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::{CreateOrderCommand, PAGE_SIZE};
use crate::domain::order::{
    AddressSummary, OrderDetail, OrderItemDetail, OrderItemInput, OrderItemView, OrderRecord,
    OrderStatus, PaymentStatus, PaymentView, ProductSummary, UserSummary,
};
use crate::errors::AppError;
use crate::AppOrderService;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(rename = "productId")]
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    /// Decimal amount, accepted as a JSON number or string, e.g. 499.99
    #[serde(rename = "totalPrice")]
    #[schema(value_type = f64)]
    pub total_price: BigDecimal,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub discount: Option<BigDecimal>,
}

/// Checkout body. Every field is optional on the wire; missing fields are
/// reported as a single validation failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    pub products: Option<Vec<OrderItemRequest>>,
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<BigDecimal>,
    pub delivery_address: Option<Uuid>,
}

/// Payment callback body, field names as sent by the gateway's checkout
/// widget.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub order_status: String,
    pub shipping_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
    #[schema(value_type = f64)]
    pub amount_paid: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackOrderParams {
    pub email: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            name: u.username,
            email: u.email,
            phone: u.phone_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressSummary> for AddressResponse {
    fn from(a: AddressSummary) -> Self {
        Self {
            id: a.id,
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
    pub quantity: i32,
    pub total_price: String,
    pub discount: String,
}

/// Payment block with the gateway's wire field names.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment_method: String,
    pub amount_paid: String,
    #[schema(value_type = String)]
    pub payment_status: PaymentStatus,
    pub payment_date: String,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

impl From<PaymentView> for PaymentResponse {
    fn from(p: PaymentView) -> Self {
        Self {
            payment_method: p.method,
            amount_paid: p.amount_paid.to_string(),
            payment_status: p.status,
            payment_date: p.payment_date.to_rfc3339(),
            razorpay_order_id: p.gateway_order_id,
            razorpay_payment_id: p.gateway_payment_id,
            razorpay_signature: p.gateway_signature,
        }
    }
}

/// Order as returned to clients. The `user` and `delivery_address`
/// expansions are present on read endpoints and omitted on write responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    pub products: Vec<OrderItemResponse>,
    pub total_amount: String,
    #[schema(value_type = String)]
    pub order_status: OrderStatus,
    pub delivery_address_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<AddressResponse>,
    pub shipping_date: Option<String>,
    pub delivery_date: Option<String>,
    pub payment: PaymentResponse,
    pub created_at: String,
    pub updated_at: String,
}

fn item_response(item: OrderItemView) -> OrderItemResponse {
    OrderItemResponse {
        id: item.id,
        product_id: item.product_id,
        product: None,
        quantity: item.quantity,
        total_price: item.total_price.to_string(),
        discount: item.discount.to_string(),
    }
}

fn item_detail_response(item: OrderItemDetail) -> OrderItemResponse {
    OrderItemResponse {
        id: item.id,
        product_id: item.product_id,
        product: item.product.map(|p: ProductSummary| ProductResponse {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
        }),
        quantity: item.quantity,
        total_price: item.total_price.to_string(),
        discount: item.discount.to_string(),
    }
}

impl From<OrderRecord> for OrderResponse {
    fn from(o: OrderRecord) -> Self {
        Self {
            id: o.id,
            user_id: Some(o.user_id),
            user: None,
            products: o.items.into_iter().map(item_response).collect(),
            total_amount: o.total_amount.to_string(),
            order_status: o.status,
            delivery_address_id: o.delivery_address_id,
            delivery_address: None,
            shipping_date: o.shipping_date.map(|d| d.to_rfc3339()),
            delivery_date: o.delivery_date.map(|d| d.to_rfc3339()),
            payment: o.payment.into(),
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
        }
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(o: OrderDetail) -> Self {
        Self {
            id: o.id,
            user_id: o.user.as_ref().map(|u| u.id),
            user: o.user.map(Into::into),
            products: o.items.into_iter().map(item_detail_response).collect(),
            total_amount: o.total_amount.to_string(),
            order_status: o.status,
            delivery_address_id: o.delivery_address_id,
            delivery_address: o.delivery_address.map(Into::into),
            shipping_date: o.shipping_date.map(|d| d.to_rfc3339()),
            delivery_date: o.delivery_date.map(|d| d.to_rfc3339()),
            payment: o.payment.into(),
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/create-order
///
/// Creates a payment intent at the gateway, then persists the order as
/// Pending. The response carries the raw gateway intent so the client can
/// open the checkout widget with it.
#[utoipa::path(
    post,
    path = "/orders/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created, payment pending"),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Gateway or internal error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppOrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let cmd = CreateOrderCommand {
        user_id: body.user_id,
        items: body.products.map(|items| {
            items
                .into_iter()
                .map(|i| OrderItemInput {
                    product_id: i.product_id,
                    quantity: i.quantity,
                    total_price: i.total_price,
                    discount: i.discount.unwrap_or_else(|| BigDecimal::from(0)),
                })
                .collect()
        }),
        total_amount: body.total_amount,
        delivery_address_id: body.delivery_address,
    };

    let placed = service.create_order(cmd).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "order": OrderResponse::from(placed.order),
        "razorpayOrder": placed.gateway_intent.raw,
        "user": UserResponse::from(placed.user),
    })))
}

/// POST /orders/verify-payment
///
/// Validates the checkout callback signature and confirms the order. A bad
/// signature is rejected without touching the order.
#[utoipa::path(
    post,
    path = "/orders/verify-payment",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, order confirmed"),
        (status = 400, description = "Invalid payment signature"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn verify_payment(
    service: web::Data<AppOrderService>,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order = service
        .verify_payment(
            body.razorpay_order_id,
            body.razorpay_payment_id,
            body.razorpay_signature,
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Payment verified successfully",
        "order": OrderResponse::from(order),
    })))
}

/// GET /orders/fetch-all-orders
///
/// Paginated list of all orders, newest first, ten per page.
#[utoipa::path(
    get,
    path = "/orders/fetch-all-orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppOrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.max(1);
    let result = service.list_orders(page).await?;
    let total_pages = (result.total + PAGE_SIZE - 1) / PAGE_SIZE;
    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        orders: result.orders.into_iter().map(Into::into).collect(),
        current_page: page,
        total_pages,
        total_orders: result.total,
    }))
}

/// GET /orders/fetch-order-by-id/{id}
#[utoipa::path(
    get,
    path = "/orders/fetch-order-by-id/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderResponse::from(order) })))
}

/// GET /orders/fetch-order-by-userId/{userId}
///
/// All orders of a user, newest first. A user with no orders is a 404.
#[utoipa::path(
    get,
    path = "/orders/fetch-order-by-userId/{userId}",
    params(("userId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Orders found"),
        (status = 404, description = "No orders for this user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders_by_user(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let orders = service.get_orders_by_user(path.into_inner()).await?;
    let orders: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

/// GET /orders/fetch-order-by-for-tracking?email=&orderId=
///
/// Anonymous tracking lookup for customers without a session.
#[utoipa::path(
    get,
    path = "/orders/fetch-order-by-for-tracking",
    params(
        ("email" = String, Query, description = "Purchaser email"),
        ("orderId" = String, Query, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found"),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 404, description = "User or order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn track_order(
    service: web::Data<AppOrderService>,
    query: web::Query<TrackOrderParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let (Some(email), Some(order_id)) = (params.email, params.order_id) else {
        return Err(AppError::Validation(
            "email and orderId are required".to_string(),
        ));
    };
    let order_id = Uuid::parse_str(&order_id)
        .map_err(|_| AppError::Validation("Invalid order id".to_string()))?;

    let order = service.track_order(email, order_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderResponse::from(order) })))
}

/// PUT /orders/update-order-status/{id}/status
#[utoipa::path(
    put,
    path = "/orders/update-order-status/{id}/status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown order status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let status = OrderStatus::from_str(&body.order_status).map_err(AppError::from)?;
    let order = service
        .update_order_status(
            path.into_inner(),
            status,
            body.shipping_date,
            body.delivery_date,
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderResponse::from(order) })))
}

/// PUT /orders/update-order-status-admin-page/{orderId}
///
/// Same write as the regular status update, but the id arrives as an
/// opaque string and is validated explicitly so the admin UI gets a 400
/// rather than a routing miss on malformed ids.
#[utoipa::path(
    put,
    path = "/orders/update-order-status-admin-page/{orderId}",
    params(("orderId" = String, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Malformed order id or unknown status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status_admin(
    service: web::Data<AppOrderService>,
    path: web::Path<String>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| AppError::Validation("Invalid order id".to_string()))?;
    let body = body.into_inner();
    let status = OrderStatus::from_str(&body.order_status).map_err(AppError::from)?;
    let order = service
        .update_order_status(id, status, body.shipping_date, body.delivery_date)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderResponse::from(order) })))
}

/// PUT /orders/update-payment-status/{id}/payment
///
/// Manual payment correction for the admin UI. Does not go through
/// signature verification and never writes the gateway payment id or
/// signature.
#[utoipa::path(
    put,
    path = "/orders/update-payment-status/{id}/payment",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Payment fields updated"),
        (status = 400, description = "Unknown payment status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_payment_status(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePaymentStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let status = PaymentStatus::from_str(&body.payment_status).map_err(AppError::from)?;
    let order = service
        .update_payment_status(path.into_inner(), status, body.amount_paid)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderResponse::from(order) })))
}

/// DELETE /orders/delete-order/{id}
#[utoipa::path(
    delete,
    path = "/orders/delete-order/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Order deleted successfully" })))
}
