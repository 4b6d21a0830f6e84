use async_trait::async_trait;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{
    OrderDetail, OrderDraft, OrderPage, OrderPatch, OrderRecord, UserSummary,
};

/// A payment intent created on the gateway. `raw` carries the gateway's full
/// response so the client-side checkout UI can be driven from it unchanged.
#[derive(Debug, Clone)]
pub struct GatewayIntent {
    pub id: String,
    pub raw: serde_json::Value,
}

/// Remote payment processor. One call per checkout; failures surface as
/// `DomainError::Gateway` and are not retried (no idempotency key scheme).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayIntent, DomainError>;
}

/// Persistent order collection. Methods block on database I/O and are run on
/// the blocking thread pool by the caller.
pub trait OrderStore: Send + Sync + 'static {
    fn create(&self, draft: OrderDraft) -> Result<OrderRecord, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderDetail>, DomainError>;
    fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, DomainError>;
    fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<OrderRecord>, DomainError>;
    fn find_by_user_email_and_id(
        &self,
        email: &str,
        id: Uuid,
    ) -> Result<Option<OrderDetail>, DomainError>;
    /// Atomic update-by-id returning the post-update order, or `None` if no
    /// order exists. Concurrent updates are last-write-wins.
    fn update_fields(&self, id: Uuid, patch: OrderPatch)
        -> Result<Option<OrderRecord>, DomainError>;
    /// Same as `update_fields`, keyed by the gateway's order id. Used only by
    /// payment verification.
    fn update_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
        patch: OrderPatch,
    ) -> Result<Option<OrderRecord>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn count_and_page(&self, page: i64, limit: i64) -> Result<OrderPage, DomainError>;
}

/// Read-only access to the user collaborator entity.
pub trait UserDirectory: Send + Sync + 'static {
    fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserSummary>, DomainError>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<UserSummary>, DomainError>;
}
