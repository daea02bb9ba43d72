use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use vitrine_catalog::{ContactInfo, ProfileId};
use vitrine_shared::{AppError, AppResult, Clock, ErrorCode, Latency};

use crate::card::{validate_card_number, validate_cvv, validate_expiry_date};

/// Card number that passes the checksum but is always declined.
pub const DECLINED_TEST_CARD: &str = "4000000000000002";

// --- Request / Response DTOs ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentRequest {
    pub profile_id: ProfileId,
    #[serde(default)]
    pub amount_cents: u32,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    #[validate(length(min = 1, max = 100, message = "Cardholder name is required"))]
    pub cardholder_name: String,
}

/// Successful charge.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub profile_id: ProfileId,
    pub amount_cents: u32,
    pub contact_info: ContactInfo,
}

/// Wire shape of a payment outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AppResult<PaymentReceipt>> for PaymentResponse {
    fn from(result: &AppResult<PaymentReceipt>) -> Self {
        match result {
            Ok(receipt) => Self {
                success: true,
                transaction_id: Some(receipt.transaction_id.clone()),
                contact_info: Some(receipt.contact_info.clone()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                transaction_id: None,
                contact_info: None,
                error: Some(err.to_string()),
            },
        }
    }
}

// --- Field validation ---

/// Check every card field and report all failures at once, keyed by field name.
/// The error code is the one of the first failing field in form order.
pub fn validate_payment(req: &PaymentRequest, current_month: (i32, u32)) -> AppResult<()> {
    let mut errors: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    let mut first: Option<ErrorCode> = None;
    let mut fail = |field, code, message| {
        errors.insert(field, message);
        first.get_or_insert(code);
    };

    if !validate_card_number(&req.card_number) {
        fail("card_number", ErrorCode::InvalidCardNumber, "Invalid card number");
    }
    if !validate_expiry_date(&req.expiry_date, current_month) {
        fail("expiry_date", ErrorCode::InvalidExpiryDate, "Invalid or expired date");
    }
    if !validate_cvv(&req.cvv) {
        fail("cvv", ErrorCode::InvalidCvv, "Invalid CVV");
    }
    if req.validate().is_err() || req.cardholder_name.trim().is_empty() {
        fail("cardholder_name", ErrorCode::MissingCardholder, "Cardholder name is required");
    }

    match first {
        None => Ok(()),
        Some(code) => Err(AppError::with_details(
            code,
            "Please correct the highlighted card fields",
            serde_json::to_value(&errors).unwrap_or_default(),
        )),
    }
}

// --- Processor ---

/// Stand-in for a payment gateway. Always charges valid cards except
/// [`DECLINED_TEST_CARD`], after a simulated round trip.
pub struct MockProcessor {
    latency: Latency,
    clock: Arc<dyn Clock>,
}

impl MockProcessor {
    pub fn new(latency: Latency, clock: Arc<dyn Clock>) -> Self {
        Self { latency, clock }
    }

    /// Contact payload handed back on every successful charge.
    pub fn stub_contact() -> ContactInfo {
        ContactInfo {
            phone: Some("+1 (555) 123-4567".into()),
            email: Some("contact@example.com".into()),
            telegram: Some("@vitrine_contact".into()),
            whatsapp: Some("+1 555 123 4567".into()),
            other_contact: None,
        }
    }

    pub async fn process_payment(&self, req: &PaymentRequest) -> AppResult<PaymentReceipt> {
        validate_payment(req, self.clock.current_month())?;

        self.latency.pause().await;

        let digits: String = req.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits == DECLINED_TEST_CARD {
            tracing::warn!(profile_id = req.profile_id, "Payment declined");
            return Err(AppError::new(
                ErrorCode::PaymentFailed,
                "Payment was declined. Please try another card.",
            ));
        }

        let receipt = PaymentReceipt {
            transaction_id: format!("txn_{}", Uuid::new_v4().simple()),
            profile_id: req.profile_id,
            amount_cents: req.amount_cents,
            contact_info: Self::stub_contact(),
        };

        tracing::info!(
            profile_id = req.profile_id,
            transaction_id = %receipt.transaction_id,
            amount_cents = receipt.amount_cents,
            "Payment processed"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_shared::FixedClock;

    fn processor() -> MockProcessor {
        MockProcessor::new(Latency::Instant, Arc::new(FixedClock::ymd(2026, 10, 19)))
    }

    fn request() -> PaymentRequest {
        PaymentRequest {
            profile_id: 7,
            amount_cents: 999,
            card_number: "4111 1111 1111 1111".into(),
            expiry_date: "10/26".into(),
            cvv: "123".into(),
            cardholder_name: "Jane Doe".into(),
        }
    }

    #[tokio::test]
    async fn valid_card_returns_stub_contact() {
        let receipt = processor().process_payment(&request()).await.unwrap();
        assert!(receipt.transaction_id.starts_with("txn_"));
        assert_eq!(receipt.profile_id, 7);
        assert_eq!(receipt.contact_info, MockProcessor::stub_contact());
    }

    #[tokio::test]
    async fn transaction_ids_are_unique() {
        let p = processor();
        let a = p.process_payment(&request()).await.unwrap();
        let b = p.process_payment(&request()).await.unwrap();
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[tokio::test]
    async fn all_bad_fields_reported_together() {
        let req = PaymentRequest {
            card_number: "4111 1111 1111 1112".into(),
            expiry_date: "09/26".into(),
            cvv: "1".into(),
            cardholder_name: "  ".into(),
            ..request()
        };
        let err = processor().process_payment(&req).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidCardNumber));

        match err {
            AppError::Known { details: Some(details), .. } => {
                for field in ["card_number", "expiry_date", "cvv", "cardholder_name"] {
                    assert!(details.get(field).is_some(), "missing {field}");
                }
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_failing_field_sets_code() {
        let req = PaymentRequest { cvv: "12".into(), ..request() };
        let err = processor().process_payment(&req).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidCvv));
    }

    #[tokio::test]
    async fn declined_card_fails_payment() {
        let req = PaymentRequest { card_number: "4000 0000 0000 0002".into(), ..request() };
        let result = processor().process_payment(&req).await;
        assert_eq!(result.as_ref().unwrap_err().code(), Some(ErrorCode::PaymentFailed));

        let response = PaymentResponse::from(&result);
        assert!(!response.success);
        assert!(response.contact_info.is_none());
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn response_from_success() {
        let result = processor().process_payment(&request()).await;
        let response = PaymentResponse::from(&result);
        assert!(response.success);
        assert!(response.transaction_id.is_some());
        assert!(response.error.is_none());
    }
}
