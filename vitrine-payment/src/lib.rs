pub mod card;
pub mod processor;
pub mod unlock;

pub use card::{format_card_number, format_expiry_date, validate_card_number, validate_cvv, validate_expiry_date};
pub use processor::{validate_payment, MockProcessor, PaymentReceipt, PaymentRequest, PaymentResponse, DECLINED_TEST_CARD};
pub use unlock::{UnlockFlow, UnlockStep, Unlocks};
