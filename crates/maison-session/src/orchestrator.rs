//! Checkout state machine.

use maison_commerce::checkout::{
    CheckoutStep, ContactDetails, Order, OrderConfirmation, PaymentMethod,
};
use maison_commerce::CommerceError;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::cart_store::CartStore;
use crate::error::SessionError;
use crate::submit::{OrderSubmitter, SubmissionError, DEFAULT_SUBMIT_TIMEOUT};

/// Drives one checkout over a [`CartStore`].
///
/// Three steps: Information gates on contact validation, Payment submits the
/// order, Confirmation is terminal. A new checkout is required for any
/// subsequent order.
pub struct Checkout {
    step: CheckoutStep,
    contact: ContactDetails,
    payment_method: PaymentMethod,
    is_processing: bool,
    confirmation: Option<OrderConfirmation>,
    submit_timeout: Duration,
}

impl Checkout {
    /// Begin a checkout. Refuses an empty cart.
    pub fn begin(cart: &CartStore) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::Information,
            contact: ContactDetails::default(),
            payment_method: PaymentMethod::default(),
            is_processing: false,
            confirmation: None,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        })
    }

    /// Override the submission timeout.
    pub fn with_submit_timeout(mut self, submit_timeout: Duration) -> Self {
        self.submit_timeout = submit_timeout;
        self
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Contact details as last submitted (or edited defaults).
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Check if an order submission is in flight.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Confirmation of the placed order, set only after success.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Re-check the entry guard against the cart.
    ///
    /// A checkout must not sit mid-flow on an empty cart (e.g., after a
    /// reload restored nothing); the one exception is viewing a just-placed
    /// order's confirmation. Returns `true` if the current step is still
    /// valid; otherwise resets to Information and returns `false` so the
    /// caller can route back out.
    pub fn reconcile(&mut self, cart: &CartStore) -> bool {
        if cart.is_empty() && !self.step.is_terminal() {
            self.step = CheckoutStep::Information;
            return false;
        }
        true
    }

    /// Submit contact details, moving Information -> Payment.
    ///
    /// On validation failure the step does not change and the error names
    /// every offending field.
    pub fn submit_information(&mut self, details: ContactDetails) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Information {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str(),
                to: CheckoutStep::Payment.as_str(),
            });
        }
        details.validate()?;
        self.contact = details;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Go back from Payment to Information. Contact details are kept.
    pub fn back_to_information(&mut self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Payment {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str(),
                to: CheckoutStep::Information.as_str(),
            });
        }
        self.step = CheckoutStep::Information;
        Ok(())
    }

    /// Select a payment method. Pure state update, no transition; ignored
    /// once the checkout is terminal.
    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        if !self.step.is_terminal() {
            self.payment_method = method;
        }
    }

    /// Place the order. Only valid from Payment, at most one attempt.
    ///
    /// On success the cart is cleared and the checkout enters Confirmation in
    /// the same synchronous section, so the session never observes a
    /// confirmed order alongside a stale cart. On failure (rejection,
    /// transport, timeout) the checkout stays in Payment and the cart is
    /// untouched; the caller may retry manually.
    pub async fn place_order(
        &mut self,
        cart: &mut CartStore,
        submitter: &dyn OrderSubmitter,
    ) -> Result<OrderConfirmation, SessionError> {
        if self.is_processing {
            return Err(SessionError::SubmissionInFlight);
        }
        if self.step != CheckoutStep::Payment {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str(),
                to: CheckoutStep::Confirmation.as_str(),
            }
            .into());
        }

        let order = Order::from_cart(cart.cart(), self.contact.clone(), self.payment_method)?;
        self.is_processing = true;

        let outcome = match timeout(self.submit_timeout, submitter.submit(&order)).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::TimedOut(self.submit_timeout)),
        };
        self.is_processing = false;

        match outcome {
            Ok(confirmation) => {
                cart.clear();
                self.confirmation = Some(confirmation.clone());
                self.step = CheckoutStep::Confirmation;
                info!(order = %confirmation.order_number, "order placed");
                Ok(confirmation)
            }
            Err(e) => {
                warn!(order = %order.order_number, error = %e, "order submission failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use maison_commerce::catalog::Product;
    use maison_commerce::{Currency, Money, SessionId};

    struct AcceptAll;

    #[async_trait]
    impl OrderSubmitter for AcceptAll {
        async fn submit(&self, order: &Order) -> Result<OrderConfirmation, SubmissionError> {
            Ok(order.confirmation())
        }
    }

    struct RejectAll;

    #[async_trait]
    impl OrderSubmitter for RejectAll {
        async fn submit(&self, _order: &Order) -> Result<OrderConfirmation, SubmissionError> {
            Err(SubmissionError::Rejected("card declined".into()))
        }
    }

    fn stocked_store() -> CartStore {
        let mut store = CartStore::new(SessionId::generate(), Box::new(MemoryStorage::new()));
        let p = Product::new("duvet", "Duvet", Money::new(12_000, Currency::GBP));
        store.add_item(&p, 1, "King", "White").unwrap();
        store
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address: "12 Regent Street".into(),
            city: "London".into(),
            postcode: "W1B 5TH".into(),
            phone: "+44 20 7946 0823".into(),
            save_info: true,
        }
    }

    #[test]
    fn test_begin_requires_items() {
        let empty = CartStore::new(SessionId::generate(), Box::new(MemoryStorage::new()));
        assert!(matches!(
            Checkout::begin(&empty),
            Err(CommerceError::EmptyCart)
        ));
        assert!(Checkout::begin(&stocked_store()).is_ok());
    }

    #[test]
    fn test_information_gates_on_validation() {
        let store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();

        let mut details = contact();
        details.email = String::new();
        assert!(checkout.submit_information(details).is_err());
        assert_eq!(checkout.step(), CheckoutStep::Information);

        checkout.submit_information(contact()).unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_back_to_information_keeps_details() {
        let store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();

        checkout.back_to_information().unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Information);
        assert_eq!(checkout.contact().email, "ada@example.com");

        // Back is only an edge out of Payment.
        assert!(checkout.back_to_information().is_err());
    }

    #[test]
    fn test_select_payment_method_is_not_a_transition() {
        let store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.select_payment_method(PaymentMethod::PayPal);
        assert_eq!(checkout.step(), CheckoutStep::Information);
        assert_eq!(checkout.payment_method(), PaymentMethod::PayPal);
    }

    #[test]
    fn test_reconcile_redirects_on_empty_cart() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();

        store.clear();
        assert!(!checkout.reconcile(&store));
        assert_eq!(checkout.step(), CheckoutStep::Information);
    }

    #[tokio::test]
    async fn test_reconcile_allows_confirmation_view() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();
        checkout.place_order(&mut store, &AcceptAll).await.unwrap();

        // Cart is empty now, but the confirmation must stay viewable.
        assert!(checkout.reconcile(&store));
        assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    }

    #[tokio::test]
    async fn test_place_order_requires_payment_step() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();

        let err = checkout.place_order(&mut store, &AcceptAll).await;
        assert!(matches!(
            err,
            Err(SessionError::Commerce(
                CommerceError::InvalidCheckoutTransition { .. }
            ))
        ));
        assert_eq!(checkout.step(), CheckoutStep::Information);
    }

    #[tokio::test]
    async fn test_place_order_success_clears_cart() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();

        let confirmation = checkout.place_order(&mut store, &AcceptAll).await.unwrap();

        assert_eq!(checkout.step(), CheckoutStep::Confirmation);
        assert_eq!(store.item_count(), 0);
        assert!(!checkout.is_processing());
        assert!(confirmation.order_number.starts_with("RL-"));
        assert_eq!(checkout.confirmation(), Some(&confirmation));
    }

    #[tokio::test]
    async fn test_place_order_failure_preserves_cart() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();

        let err = checkout.place_order(&mut store, &RejectAll).await;
        assert!(matches!(
            err,
            Err(SessionError::Submission(SubmissionError::Rejected(_)))
        ));
        assert_eq!(checkout.step(), CheckoutStep::Payment);
        assert_eq!(store.item_count(), 1);
        assert!(!checkout.is_processing());
        assert!(checkout.confirmation().is_none());
    }

    #[tokio::test]
    async fn test_no_second_order_after_confirmation() {
        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store).unwrap();
        checkout.submit_information(contact()).unwrap();
        checkout.place_order(&mut store, &AcceptAll).await.unwrap();

        // Terminal: a new checkout is required for the next order.
        let err = checkout.place_order(&mut store, &AcceptAll).await;
        assert!(matches!(err, Err(SessionError::Commerce(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_timeout() {
        struct NeverAnswers;

        #[async_trait]
        impl OrderSubmitter for NeverAnswers {
            async fn submit(&self, _order: &Order) -> Result<OrderConfirmation, SubmissionError> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("submission never completes");
            }
        }

        let mut store = stocked_store();
        let mut checkout = Checkout::begin(&store)
            .unwrap()
            .with_submit_timeout(Duration::from_millis(250));
        checkout.submit_information(contact()).unwrap();

        let err = checkout.place_order(&mut store, &NeverAnswers).await;
        assert!(matches!(
            err,
            Err(SessionError::Submission(SubmissionError::TimedOut(_)))
        ));
        assert_eq!(checkout.step(), CheckoutStep::Payment);
        assert_eq!(store.item_count(), 1);
        assert!(!checkout.is_processing());
    }
}
