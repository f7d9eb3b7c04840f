use serde::{Deserialize, Serialize};

use super::{CartSnapshot, LineItem};

/// Contact details captured on the order form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// First required field left blank, in form order.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

/// Everything the checkout consumer needs besides the cart itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub payment_method: PaymentMethod,
    /// Cash handed over by the customer; ignored for card payments.
    pub customer_cash: f64,
}

impl CheckoutRequest {
    pub fn cash(customer: Customer, customer_cash: f64) -> Self {
        Self {
            customer,
            payment_method: PaymentMethod::Cash,
            customer_cash,
        }
    }

    pub fn card(customer: Customer) -> Self {
        Self {
            customer,
            payment_method: PaymentMethod::Card,
            customer_cash: 0.0,
        }
    }
}

/// Order summary shown for confirmation, and kept as the receipt afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReview {
    pub customer: Customer,
    pub payment_method: PaymentMethod,
    pub items: Vec<LineItem>,
    pub total: f64,
    pub change_due: Option<f64>,
}

impl OrderReview {
    pub fn new(request: CheckoutRequest, snapshot: CartSnapshot) -> Self {
        let change_due = change_due(request.payment_method, request.customer_cash, snapshot.total);
        Self {
            customer: request.customer,
            payment_method: request.payment_method,
            items: snapshot.items,
            total: snapshot.total,
            change_due,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Change owed to a cash customer who overpaid. Exact or short payments owe nothing.
pub fn change_due(method: PaymentMethod, customer_cash: f64, total: f64) -> Option<f64> {
    match method {
        PaymentMethod::Cash if customer_cash > total => Some(customer_cash - total),
        _ => None,
    }
}
