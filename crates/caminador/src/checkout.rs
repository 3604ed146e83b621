//! Built-in checkout workflow walked by `caminador walk`
//!
//! An order is submitted with a package style and a payment method, paid
//! online unless cash on delivery was chosen, gift-wrapped when requested,
//! and finally delivered. Steps talk to a shared in-memory [`OrderService`],
//! so every replayed route creates its own order.

use caminar::{Advance, CaminarResult, Case, Field, Flow, Form, Step};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// State of one order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Order {
    /// Payment settled or not required
    pub confirmed: bool,
    /// Ready to ship
    pub packaged: bool,
    /// Accepted by the customer
    pub delivered: bool,
}

/// Order progress flags set by steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    /// Payment confirmed
    Confirmed,
    /// Packaging done
    Packaged,
    /// Delivery accepted
    Delivered,
}

/// In-memory order store
#[derive(Debug, Default)]
pub struct OrderService {
    orders: HashMap<Uuid, Order>,
}

impl OrderService {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new order
    ///
    /// Cash on delivery needs no online payment; standard packaging needs no
    /// gift wrapping.
    pub fn create_order(&mut self, package: &str, payment: &str) -> Uuid {
        let id = Uuid::new_v4();
        let order = Order {
            confirmed: payment != "online",
            packaged: package != "gift",
            delivered: false,
        };
        self.orders.insert(id, order);
        id
    }

    /// Set one flag, returning the updated order
    pub fn update_order(&mut self, id: Uuid, flag: OrderFlag, value: bool) -> Option<Order> {
        let order = self.orders.get_mut(&id)?;
        match flag {
            OrderFlag::Confirmed => order.confirmed = value,
            OrderFlag::Packaged => order.packaged = value,
            OrderFlag::Delivered => order.delivered = value,
        }
        Some(*order)
    }

    /// Look up an order
    #[must_use]
    pub fn get_order(&self, id: Uuid) -> Option<Order> {
        self.orders.get(&id).copied()
    }

    /// Number of orders created so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order was created
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Forms shared by all steps of one kind
#[derive(Debug)]
struct Forms {
    submit: Arc<Form>,
    payment: Arc<Form>,
    package: Arc<Form>,
    deliver: Arc<Form>,
}

impl Forms {
    fn new() -> CaminarResult<Self> {
        Ok(Self {
            submit: Arc::new(Form::new([
                (
                    "package",
                    Field::choice([("gift wrap", "gift"), ("standard box", "standard")])?,
                ),
                (
                    "payment",
                    Field::choice([("pay online", "online"), ("cash on delivery", "cod")])?,
                ),
            ])?),
            payment: Arc::new(Form::new([(
                "confirmed",
                Field::choice([("confirm payment", true), ("cancel payment", false)])?,
            )])?),
            package: Arc::new(Form::new([(
                "packaged",
                Field::choice([("wrap ok", true), ("wrap failed", false)])?,
            )])?),
            deliver: Arc::new(Form::new([(
                "delivered",
                Field::choice([("delivered", true), ("refused", false)])?,
            )])?),
        })
    }
}

/// Handles shared by every checkout step
#[derive(Debug, Clone)]
pub struct Checkout {
    service: Arc<Mutex<OrderService>>,
    forms: Arc<Forms>,
}

impl Checkout {
    /// Checkout backed by a fresh order store
    pub fn new() -> CaminarResult<Self> {
        Ok(Self {
            service: Arc::new(Mutex::new(OrderService::new())),
            forms: Arc::new(Forms::new()?),
        })
    }

    /// The order store
    #[must_use]
    pub fn service(&self) -> Arc<Mutex<OrderService>> {
        Arc::clone(&self.service)
    }

    /// Start step
    #[must_use]
    pub fn submit(&self) -> SubmitOrder {
        SubmitOrder {
            checkout: self.clone(),
        }
    }

    /// Flow starting at order submission
    #[must_use]
    pub fn flow(&self) -> Flow {
        Flow::new(self.submit())
    }

    fn orders(&self) -> MutexGuard<'_, OrderService> {
        // a panicking step must not stop the rest of the walk
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a boolean field of `case` to the order
    fn record(
        &self,
        order: Uuid,
        case: &Case,
        field: &str,
        flag: OrderFlag,
    ) -> Result<Order, Advance> {
        let value = case
            .get(field)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| Advance::fault(format!("{field} is not a boolean")))?;
        self.orders()
            .update_order(order, flag, value)
            .ok_or_else(|| Advance::fault(format!("order {order} not found")))
    }

    /// Next step for an order that is still open
    fn route(&self, order_id: Uuid, order: Order, otherwise: Advance) -> Advance {
        if order.packaged {
            Advance::next(DeliverGoods {
                checkout: self.clone(),
                order: order_id,
            })
        } else if order.confirmed {
            Advance::next(PackageGift {
                checkout: self.clone(),
                order: order_id,
            })
        } else {
            otherwise
        }
    }
}

/// Submit a new order
#[derive(Debug)]
pub struct SubmitOrder {
    checkout: Checkout,
}

impl Step for SubmitOrder {
    fn name(&self) -> &str {
        "submit order"
    }

    fn form(&self) -> &Form {
        &self.checkout.forms.submit
    }

    fn advance(&self, case: &Case) -> Advance {
        let (Some(package), Some(payment)) = (
            case.get("package").and_then(|v| v.as_text()),
            case.get("payment").and_then(|v| v.as_text()),
        ) else {
            return Advance::fault("package and payment must be text");
        };
        let mut orders = self.checkout.orders();
        let id = orders.create_order(package, payment);
        let Some(order) = orders.get_order(id) else {
            return Advance::fault(format!("order {id} vanished"));
        };
        drop(orders);

        let online = Advance::next(OnlinePayment {
            checkout: self.checkout.clone(),
            order: id,
        });
        self.checkout.route(id, order, online)
    }
}

/// Pay an order online
#[derive(Debug)]
pub struct OnlinePayment {
    checkout: Checkout,
    order: Uuid,
}

impl Step for OnlinePayment {
    fn name(&self) -> &str {
        "online payment"
    }

    fn form(&self) -> &Form {
        &self.checkout.forms.payment
    }

    fn advance(&self, case: &Case) -> Advance {
        let id = self.order;
        match self.checkout.record(id, case, "confirmed", OrderFlag::Confirmed) {
            Ok(order) => self.checkout.route(id, order, Advance::error("order cancelled")),
            Err(fault) => fault,
        }
    }
}

/// Wrap a gift order; a failed wrap is retried
#[derive(Debug)]
pub struct PackageGift {
    checkout: Checkout,
    order: Uuid,
}

impl Step for PackageGift {
    fn name(&self) -> &str {
        "package gift"
    }

    fn form(&self) -> &Form {
        &self.checkout.forms.package
    }

    fn advance(&self, case: &Case) -> Advance {
        let id = self.order;
        match self.checkout.record(id, case, "packaged", OrderFlag::Packaged) {
            Ok(order) => self.checkout.route(id, order, Advance::error("unknown error")),
            Err(fault) => fault,
        }
    }
}

/// Hand the parcel to the customer
#[derive(Debug)]
pub struct DeliverGoods {
    checkout: Checkout,
    order: Uuid,
}

impl Step for DeliverGoods {
    fn name(&self) -> &str {
        "deliver goods"
    }

    fn form(&self) -> &Form {
        &self.checkout.forms.deliver
    }

    fn advance(&self, case: &Case) -> Advance {
        let id = self.order;
        match self.checkout.record(id, case, "delivered", OrderFlag::Delivered) {
            Ok(order) if order.delivered => Advance::finished("order complete"),
            Ok(_) => Advance::error("customer refused delivery"),
            Err(fault) => fault,
        }
    }
}
