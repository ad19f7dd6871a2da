/*!
 * The order status lifecycle.
 *
 * Every order-status document exchanged with the Allflex API carries one of
 * these values. The wire form of a status is its declared name, matched
 * exactly: no trimming and no case folding.
 */
use std::{fmt, str::FromStr};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// Where an order sits in the fulfillment pipeline.
///
/// Members are declared in pipeline order, so `Ord` follows the pipeline.
/// Nothing here enforces forward-only transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum OrderStatus {
    Invalid = 0,
    Created,
    Error,
    Hold,
    CustomerUpdated,
    Confirmed,
    /// Job in review, prestage.
    InSelection,
    /// Job scheduled and queued.
    Selected,
    InProduction,
    QcChecked,
    Dispatched,
    Shipped,
    Invoiced,
    Canceled,
}

/// Returned when a wire string does not name any [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{value}`")]
pub struct UnknownStatus {
    pub value: String,
}

impl OrderStatus {
    /// Every status, in pipeline order.
    pub const ALL: [OrderStatus; 14] = [
        OrderStatus::Invalid,
        OrderStatus::Created,
        OrderStatus::Error,
        OrderStatus::Hold,
        OrderStatus::CustomerUpdated,
        OrderStatus::Confirmed,
        OrderStatus::InSelection,
        OrderStatus::Selected,
        OrderStatus::InProduction,
        OrderStatus::QcChecked,
        OrderStatus::Dispatched,
        OrderStatus::Shipped,
        OrderStatus::Invoiced,
        OrderStatus::Canceled,
    ];

    /// The exact string the API uses for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Invalid => "Invalid",
            OrderStatus::Created => "Created",
            OrderStatus::Error => "Error",
            OrderStatus::Hold => "Hold",
            OrderStatus::CustomerUpdated => "CustomerUpdated",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InSelection => "InSelection",
            OrderStatus::Selected => "Selected",
            OrderStatus::InProduction => "InProduction",
            OrderStatus::QcChecked => "QcChecked",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Invoiced => "Invoiced",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Numeric code, `Invalid` is 0.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Statuses that do not mark a position in the production pipeline.
    pub fn is_exceptional(&self) -> bool {
        matches!(
            self,
            OrderStatus::Invalid | OrderStatus::Error | OrderStatus::Hold | OrderStatus::Canceled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus { value: s.to_string() })
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(s: &str) -> Result<Self, UnknownStatus> {
        s.parse()
    }
}

impl Serialize for OrderStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(OrderStatusVisitor)
    }
}

struct OrderStatusVisitor;

impl<'de> Visitor<'de> for OrderStatusVisitor {
    type Value = OrderStatus;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an Allflex order status name")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map_err(|e: UnknownStatus| E::custom(e))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_str(&value)
    }
}
