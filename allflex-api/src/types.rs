/*!
 * The XML documents exchanged with the Allflex API.
 *
 * Only the fields this client reads or writes are modeled; the vendor owns the
 * full schema.
 */
use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{status::OrderStatus, AllflexError};

/// Import and export for the root XML documents.
pub trait XmlDocument: Serialize + DeserializeOwned {
    /// Parse a document from XML text.
    fn from_xml(xml: &str) -> Result<Self, AllflexError> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Render the document as XML text.
    fn to_xml(&self) -> Result<String, AllflexError> {
        Ok(quick_xml::se::to_string(self)?)
    }
}

/// A batch of orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Document")]
pub struct Document {
    #[serde(rename = "OrderHeader", default)]
    pub order_headers: Vec<OrderHeader>,
}

impl XmlDocument for Document {}

impl Document {
    /// Drop user-defined-field blocks that came back without any fields.
    pub fn prune_empty_user_defined_fields(&mut self) {
        for order in self.order_headers.iter_mut() {
            for line in order.order_line_headers.iter_mut() {
                if line.user_defined_fields.as_ref().map(|u| u.fields.is_empty()).unwrap_or(false) {
                    line.user_defined_fields = None;
                }
            }
        }
    }
}

/// A single purchase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "OrderHeader")]
pub struct OrderHeader {
    /// Identifier assigned by the web service once the order is accepted.
    #[serde(rename = "WSOrderId", default, skip_serializing_if = "Option::is_none")]
    pub ws_order_id: Option<String>,
    #[serde(rename = "PO", default)]
    pub po: String,
    #[serde(rename = "CustomerNumber", default)]
    pub customer_number: String,
    #[serde(rename = "OrderDate", default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(rename = "ShipToName", default, skip_serializing_if = "Option::is_none")]
    pub ship_to_name: Option<String>,
    #[serde(rename = "OrderLineHeader", default)]
    pub order_line_headers: Vec<OrderLineHeader>,
}

impl XmlDocument for OrderHeader {}

impl OrderHeader {
    /// The file name a pulled order is saved under. Characters that are not
    /// allowed in a file name are replaced with `_`.
    pub fn file_name(&self, pulled_at: DateTime<Local>) -> String {
        format!(
            "API_Pull_{}_{}_{}.xml",
            file_name_component(&self.customer_number),
            file_name_component(&self.po),
            pulled_at.format("%Y%m%d%H%M%S%3f")
        )
    }
}

fn file_name_component(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// A line on a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLineHeader {
    #[serde(rename = "LineNumber", default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(rename = "SKU", default)]
    pub sku: String,
    #[serde(rename = "Quantity", default)]
    pub quantity: u32,
    #[serde(rename = "UserDefinedFields", default, skip_serializing_if = "Option::is_none")]
    pub user_defined_fields: Option<UserDefinedFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedFields {
    #[serde(rename = "Field", default)]
    pub fields: Vec<UserDefinedField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedField {
    #[serde(rename = "@Key")]
    pub key: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// The status of one order as reported to, or by, the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "OrderStatus")]
pub struct OrderStatusDocument {
    #[serde(rename = "WSOrderId", default)]
    pub ws_order_id: String,
    #[serde(rename = "OrderId", default)]
    pub order_id: String,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl XmlDocument for OrderStatusDocument {}

impl OrderStatusDocument {
    pub fn new<W, O>(ws_order_id: W, order_id: O, status: OrderStatus) -> Self
    where
        W: ToString,
        O: ToString,
    {
        Self {
            ws_order_id: ws_order_id.to_string(),
            order_id: order_id.to_string(),
            status,
            comment: None,
        }
    }
}

/// Write every order in the document to its own XML file under `dir`.
pub fn save_orders<P>(document: &Document, dir: P) -> Result<Vec<PathBuf>, AllflexError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(document.order_headers.len());
    for order in &document.order_headers {
        let path = dir.join(order.file_name(Local::now()));
        fs::write(&path, order.to_xml()?)?;
        log::info!("wrote order {} for customer {}: {}", order.po, order.customer_number, path.display());
        paths.push(path);
    }

    Ok(paths)
}
