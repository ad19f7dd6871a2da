/*!
 * Sample documents as served by the Allflex sandbox.
 */
use allflex_api::{OrderHeader, OrderLineHeader, UserDefinedField, UserDefinedFields};

pub fn new_order() -> OrderHeader {
    OrderHeader {
        ws_order_id: None,
        po: "PO-1001".to_string(),
        customer_number: "C042".to_string(),
        order_date: Some("2024-03-01".to_string()),
        ship_to_name: Some("North Ranch".to_string()),
        order_line_headers: vec![OrderLineHeader {
            line_number: Some(1),
            sku: "TAG-FDX".to_string(),
            quantity: 250,
            user_defined_fields: Some(UserDefinedFields {
                fields: vec![UserDefinedField {
                    key: "Color".to_string(),
                    value: "Yellow".to_string(),
                }],
            }),
        }],
    }
}

pub fn posted_order() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<Document>
  <OrderHeader>
    <WSOrderId>8f14e45f</WSOrderId>
    <PO>PO-1001</PO>
    <CustomerNumber>C042</CustomerNumber>
    <OrderDate>2024-03-01</OrderDate>
    <ShipToName>North Ranch</ShipToName>
    <OrderLineHeader>
      <LineNumber>1</LineNumber>
      <SKU>TAG-FDX</SKU>
      <Quantity>250</Quantity>
      <UserDefinedFields>
        <Field Key="Color">Yellow</Field>
      </UserDefinedFields>
    </OrderLineHeader>
  </OrderHeader>
</Document>"#
}

pub fn pending_orders() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<Document>
  <OrderHeader>
    <WSOrderId>8f14e45f</WSOrderId>
    <PO>PO-1001</PO>
    <CustomerNumber>C042</CustomerNumber>
    <OrderLineHeader>
      <SKU>TAG-FDX</SKU>
      <Quantity>250</Quantity>
      <UserDefinedFields></UserDefinedFields>
    </OrderLineHeader>
  </OrderHeader>
  <OrderHeader>
    <WSOrderId>c9f0f895</WSOrderId>
    <PO>PO-1002</PO>
    <CustomerNumber>C007</CustomerNumber>
  </OrderHeader>
</Document>"#
}

pub fn order_status() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<OrderStatus>
  <WSOrderId>8f14e45f</WSOrderId>
  <OrderId>A-77</OrderId>
  <Status>InProduction</Status>
  <Comment>Line 2 of 3</Comment>
</OrderStatus>"#
}
