//! Return request summary
//!
//! Plain-text body for a delivered return request.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ReturnRequest;

#[derive(Tabled)]
struct AttachmentRow {
    #[tabled(rename = "File")]
    file_name: String,
    #[tabled(rename = "Type")]
    content_type: String,
    #[tabled(rename = "Size")]
    size: String,
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Render a return request for a human reader
pub fn render_text(request: &ReturnRequest) -> String {
    let mut output = String::new();

    output.push_str(&format!("Return Request {}\n", request.id.short()));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Return Date:   {}\n", request.return_date));
    output.push_str(&format!("Urgency:       {}\n\n", request.urgency));

    output.push_str("Customer\n");
    output.push_str(&format!("  Name:        {}\n", request.customer_name));
    output.push_str(&format!("  Email:       {}\n", request.customer_email));
    output.push_str(&format!("  Phone:       {}\n", or_dash(&request.customer_phone)));
    output.push_str(&format!("  Order:       {}\n\n", request.order_number));

    output.push_str("Product\n");
    output.push_str(&format!("  SKU:         {}\n", or_dash(&request.product_sku)));
    output.push_str(&format!("  Name:        {}\n", or_dash(&request.product_name)));
    output.push_str(&format!("  Quantity:    {}\n", request.quantity));
    output.push_str(&format!("  Reason:      {}\n", request.reason));

    if !request.notes.trim().is_empty() {
        output.push_str(&format!("\nNotes:\n{}\n", request.notes.trim()));
    }

    let rows: Vec<AttachmentRow> = request
        .attachments
        .iter()
        .map(|a| AttachmentRow {
            file_name: a.file_name.clone(),
            content_type: a.content_type.clone(),
            size: a.size_display(),
        })
        .collect();
    output.push_str(&format!("\nAttachments ({}):\n", rows.len()));
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');

    output
}

pub fn subject(request: &ReturnRequest) -> String {
    format!(
        "Return request for order {} ({})",
        request.order_number, request.urgency
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, ReturnId, ReturnReason, Urgency};
    use chrono::{NaiveDate, Utc};

    fn request() -> ReturnRequest {
        ReturnRequest {
            id: ReturnId::new(),
            return_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            customer_name: "Ada Lovelace".into(),
            order_number: "ORD-1001".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: String::new(),
            product_sku: "SKU-9".into(),
            product_name: "Kettle".into(),
            quantity: 1,
            reason: ReturnReason::Damaged,
            urgency: Urgency::High,
            notes: "Box was crushed".into(),
            attachments: vec![Attachment::from_bytes("photo.jpg", vec![0; 2048]).unwrap()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&request());
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("Damaged During Shipping"));
        assert!(text.contains("Phone:       -"));
        assert!(text.contains("photo.jpg"));
        assert!(text.contains("Attachments (1)"));
        assert!(text.contains("Box was crushed"));
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            subject(&request()),
            "Return request for order ORD-1001 (High Priority)"
        );
    }
}
