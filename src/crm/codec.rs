//! # Line Format
//!
//! Customers are persisted as a single text blob, one record per line, fields
//! joined by `|` in a fixed order:
//!
//! ```text
//! customerName|companyName|email|phone|status|assignee|notes|createdAt
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline.
//!
//! ## Known Limitation: No Escaping
//!
//! A field containing `|` or a newline is written as-is. Decoding splits
//! positionally, so such a value spills into the following fields (or into
//! a new line). Only the first [`FIELD_COUNT`] parts of a line are used.
//!
//! ## Ids
//!
//! The id is not part of the line. Decoding numbers the surviving lines
//! `1..=n`, which makes the position of a line its id.

use crate::error::{CrmError, Result};
use crate::model::{today, Customer, CustomerId};

pub const DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 8;

pub fn encode(customers: &[Customer]) -> String {
    customers
        .iter()
        .map(encode_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn encode_line(customer: &Customer) -> String {
    [
        customer.customer_name.as_str(),
        customer.company_name.as_str(),
        customer.email.as_str(),
        customer.phone.as_str(),
        customer.status.as_str(),
        customer.assignee.as_str(),
        customer.notes.as_str(),
        customer.created_at.as_str(),
    ]
    .join("|")
}

/// Decodes raw persisted bytes. Fails only when the bytes are not UTF-8.
pub fn decode_bytes(raw: &[u8]) -> Result<Vec<Customer>> {
    let text = std::str::from_utf8(raw).map_err(|e| CrmError::Decode(e.to_string()))?;
    Ok(decode(text))
}

pub fn decode(blob: &str) -> Vec<Customer> {
    blob.split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| decode_line(i as CustomerId + 1, line))
        .collect()
}

pub fn decode_line(id: CustomerId, line: &str) -> Customer {
    let mut parts = line.split(DELIMITER).take(FIELD_COUNT);
    let mut next = || parts.next().unwrap_or_default().to_string();

    let customer_name = next();
    let company_name = next();
    let email = next();
    let phone = next();
    let status = next();
    let assignee = next();
    let notes = next();
    let created_at = match next() {
        date if date.is_empty() => today(),
        date => date,
    };

    Customer {
        id,
        customer_name,
        company_name,
        email,
        phone,
        status,
        assignee,
        notes,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_customers, CustomerFields};

    #[test]
    fn encodes_fields_in_fixed_order() {
        let customer = Customer::with_date(
            1,
            CustomerFields {
                customer_name: "A".into(),
                company_name: "B".into(),
                email: "a@b.c".into(),
                phone: "123".into(),
                status: "New".into(),
                assignee: "Sam".into(),
                notes: "hi".into(),
            },
            "2025-02-03".into(),
        );

        assert_eq!(encode_line(&customer), "A|B|a@b.c|123|New|Sam|hi|2025-02-03");
    }

    #[test]
    fn joins_lines_without_trailing_newline() {
        let blob = encode(&sample_customers());
        assert_eq!(blob.lines().count(), 3);
        assert!(!blob.ends_with('\n'));
    }

    #[test]
    fn round_trip_preserves_fields_order_and_positional_ids() {
        let customers = sample_customers();
        let decoded = decode(&encode(&customers));
        assert_eq!(decoded, customers);
    }

    #[test]
    fn empty_blob_decodes_to_nothing() {
        assert!(decode("").is_empty());
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn whitespace_only_lines_are_dropped_and_ids_skip_them() {
        let blob = "A|||||||2025-01-01\n   \n\nB|||||||2025-01-02\n";
        let decoded = decode(blob);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].id, 1);
        assert_eq!(decoded[1].id, 2);
        assert_eq!(decoded[1].customer_name, "B");
    }

    #[test]
    fn missing_trailing_fields_default_to_empty_and_today() {
        let decoded = decode_line(1, "Only Name|Corp");
        assert_eq!(decoded.customer_name, "Only Name");
        assert_eq!(decoded.company_name, "Corp");
        assert_eq!(decoded.email, "");
        assert_eq!(decoded.status, "");
        assert_eq!(decoded.notes, "");
        assert_eq!(decoded.created_at, today());
    }

    #[test]
    fn empty_date_field_defaults_to_today() {
        let decoded = decode_line(1, "A|B|||New|||");
        assert_eq!(decoded.status, "New");
        assert_eq!(decoded.created_at, today());
    }

    #[test]
    fn pipe_inside_notes_is_split_positionally() {
        let line = "A|B|e|p|New|Sam|call | then email|2025-01-01";
        let decoded = decode_line(1, line);
        assert_eq!(decoded.notes, "call ");
        assert_eq!(decoded.created_at, " then email");
    }

    #[test]
    fn newline_inside_notes_becomes_a_new_record() {
        let mut customer = sample_customers().remove(0);
        customer.notes = "first\nsecond".into();
        let decoded = decode(&encode(&[customer]));
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].notes, "first");
        assert_eq!(decoded[1].customer_name, "second");
    }

    #[test]
    fn decode_bytes_rejects_invalid_utf8() {
        let err = decode_bytes(&[b'A', b'|', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CrmError::Decode(_)));
    }

    #[test]
    fn decode_bytes_accepts_utf8() {
        let decoded = decode_bytes("佐藤|デモ".as_bytes()).unwrap();
        assert_eq!(decoded[0].customer_name, "佐藤");
        assert_eq!(decoded[0].company_name, "デモ");
    }
}
