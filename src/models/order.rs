//! Order records parsed from the CSV feed.

use serde::Deserialize;

/// One row of the order feed. Immutable once parsed.
///
/// Field names are renamed to match the CSV header row
/// (`Order number,Head,Body,Legs,Address`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Order number")]
    pub order_number: String,
    #[serde(rename = "Head")]
    pub head: String,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "Legs")]
    pub legs: String,
    #[serde(rename = "Address")]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_row() {
        let data = "Order number,Head,Body,Legs,Address\n1,2,1,Red,Stockholm St 1\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let orders: Vec<OrderRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("parse");

        assert_eq!(
            orders,
            vec![OrderRecord {
                order_number: "1".to_string(),
                head: "2".to_string(),
                body: "1".to_string(),
                legs: "Red".to_string(),
                address: "Stockholm St 1".to_string(),
            }]
        );
    }
}
