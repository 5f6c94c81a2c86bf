// Wire types for the receipt service
//
// The service speaks two dialects: search rows use the spreadsheet column
// headers as keys ("Adm No", "Student's Name"), full receipts use snake_case.
// Both are mapped onto plain Rust structs here. Text fields are lenient
// because the backing sheet hands out numbers and nulls for columns that
// are conceptually text (admission numbers, phone numbers, roll numbers).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One row returned by `GET /search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSummary {
    #[serde(rename = "Receipt", default, deserialize_with = "lenient_text")]
    pub receipt_number: String,
    #[serde(rename = "Student's Name", default, deserialize_with = "lenient_text")]
    pub student_name: String,
    #[serde(rename = "Adm No", default, deserialize_with = "lenient_text")]
    pub admission_no: String,
    #[serde(rename = "Mobile No", default, deserialize_with = "lenient_text")]
    pub mobile: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub session: String,
}

/// Envelope of `GET /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResultSummary>>,
}

impl SearchResponse {
    /// Results in service order; a missing or null list is an empty result
    pub fn into_results(self) -> Vec<SearchResultSummary> {
        self.results.unwrap_or_default()
    }
}

/// A single fee line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub fee_head: String,
    #[serde(default)]
    pub amount: Amount,
}

/// Full receipt as returned by `GET /receipt/adm/<admission_no>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    // Identity
    #[serde(default, deserialize_with = "lenient_text")]
    pub admission_no: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub receipt_no: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub session: String,

    // Person
    #[serde(default, deserialize_with = "lenient_text")]
    pub student_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub course: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub father_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub roll_no: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mobile: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub aadhar: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub caste: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,

    #[serde(default, deserialize_with = "lenient_items")]
    pub fee_items: Vec<FeeItem>,

    // Payment
    #[serde(default, deserialize_with = "lenient_text")]
    pub method: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub payment_details: String,
    #[serde(default)]
    pub paid_amount: Amount,
    #[serde(default)]
    pub fee_total: Amount,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fee_total_words: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub remarks: String,
    #[serde(rename = "user", default, deserialize_with = "lenient_text")]
    pub clerk_user: String,
}

impl ReceiptRecord {
    /// Sum of the numeric fee item amounts, `None` if any amount is not numeric
    pub fn fee_items_sum(&self) -> Option<f64> {
        self.fee_items
            .iter()
            .map(|item| item.amount.as_f64())
            .sum::<Option<f64>>()
    }

    /// Whether the supplied `fee_total` disagrees with the item sum.
    ///
    /// Returns false when either side is not numeric; there is nothing to
    /// compare in that case.
    pub fn total_mismatch(&self) -> bool {
        match (self.fee_items_sum(), self.fee_total.as_f64()) {
            (Some(sum), Some(total)) => (sum - total).abs() > 0.005,
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Amount
// ─────────────────────────────────────────────────────────────────────────────

/// A currency amount exactly as the service supplied it.
///
/// Never rounded or reformatted: `1500` displays as `1500`, `"1,500.00"`
/// displays as `1,500.00`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Numeric value, if the amount is a number or a numeric string
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => n.as_f64(),
            Amount::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => Amount::Number(n),
            serde_json::Value::String(s) => Amount::Text(s),
            serde_json::Value::Null => Amount::default(),
            other => Amount::Text(other.to_string()),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Number(value.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient deserializers
// ─────────────────────────────────────────────────────────────────────────────

/// Accept string, number, bool or null as text
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Accept null as an empty fee list
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<FeeItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FeeItem>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn summary(admission_no: &str, name: &str) -> SearchResultSummary {
        SearchResultSummary {
            receipt_number: format!("R-{}", admission_no),
            student_name: name.to_string(),
            admission_no: admission_no.to_string(),
            mobile: "9812345678".to_string(),
            session: "2024-25".to_string(),
        }
    }

    pub fn receipt(admission_no: &str) -> ReceiptRecord {
        ReceiptRecord {
            admission_no: admission_no.to_string(),
            receipt_no: "4521".to_string(),
            date: "12/04/2024".to_string(),
            session: "2024-25".to_string(),
            student_name: "Simran Kaur".to_string(),
            course: "XI Non-Medical".to_string(),
            father_name: "Harjit Singh".to_string(),
            roll_no: "17".to_string(),
            mobile: "9812345678".to_string(),
            aadhar: "1234 5678 9012".to_string(),
            caste: "General".to_string(),
            address: "Ward 7, Sirsa".to_string(),
            status: "Regular".to_string(),
            fee_items: vec![
                FeeItem {
                    fee_head: "Tuition Fee".to_string(),
                    amount: Amount::from(1500),
                },
                FeeItem {
                    fee_head: "Transport".to_string(),
                    amount: Amount::from(700),
                },
            ],
            method: "UPI".to_string(),
            payment_details: "TXN889911".to_string(),
            paid_amount: Amount::from(2200),
            fee_total: Amount::from(2200),
            fee_total_words: "Two Thousand Two Hundred Only".to_string(),
            remarks: String::new(),
            clerk_user: "ramesh".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_row_uses_sheet_column_names() {
        let row: SearchResultSummary = serde_json::from_value(json!({
            "Receipt": 4521,
            "Student's Name": "Simran Kaur",
            "Adm No": 1001,
            "Mobile No": "9812345678",
            "session": "2024-25"
        }))
        .unwrap();

        assert_eq!(row.receipt_number, "4521");
        assert_eq!(row.admission_no, "1001");
        assert_eq!(row.student_name, "Simran Kaur");
    }

    #[test]
    fn missing_results_is_empty() {
        let resp: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.into_results().is_empty());

        let resp: SearchResponse = serde_json::from_value(json!({ "results": null })).unwrap();
        assert!(resp.into_results().is_empty());
    }

    #[test]
    fn receipt_accepts_nulls_and_numbers() {
        let record: ReceiptRecord = serde_json::from_value(json!({
            "admission_no": "1001",
            "receipt_no": 4521,
            "roll_no": null,
            "fee_items": [
                { "fee_head": "Tuition Fee", "amount": 1500 },
                { "fee_head": "Exam Fee", "amount": "250.50" }
            ],
            "fee_total": 1750.5,
            "fee_total_words": null,
            "paid_amount": "1750.50",
            "user": "ramesh"
        }))
        .unwrap();

        assert_eq!(record.receipt_no, "4521");
        assert_eq!(record.roll_no, "");
        assert_eq!(record.clerk_user, "ramesh");
        assert_eq!(record.fee_items.len(), 2);
        assert_eq!(record.fee_items[1].amount.to_string(), "250.50");
        assert_eq!(record.fee_total.to_string(), "1750.5");
        assert_eq!(record.paid_amount.to_string(), "1750.50");
        assert_eq!(record.fee_total_words, "");
    }

    #[test]
    fn null_amount_is_blank() {
        let item: FeeItem =
            serde_json::from_value(json!({ "fee_head": "Misc", "amount": null })).unwrap();
        assert_eq!(item.amount.to_string(), "");
    }

    #[test]
    fn amount_displays_verbatim() {
        assert_eq!(Amount::from(1500).to_string(), "1500");
        assert_eq!(Amount::Text("1,500.00".into()).to_string(), "1,500.00");
        assert_eq!(Amount::Text("1,500.00".into()).as_f64(), Some(1500.0));
        assert_eq!(Amount::default().as_f64(), None);
    }

    #[test]
    fn total_mismatch_detection() {
        let mut record = fixtures::receipt("1001");
        assert!(!record.total_mismatch());

        record.fee_total = Amount::from(9999);
        assert!(record.total_mismatch());

        // Non-numeric totals are not compared
        record.fee_total = Amount::Text("see office".into());
        assert!(!record.total_mismatch());
    }
}
