//! Receipt layout
//!
//! `render_receipt` maps a `ReceiptRecord` onto a `ReceiptLayout`: the single
//! description of what a receipt looks like. The TUI draws it, the PDF
//! exporter writes it, the clipboard copies it. Nothing downstream reads the
//! record directly, which keeps the three outputs in step.
//!
//! Values are copied through as supplied. In particular the total row shows
//! `fee_total` from the service, never a sum computed here.

use crate::model::ReceiptRecord;

/// Prefix for every currency value
pub const CURRENCY_GLYPH: &str = "₹";

/// Section title under the institution header
pub const RECEIPT_TITLE: &str = "Fee Receipt";

/// Caption under the clerk's name
pub const CLERK_CAPTION: &str = "Fees Clerk";

/// Fee table column headings
pub const FEE_COLUMNS: [&str; 3] = ["S.No", "Fee Head", "Amount"];

/// Fixed boilerplate printed at the top of every receipt
#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub name: String,
    pub address_lines: Vec<String>,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            name: "Shah Satnam Ji Girls' School".to_string(),
            address_lines: vec![
                "Shah Satnam JI Dham Nejia Khera".to_string(),
                "Near Shah Satnam Ji Pura,".to_string(),
                "Sirsa, Haryana, 125055".to_string(),
                "shahsatnamjigirlsschool.org".to_string(),
            ],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout tree
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    pub header: HeaderBlock,
    /// Label/value grid, in display order
    pub identity: Vec<Field>,
    pub fee_table: FeeTable,
    pub payment: Vec<Field>,
    pub clerk: ClerkBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub institution: String,
    pub address_lines: Vec<String>,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Spans the whole grid row instead of one column pair
    pub full_width: bool,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            full_width: false,
        }
    }

    fn wide(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            full_width: true,
            ..Self::new(label, value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Item,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeRow {
    /// 1-based position for items, empty for the total row
    pub serial: String,
    pub head: String,
    pub amount: String,
    pub kind: RowKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeTable {
    pub columns: [&'static str; 3],
    /// Item rows followed by exactly one total row
    pub rows: Vec<FeeRow>,
}

#[cfg(test)]
impl FeeTable {
    pub fn items(&self) -> impl Iterator<Item = &FeeRow> {
        self.rows.iter().filter(|r| r.kind == RowKind::Item)
    }

    pub fn total(&self) -> Option<&FeeRow> {
        self.rows.iter().find(|r| r.kind == RowKind::Total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClerkBlock {
    pub name: String,
    pub caption: &'static str,
}

/// Format a currency value with the fixed glyph
pub fn money(amount: impl std::fmt::Display) -> String {
    format!("{}{}", CURRENCY_GLYPH, amount)
}

/// Build the layout for one receipt
pub fn render_receipt(record: &ReceiptRecord, institution: &Institution) -> ReceiptLayout {
    let identity = vec![
        Field::new("Admission No", &record.admission_no),
        Field::new("Receipt No", &record.receipt_no),
        Field::new("Date", &record.date),
        Field::new("Session", &record.session),
        Field::new("Student Name", &record.student_name),
        Field::new("Course", &record.course),
        Field::new("Father's Name", &record.father_name),
        Field::new("Roll No", &record.roll_no),
        Field::new("Mobile", &record.mobile),
        Field::new("Aadhar No", &record.aadhar),
        Field::new("Caste", &record.caste),
        Field::wide("Address", &record.address),
        Field::new("Status", &record.status),
    ];

    let mut rows: Vec<FeeRow> = record
        .fee_items
        .iter()
        .enumerate()
        .map(|(idx, item)| FeeRow {
            serial: (idx + 1).to_string(),
            head: item.fee_head.clone(),
            amount: money(&item.amount),
            kind: RowKind::Item,
        })
        .collect();

    rows.push(FeeRow {
        serial: String::new(),
        head: "Total".to_string(),
        amount: money(&record.fee_total),
        kind: RowKind::Total,
    });

    let payment = vec![
        Field::new("Payment Mode", &record.method),
        Field::new("Ref No", &record.payment_details),
        Field::new("Paid Amount", money(&record.paid_amount)),
        Field::new("In Words", &record.fee_total_words),
        Field::new("Remarks", &record.remarks),
    ];

    ReceiptLayout {
        header: HeaderBlock {
            institution: institution.name.clone(),
            address_lines: institution.address_lines.clone(),
            title: RECEIPT_TITLE,
        },
        identity,
        fee_table: FeeTable {
            columns: FEE_COLUMNS,
            rows,
        },
        payment,
        clerk: ClerkBlock {
            name: record.clerk_user.clone(),
            caption: CLERK_CAPTION,
        },
    }
}

impl ReceiptLayout {
    /// Plain-text rendition, block for block
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&self.header.institution);
        out.push('\n');
        for line in &self.header.address_lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(self.header.title);
        out.push_str("\n\n");

        for field in &self.identity {
            out.push_str(&format!("{:<14} {}\n", field.label, field.value));
        }
        out.push('\n');

        let [serial, head, amount] = self.fee_table.columns;
        out.push_str(&format!("{:<5} {:<32} {}\n", serial, head, amount));
        for row in &self.fee_table.rows {
            out.push_str(&format!("{:<5} {:<32} {}\n", row.serial, row.head, row.amount));
        }
        out.push('\n');

        for field in &self.payment {
            out.push_str(&format!("{}: {}\n", field.label, field.value));
        }
        out.push('\n');

        out.push_str(&self.clerk.name);
        out.push('\n');
        out.push_str(self.clerk.caption);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::receipt;
    use crate::model::{Amount, FeeItem};

    #[test]
    fn fee_table_has_items_plus_total() {
        let mut record = receipt("1001");
        for n in [0usize, 1, 2, 7] {
            record.fee_items = (0..n)
                .map(|i| FeeItem {
                    fee_head: format!("Head {}", i),
                    amount: Amount::from(100),
                })
                .collect();
            let layout = render_receipt(&record, &Institution::default());
            assert_eq!(layout.fee_table.rows.len(), n + 1);
            assert_eq!(layout.fee_table.items().count(), n);
            assert_eq!(layout.fee_table.rows.last().unwrap().kind, RowKind::Total);
        }
    }

    #[test]
    fn item_rows_are_numbered_from_one() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let serials: Vec<_> = layout.fee_table.rows.iter().map(|r| r.serial.as_str()).collect();
        assert_eq!(serials, ["1", "2", ""]);
        assert_eq!(layout.fee_table.rows[0].amount, "₹1500");
        assert_eq!(layout.fee_table.rows[1].head, "Transport");
    }

    #[test]
    fn total_row_is_supplied_total_not_sum() {
        let mut record = receipt("1001");
        record.fee_total = Amount::Text("2,150.00".into());

        let layout = render_receipt(&record, &Institution::default());
        let total = layout.fee_table.total().unwrap();
        assert_eq!(total.head, "Total");
        assert_eq!(total.amount, "₹2,150.00");
    }

    #[test]
    fn identity_grid_order_is_fixed() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let labels: Vec<_> = layout.identity.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            [
                "Admission No",
                "Receipt No",
                "Date",
                "Session",
                "Student Name",
                "Course",
                "Father's Name",
                "Roll No",
                "Mobile",
                "Aadhar No",
                "Caste",
                "Address",
                "Status",
            ]
        );
        assert_eq!(layout.identity[0].value, "1001");
        assert!(layout.identity.iter().filter(|f| f.full_width).all(|f| f.label == "Address"));
    }

    #[test]
    fn payment_block_and_clerk() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let paid = layout.payment.iter().find(|f| f.label == "Paid Amount").unwrap();
        assert_eq!(paid.value, "₹2200");
        assert_eq!(layout.clerk.name, "ramesh");
        assert_eq!(layout.clerk.caption, "Fees Clerk");
    }

    #[test]
    fn header_comes_from_institution() {
        let institution = Institution {
            name: "Model School".into(),
            address_lines: vec!["Main Road".into()],
        };
        let layout = render_receipt(&receipt("1001"), &institution);
        assert_eq!(layout.header.institution, "Model School");
        assert_eq!(layout.header.address_lines, ["Main Road"]);
        assert_eq!(layout.header.title, "Fee Receipt");
    }

    #[test]
    fn rendering_is_pure() {
        let record = receipt("1001");
        let institution = Institution::default();
        assert_eq!(
            render_receipt(&record, &institution),
            render_receipt(&record, &institution)
        );
    }

    #[test]
    fn plain_text_keeps_block_order() {
        let text = render_receipt(&receipt("1001"), &Institution::default()).to_plain_text();
        let pos = |needle: &str| text.find(needle).unwrap_or_else(|| panic!("missing {}", needle));

        assert!(pos("Shah Satnam Ji Girls' School") < pos("Fee Receipt"));
        assert!(pos("Fee Receipt") < pos("Admission No"));
        assert!(pos("Admission No") < pos("Tuition Fee"));
        assert!(pos("Tuition Fee") < pos("Total"));
        assert!(pos("Total") < pos("Payment Mode: UPI"));
        assert!(pos("Payment Mode") < pos("Fees Clerk"));
    }
}
