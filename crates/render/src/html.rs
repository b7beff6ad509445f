//! HTML invoice layout.
//!
//! Section order is fixed: recipient, invoice details, sender, items, totals,
//! bank details, notes. Downstream tooling and stored copies depend on this
//! structure, so reordering sections or changing when a line is omitted is a
//! breaking change.

use arve_core::format::{format_amount, format_date, format_percent, format_quantity};
use arve_invoicing::{Invoice, LineItem};
use arve_parties::{BankAccount, Party};

use crate::escape::{html_escape, html_escape_multiline};

/// File extension for documents produced by [`render`].
pub const EXTENSION: &str = "html";

const STYLE: &str = r#"
  body { font-family: Arial, Helvetica, sans-serif; font-size: 12px; color: #222; margin: 32px; }
  h1 { font-size: 22px; margin: 0 0 24px; }
  .header { display: flex; justify-content: space-between; margin-bottom: 24px; }
  .party p, .meta p { margin: 2px 0; }
  .meta { text-align: right; }
  .sender { margin-bottom: 24px; }
  table.items { width: 100%; border-collapse: collapse; margin-bottom: 16px; }
  table.items th, table.items td { border-bottom: 1px solid #ccc; padding: 6px 4px; text-align: left; }
  table.items .num { text-align: right; }
  table.totals { margin-left: auto; border-collapse: collapse; }
  table.totals td { padding: 4px 8px; }
  table.totals td.num { text-align: right; }
  table.totals tr.total td { font-weight: bold; font-size: 14px; border-top: 2px solid #222; }
  .bank, .notes { margin-top: 24px; }
  @media print { body { margin: 0; } }
"#;

/// Render a complete HTML document for an invoice.
pub fn render(invoice: &Invoice) -> String {
    let title = html_escape(&invoice.display_number());

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"et\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Arve {title}</title>\n"));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>ARVE nr {title}</h1>\n"));

    html.push_str("<div class=\"header\">\n");
    push_recipient(&mut html, invoice.recipient());
    push_meta(&mut html, invoice);
    html.push_str("</div>\n");

    push_sender(&mut html, invoice.sender());
    push_items(&mut html, invoice.items());
    push_totals(&mut html, invoice);
    push_bank(&mut html, invoice.bank());

    if let Some(notes) = invoice.notes().filter(|n| !n.trim().is_empty()) {
        html.push_str("<div class=\"notes\">\n<p><strong>Märkused</strong></p>\n<p>");
        html.push_str(&html_escape_multiline(notes));
        html.push_str("</p>\n</div>\n");
    }

    html.push_str("</body>\n</html>\n");

    tracing::debug!(
        invoice_number = invoice.invoice_number(),
        bytes = html.len(),
        "invoice rendered"
    );

    html
}

fn push_recipient(html: &mut String, party: &Party) {
    html.push_str("<div class=\"party recipient\">\n<p><strong>Arve saaja</strong></p>\n");
    push_party_lines(html, party);
    html.push_str("</div>\n");
}

fn push_sender(html: &mut String, party: &Party) {
    html.push_str("<div class=\"party sender\">\n<p><strong>Arve väljastaja</strong></p>\n");
    push_party_lines(html, party);
    html.push_str("</div>\n");
}

/// Name, street, city, postal code + region, then identifiers and contacts.
/// Each line only when its value is present.
fn push_party_lines(html: &mut String, party: &Party) {
    let postal = party.postal_line();
    let lines: [(&str, Option<&str>); 8] = [
        ("", Some(party.name.as_str())),
        ("", party.address.as_deref()),
        ("", party.city.as_deref()),
        ("", postal.as_deref()),
        ("Reg. kood: ", party.registration_number.as_deref()),
        ("KMKR: ", party.vat_number.as_deref()),
        ("E-post: ", party.email.as_deref()),
        ("Tel: ", party.phone.as_deref()),
    ];

    for (label, value) in lines {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        html.push_str("<p>");
        html.push_str(label);
        html.push_str(&html_escape(value));
        html.push_str("</p>\n");
    }
}

fn push_meta(html: &mut String, invoice: &Invoice) {
    html.push_str("<div class=\"meta\">\n");
    push_meta_line(html, "Arve nr", &html_escape(&invoice.display_number()));
    push_meta_line(html, "Kuupäev", &format_date(Some(invoice.issue_date())));
    push_meta_line(html, "Maksetähtaeg", &format_date(Some(invoice.due_date())));
    push_meta_line(html, "Viitenumber", &html_escape(invoice.reference_number()));
    if !invoice.late_fee_notice().trim().is_empty() {
        html.push_str("<p class=\"late-fee\">");
        html.push_str(&html_escape(invoice.late_fee_notice()));
        html.push_str("</p>\n");
    }
    html.push_str("</div>\n");
}

fn push_meta_line(html: &mut String, label: &str, escaped_value: &str) {
    html.push_str(&format!("<p>{label}: <strong>{escaped_value}</strong></p>\n"));
}

fn push_items(html: &mut String, items: &[LineItem]) {
    html.push_str("<table class=\"items\">\n<thead><tr>");
    html.push_str("<th>Kirjeldus</th><th class=\"num\">Kogus</th><th>Ühik</th>");
    html.push_str("<th class=\"num\">Ühiku hind</th><th class=\"num\">Summa</th>");
    html.push_str("</tr></thead>\n<tbody>\n");

    for item in items {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            html_escape(item.description()),
            format_quantity(item.quantity()),
            html_escape(item.unit()),
            format_amount(item.unit_price()),
            format_amount(item.amount()),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
}

fn push_totals(html: &mut String, invoice: &Invoice) {
    let totals = invoice.totals();

    html.push_str("<table class=\"totals\">\n");
    html.push_str(&format!(
        "<tr class=\"subtotal\"><td>Summa ilma KM-ta</td><td class=\"num\">{}</td></tr>\n",
        format_amount(totals.subtotal)
    ));
    html.push_str(&format!(
        "<tr class=\"tax\"><td>KM {}%</td><td class=\"num\">{}</td></tr>\n",
        format_percent(invoice.tax_rate()),
        format_amount(totals.tax_amount)
    ));
    html.push_str(&format!(
        "<tr class=\"total\"><td><strong>Kokku tasuda</strong></td><td class=\"num\"><strong>{}</strong></td></tr>\n",
        format_amount(totals.total)
    ));
    html.push_str("</table>\n");
}

/// Bank name with the code in parentheses, then the account. Lines with no
/// value are left out, and so is the whole block for an empty profile.
fn push_bank(html: &mut String, bank: &BankAccount) {
    let name = bank.bank_name.trim();
    let code = bank.bank_code.trim();
    let account = bank.account.trim();
    if name.is_empty() && code.is_empty() && account.is_empty() {
        return;
    }

    html.push_str("<div class=\"bank\">\n");
    if !name.is_empty() || !code.is_empty() {
        let bank_line = match (name.is_empty(), code.is_empty()) {
            (false, false) => format!("{} ({})", html_escape(name), html_escape(code)),
            (false, true) => html_escape(name),
            _ => html_escape(code),
        };
        html.push_str(&format!("<p>Pank: {bank_line}</p>\n"));
    }
    if !account.is_empty() {
        html.push_str(&format!("<p>Arveldusarve: {}</p>\n", html_escape(account)));
    }
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use arve_invoicing::{CompanyProfile, InvoiceBuilder, InvoiceConfig, InvoiceInput, ItemInput};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn builder() -> InvoiceBuilder {
        let config = InvoiceConfig::default().with_company(CompanyProfile::new(
            Party::new("Kolmas Mõõde OÜ")
                .with_address("Telliskivi 60a")
                .with_city("Tallinn")
                .with_postal_code("10412")
                .with_region("Harjumaa")
                .with_registration_number("16000000")
                .with_vat_number("EE102000000")
                .with_email("arve@kolmasmoode.ee")
                .with_phone("+372 5000 0000"),
            BankAccount::new("LHV Pank", "LHVBEE22", "EE717700771001234567"),
        ));
        InvoiceBuilder::new(config).unwrap()
    }

    fn issue() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    fn sample() -> Invoice {
        let input = InvoiceInput::new("123")
            .issued_on(issue())
            .recipient(Party::new("Klient AS").with_city("Tartu"))
            .item(ItemInput::line("Print A", dec!(2), dec!(10.00)))
            .item(ItemInput::line("Print B", dec!(1), dec!(5.00)));
        builder().build(input, issue()).unwrap()
    }

    fn position(doc: &str, needle: &str) -> usize {
        doc.find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not found in document"))
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let doc = render(&sample());
        let recipient = position(&doc, "Arve saaja");
        let meta = position(&doc, "class=\"meta\"");
        let sender = position(&doc, "Arve väljastaja");
        let items = position(&doc, "class=\"items\"");
        let totals = position(&doc, "class=\"totals\"");
        let bank = position(&doc, "class=\"bank\"");

        assert!(recipient < meta);
        assert!(meta < sender);
        assert!(sender < items);
        assert!(items < totals);
        assert!(totals < bank);
    }

    #[test]
    fn metadata_is_localized() {
        let doc = render(&sample());
        assert!(doc.contains("Arve nr: <strong>ARVE-123</strong>"));
        assert!(doc.contains("Kuupäev: <strong>05.03.2025</strong>"));
        assert!(doc.contains("Maksetähtaeg: <strong>12.03.2025</strong>"));
        assert!(doc.contains("Viitenumber: <strong>1232</strong>"));
        assert!(doc.contains("Viivis 0,5% päevas"));
    }

    #[test]
    fn items_keep_their_order_and_formatting() {
        let doc = render(&sample());
        assert!(position(&doc, "Print A") < position(&doc, "Print B"));
        assert!(doc.contains(
            "<tr><td>Print A</td><td class=\"num\">2</td><td>tk</td><td class=\"num\">10,00</td><td class=\"num\">20,00</td></tr>"
        ));
    }

    #[test]
    fn totals_block_shows_rate_and_emphasized_total() {
        let doc = render(&sample());
        assert!(doc.contains("<td>Summa ilma KM-ta</td><td class=\"num\">25,00</td>"));
        assert!(doc.contains("<td>KM 24%</td><td class=\"num\">6,00</td>"));
        assert!(doc.contains("<tr class=\"total\"><td><strong>Kokku tasuda</strong></td><td class=\"num\"><strong>31,00</strong></td></tr>"));
    }

    #[test]
    fn party_lines_follow_field_order() {
        let doc = render(&sample());
        let sender = &doc[position(&doc, "Arve väljastaja")..];
        let order = [
            "Kolmas Mõõde OÜ",
            "Telliskivi 60a",
            "Tallinn",
            "10412 Harjumaa",
            "Reg. kood: 16000000",
            "KMKR: EE102000000",
            "E-post: arve@kolmasmoode.ee",
            "Tel: +372 5000 0000",
        ];
        let positions: Vec<usize> = order.iter().map(|n| position(sender, n)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_recipient_fields_are_omitted() {
        let doc = render(&sample());
        let recipient = &doc[position(&doc, "Arve saaja")..position(&doc, "class=\"meta\"")];
        assert!(recipient.contains("<p>Klient AS</p>"));
        assert!(recipient.contains("<p>Tartu</p>"));
        assert!(!recipient.contains("Reg. kood"));
        assert!(!recipient.contains("KMKR"));
        assert!(!recipient.contains("E-post"));
    }

    #[test]
    fn bank_block_lists_bank_code_and_account() {
        let doc = render(&sample());
        assert!(doc.contains("<p>Pank: LHV Pank (LHVBEE22)</p>"));
        assert!(doc.contains("<p>Arveldusarve: EE717700771001234567</p>"));
    }

    fn builder_with_bank(bank: BankAccount) -> InvoiceBuilder {
        let config = InvoiceConfig::default()
            .with_company(CompanyProfile::new(Party::new("Kolmas Mõõde OÜ"), bank));
        InvoiceBuilder::new(config).unwrap()
    }

    #[test]
    fn missing_bank_details_leave_no_empty_labels() {
        let input = InvoiceInput::new("7").issued_on(issue());
        let doc = render(&builder_with_bank(BankAccount::default()).build(input, issue()).unwrap());
        assert!(!doc.contains("Pank:"));
        assert!(!doc.contains("Arveldusarve:"));
        assert!(!doc.contains(" ()"));
        assert!(!doc.contains("class=\"bank\""));
    }

    #[test]
    fn bank_code_is_optional() {
        let bank = BankAccount::new("LHV Pank", "", "EE717700771001234567");
        let input = InvoiceInput::new("8").issued_on(issue());
        let doc = render(&builder_with_bank(bank).build(input, issue()).unwrap());
        assert!(doc.contains("<p>Pank: LHV Pank</p>"));
        assert!(doc.contains("<p>Arveldusarve: EE717700771001234567</p>"));
    }

    #[test]
    fn notes_only_when_present() {
        assert!(!render(&sample()).contains("Märkused"));

        let input = InvoiceInput::new("5")
            .issued_on(issue())
            .notes("Tasuda <kiiresti>\nAitäh!");
        let doc = render(&builder().build(input, issue()).unwrap());
        assert!(doc.contains("Märkused"));
        assert!(doc.contains("Tasuda &lt;kiiresti&gt;<br>\nAitäh!"));
    }

    #[test]
    fn script_in_recipient_name_is_escaped() {
        let input = InvoiceInput::new("6")
            .issued_on(issue())
            .recipient(Party::new("<script>alert('x')</script>"));
        let doc = render(&builder().build(input, issue()).unwrap());

        assert!(!doc.contains("<script>"));
        assert!(doc.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn zero_item_invoice_renders_zero_totals() {
        let input = InvoiceInput::new("7").issued_on(issue());
        let doc = render(&builder().build(input, issue()).unwrap());

        assert!(doc.contains("<td>Summa ilma KM-ta</td><td class=\"num\">0,00</td>"));
        assert!(doc.contains("<td>KM 24%</td><td class=\"num\">0,00</td>"));
        assert!(doc.contains("<strong>0,00</strong>"));
        assert!(doc.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let invoice = sample();
        assert_eq!(render(&invoice), render(&invoice));
    }
}
