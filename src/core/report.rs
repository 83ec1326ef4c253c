//! Report generation - display-ready figures for groups and invoices.
//!
//! This is the only place amounts are rounded. Everything upstream keeps
//! full precision; the functions here round to cents for display and return
//! structured data or plain text the presentation layer can show as-is.

use crate::{
    core::{
        balance::GroupSummary,
        lifecycle,
        split::{ItemBreakdown, ItemSplits, compute_member_totals, item_breakdown},
    },
    entities::{Group, Invoice, InvoiceId, Member, MemberId},
};
use chrono::NaiveDate;

/// Display data for one member column of an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberColumn {
    /// Member the column belongs to
    pub member_id: MemberId,
    /// Compact name for the header
    pub short_name: String,
    /// Initials avatar
    pub avatar: String,
    /// Avatar colour
    pub color: String,
    /// Amount owed under the current assignment, rounded to cents
    pub total: f64,
}

/// Everything needed to render an invoice's split table.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceReport {
    /// Invoice being reported on
    pub invoice_id: InvoiceId,
    /// Invoice display name
    pub name: String,
    /// Merchant
    pub merchant: String,
    /// Purchase date
    pub date: NaiveDate,
    /// Status badge text
    pub status_label: &'static str,
    /// Stored total, rounded to cents
    pub total: f64,
    /// Sum of item totals, rounded to cents
    pub items_subtotal: f64,
    /// Per-line figures
    pub rows: Vec<ItemBreakdown>,
    /// One column per current roster member, in roster order
    pub members: Vec<MemberColumn>,
    /// Completeness warning, if any
    pub warning: Option<&'static str>,
}

/// Rounds to two decimal places for display.
#[must_use]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats an amount like `$8.33`, or `-$8.33` when negative.
#[must_use]
pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    let rounded = round_to_cents(amount);
    if rounded < 0.0 {
        format!("-{currency_symbol}{:.2}", rounded.abs())
    } else {
        format!("{currency_symbol}{:.2}", rounded.abs())
    }
}

/// Builds the split table for an invoice under a working or persisted assignment.
///
/// Only roster members get a column; assignments of former members still
/// count towards the per-item share but are not shown.
#[must_use]
pub fn generate_invoice_report(
    invoice: &Invoice,
    roster: &[Member],
    splits: &ItemSplits,
) -> InvoiceReport {
    let totals = compute_member_totals(invoice, splits);
    let members = roster
        .iter()
        .map(|member| MemberColumn {
            member_id: member.id,
            short_name: member.short_name().to_string(),
            avatar: member.avatar.clone(),
            color: member.color.clone(),
            total: round_to_cents(totals.get(&member.id).copied().unwrap_or(0.0)),
        })
        .collect();

    InvoiceReport {
        invoice_id: invoice.id,
        name: invoice.name.clone(),
        merchant: invoice.merchant.clone(),
        date: invoice.date,
        status_label: invoice.status.label(),
        total: round_to_cents(invoice.total),
        items_subtotal: round_to_cents(invoice.items_subtotal()),
        rows: item_breakdown(invoice, splits),
        members,
        warning: lifecycle::completeness_warning(invoice, splits),
    }
}

/// Renders an invoice report as plain text.
#[must_use]
pub fn render_invoice_report(report: &InvoiceReport, currency_symbol: &str) -> String {
    let money = |amount: f64| format_amount(amount, currency_symbol);
    let mut lines = vec![
        format!("**{}** [{}]", report.name, report.status_label),
        format!(
            "{} · {} · {}",
            report.merchant,
            report.date.format("%B %-d, %Y"),
            money(report.total)
        ),
    ];
    if (report.total - report.items_subtotal).abs() >= 0.005 {
        lines.push(format!("Items subtotal: {}", money(report.items_subtotal)));
    }
    if let Some(warning) = report.warning {
        lines.push(format!("⚠️ {warning}"));
    }

    for row in &report.rows {
        let mut line = format!("• {}", row.name);
        if row.quantity > 1 {
            line.push_str(&format!(" ({} × {})", row.quantity, money(row.price)));
        }
        line.push_str(&format!(": {}", money(row.item_total)));
        if row.assigned_count > 0 {
            line.push_str(&format!(" ({} each)", money(row.per_person)));
        }
        lines.push(line);
    }

    let per_person: Vec<String> = report
        .members
        .iter()
        .map(|m| format!("{} {}", m.short_name, money(m.total)))
        .collect();
    lines.push(format!("Total per person: {}", per_person.join(", ")));
    lines.join("\n")
}

/// Header line for a group, e.g. `3 members · Total: $45.47`.
#[must_use]
pub fn format_group_header(group: &Group, currency_symbol: &str) -> String {
    let count = group.members.len();
    let plural = if count == 1 { "" } else { "s" };
    format!(
        "{count} member{plural} · Total: {}",
        format_amount(group.total_expense, currency_symbol)
    )
}

/// One-line overview of a group summary for listings.
#[must_use]
pub fn format_group_summary(summary: &GroupSummary, currency_symbol: &str) -> String {
    format!(
        "{} | {} invoice(s), {} finalized | total {} | pending {}",
        summary.name,
        summary.invoice_count,
        summary.reviewed_count,
        format_amount(summary.total_expense, currency_symbol),
        format_amount(summary.pending_balance, currency_symbol)
    )
}
