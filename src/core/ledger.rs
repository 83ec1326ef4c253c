//! Ledger - the in-memory store of groups and invoices and the boundary
//! operations the presentation layer calls.
//!
//! Every mutating operation validates first and mutates second, so a
//! rejected call leaves the ledger exactly as it was. Group aggregates are
//! recomputed after every change to the invoice collection.

use crate::{
    config::{AppConfig, GroupSeed},
    core::{balance, lifecycle, roster, session::EditSession},
    entities::{
        Balance, Group, GroupId, IdSequence, Invoice, InvoiceId, InvoiceItem, InvoiceStatus,
        ItemId, Member, MemberId, NewInvoice, NewMember, invoice,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// All groups and invoices of one session
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    palette: roster::Palette,
    ids: IdSequence,
    groups: Vec<Group>,
    invoices: Vec<Invoice>,
}

impl Ledger {
    /// Creates an empty ledger handing out colours from `palette`.
    #[must_use]
    pub fn new(palette: roster::Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Creates a ledger from the application config and creates its seed groups.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut ledger = Self::new(config.palette()?);
        let seeded = ledger.seed_groups(&config.groups)?;
        info!("Ledger ready with {} seeded group(s)", seeded);
        Ok(ledger)
    }

    /// Creates every seed group, in order, so the last seed ends up first.
    ///
    /// All seeds are validated before any group is added; one invalid seed
    /// leaves the ledger unchanged.
    pub fn seed_groups(&mut self, seeds: &[GroupSeed]) -> Result<usize> {
        let now = Utc::now();
        let mut built = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let group =
                roster::build_group(&mut self.ids, &seed.name, &seed.members, &self.palette, now)
                    .inspect_err(|e| warn!("Invalid seed group {:?}: {}", seed.name, e))?;
            built.push(group);
        }
        for group in built {
            info!(
                "Seeded group {} ({}) with {} member(s)",
                group.id,
                group.name,
                group.members.len()
            );
            self.groups.insert(0, group);
        }
        Ok(seeds.len())
    }

    /// Groups, most recently created first.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up a group.
    #[must_use]
    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    fn group_mut(&mut self, group_id: GroupId) -> Result<&mut Group> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(Error::GroupNotFound { id: group_id })
    }

    /// Looks up an invoice.
    #[must_use]
    pub fn invoice(&self, invoice_id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == invoice_id)
    }

    fn invoice_index(&self, invoice_id: InvoiceId) -> Result<usize> {
        self.invoices
            .iter()
            .position(|inv| inv.id == invoice_id)
            .ok_or(Error::InvoiceNotFound { id: invoice_id })
    }

    /// Invoices of a group in the order they were added.
    pub fn invoices_for_group(&self, group_id: GroupId) -> impl Iterator<Item = &Invoice> {
        self.invoices
            .iter()
            .filter(move |inv| inv.group_id == group_id)
    }

    fn refresh_aggregates(&mut self, group_id: GroupId) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
            balance::recompute_group(group, &self.invoices);
        }
    }

    /// Creates a group and puts it at the front of the group list.
    pub fn create_group(&mut self, name: &str, members: &[NewMember]) -> Result<&Group> {
        let group = roster::build_group(&mut self.ids, name, members, &self.palette, Utc::now())
            .inspect_err(|e| warn!("Rejected group {:?}: {}", name, e))?;
        info!(
            "Created group {} ({}) with {} member(s)",
            group.id,
            group.name,
            group.members.len()
        );
        self.groups.insert(0, group);
        Ok(&self.groups[0])
    }

    /// Adds a member to a group's roster.
    pub fn add_member(&mut self, group_id: GroupId, name: &str, email: &str) -> Result<&Member> {
        let Self {
            palette,
            ids,
            groups,
            ..
        } = self;
        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(Error::GroupNotFound { id: group_id })?;
        roster::add_member(group, ids, &NewMember::new(name, email), palette)
            .inspect_err(|e| warn!("Rejected member for group {}: {}", group_id, e))
    }

    /// Removes a member from a group's roster.
    ///
    /// Unknown groups or members are a no-op returning `None`. The member's id
    /// stays in any invoice assignment that references it.
    pub fn remove_member(&mut self, group_id: GroupId, member_id: MemberId) -> Option<Member> {
        let Ok(group) = self.group_mut(group_id) else {
            debug!("Group {} not found, nothing removed", group_id);
            return None;
        };
        roster::remove_member(group, member_id)
    }

    /// Whether the presentation layer should offer member removal for the group.
    #[must_use]
    pub fn can_remove_member(&self, group_id: GroupId) -> bool {
        self.group(group_id).is_some_and(roster::can_remove_member)
    }

    /// Records a new invoice for a group in `needs-review` status.
    ///
    /// The merchant must not be blank, every item needs a positive quantity,
    /// and prices and the total must be finite and non-negative. When no
    /// total is given the item subtotal is stored; when no uploader is given
    /// the group's first member is used.
    pub fn create_invoice(&mut self, group_id: GroupId, new_invoice: NewInvoice) -> Result<&Invoice> {
        let group = self
            .group(group_id)
            .ok_or(Error::GroupNotFound { id: group_id })?;
        validate_new_invoice(&new_invoice)?;

        let uploaded_by = match new_invoice.uploaded_by {
            Some(member_id) => member_id,
            None => group
                .members
                .first()
                .map(|m| m.id)
                .ok_or_else(|| Error::InvalidInput {
                    field: "uploaded by",
                    reason: format!("group {group_id} has no members to attribute the invoice to"),
                })?,
        };

        let merchant = new_invoice.merchant.trim().to_string();
        let items: Vec<InvoiceItem> = new_invoice
            .items
            .into_iter()
            .map(|item| InvoiceItem {
                id: self.ids.next_item(),
                name: item.name.trim().to_string(),
                quantity: item.quantity,
                price: item.price,
                split_among: BTreeSet::new(),
            })
            .collect();
        let total = new_invoice
            .total
            .unwrap_or_else(|| invoice::subtotal(&items));

        let invoice = Invoice {
            id: self.ids.next_invoice(),
            group_id,
            name: format!("Invoice from {merchant}"),
            merchant,
            date: new_invoice.date,
            total,
            status: InvoiceStatus::NeedsReview,
            items,
            uploaded_by,
            created_at: Utc::now(),
        };
        info!(
            "Created invoice {} for group {}: {} item(s), total {:.2}",
            invoice.id,
            group_id,
            invoice.items.len(),
            invoice.total
        );
        self.invoices.push(invoice);
        self.refresh_aggregates(group_id);

        let index = self.invoices.len() - 1;
        Ok(&self.invoices[index])
    }

    /// Opens an edit session, reopening the invoice first if it was reviewed.
    pub fn enter_edit_mode(&mut self, invoice_id: InvoiceId) -> Result<EditSession> {
        let index = self.invoice_index(invoice_id)?;
        let group_id = self.invoices[index].group_id;
        let roster: Vec<MemberId> = self
            .group(group_id)
            .map(|group| group.member_ids().collect())
            .unwrap_or_default();
        let session = lifecycle::begin_edit(&mut self.invoices[index], roster)?;
        self.refresh_aggregates(group_id);
        debug!("Entered edit mode for invoice {}", invoice_id);
        Ok(session)
    }

    /// Flips a member's assignment against the group's current roster.
    ///
    /// Same as [`EditSession::toggle`], except that members removed since the
    /// session was opened can no longer be added and members added since then
    /// can. Returns `None` when the invoice or its group no longer exists.
    pub fn toggle_assignment(
        &self,
        session: &mut EditSession,
        item_id: ItemId,
        member_id: MemberId,
    ) -> Option<bool> {
        let group = self
            .invoice(session.invoice_id())
            .and_then(|invoice| self.group(invoice.group_id))?;
        session.refresh_roster(group.member_ids());
        session.toggle(item_id, member_id)
    }

    /// Read-only access for view mode. Never changes status.
    #[must_use]
    pub fn enter_view_mode(&self, invoice_id: InvoiceId) -> Option<&Invoice> {
        self.invoice(invoice_id)
    }

    /// Commits a session's assignments and marks its invoice reviewed.
    pub fn finalize(&mut self, session: &EditSession) -> Result<&Invoice> {
        let index = self.invoice_index(session.invoice_id())?;
        let invoice = &mut self.invoices[index];
        let group_id = invoice.group_id;
        lifecycle::finalize(invoice, session)?;
        self.refresh_aggregates(group_id);
        Ok(&self.invoices[index])
    }

    /// Removes an invoice. Unknown ids are a no-op returning `None`.
    pub fn delete_invoice(&mut self, invoice_id: InvoiceId) -> Option<Invoice> {
        let Ok(index) = self.invoice_index(invoice_id) else {
            debug!("Invoice {} not found, nothing deleted", invoice_id);
            return None;
        };
        let removed = self.invoices.remove(index);
        self.refresh_aggregates(removed.group_id);
        info!("Deleted invoice {} from group {}", removed.id, removed.group_id);
        Some(removed)
    }

    /// Freshly derived summary for a group.
    #[must_use]
    pub fn group_summary(&self, group_id: GroupId) -> Option<balance::GroupSummary> {
        self.group(group_id)
            .map(|group| balance::summarize(group, &self.invoices))
    }

    /// Net balances of a group's members from its reviewed invoices.
    #[must_use]
    pub fn member_balances(&self, group_id: GroupId) -> Option<Vec<Balance>> {
        self.group(group_id)
            .map(|group| balance::member_balances(group, &self.invoices))
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_new_invoice(new_invoice: &NewInvoice) -> Result<()> {
    if new_invoice.merchant.trim().is_empty() {
        return Err(Error::InvalidInput {
            field: "merchant",
            reason: "must not be blank".to_string(),
        });
    }
    if let Some(total) = new_invoice.total {
        validate_amount(total)?;
    }
    for item in &new_invoice.items {
        if item.quantity == 0 {
            return Err(Error::InvalidInput {
                field: "quantity",
                reason: format!("item {:?} must have a positive quantity", item.name),
            });
        }
        validate_amount(item.price)?;
    }
    Ok(())
}
