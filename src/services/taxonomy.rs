//! Taxonomy service
//!
//! Administers the business-unit and category lists. Removing a value does
//! not touch expenses that already use it.

use crate::error::{VyapaarError, VyapaarResult};

use super::ledger::ExpenseLedger;

/// Which list an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    BusinessUnit,
    Category,
}

impl TaxonomyKind {
    fn entity_type(&self) -> &'static str {
        match self {
            Self::BusinessUnit => "Business unit",
            Self::Category => "Category",
        }
    }
}

/// Service for business-unit and category administration
pub struct TaxonomyService<'l, 'a> {
    ledger: &'l mut ExpenseLedger<'a>,
}

impl<'l, 'a> TaxonomyService<'l, 'a> {
    pub fn new(ledger: &'l mut ExpenseLedger<'a>) -> Self {
        Self { ledger }
    }

    pub fn business_units(&self) -> &[String] {
        &self.ledger.document().business_units
    }

    pub fn categories(&self) -> &[String] {
        &self.ledger.document().categories
    }

    /// Append a value to the end of a list
    pub fn add(&mut self, kind: TaxonomyKind, name: &str) -> VyapaarResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VyapaarError::Validation(format!(
                "{} name cannot be empty",
                kind.entity_type()
            )));
        }

        let list = self.list_mut(kind);
        if list.iter().any(|existing| existing == name) {
            return Err(VyapaarError::Duplicate {
                entity_type: kind.entity_type(),
                identifier: name.to_string(),
            });
        }

        list.push(name.to_string());
        self.ledger.persist()?;

        log::info!("Added {} '{}'", kind.entity_type().to_lowercase(), name);
        Ok(name.to_string())
    }

    /// Remove a value from a list
    pub fn remove(&mut self, kind: TaxonomyKind, name: &str) -> VyapaarResult<()> {
        let name = name.trim();
        let list = self.list_mut(kind);
        let position = list
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| VyapaarError::NotFound {
                entity_type: kind.entity_type(),
                identifier: name.to_string(),
            })?;

        list.remove(position);
        self.ledger.persist()?;

        log::info!("Removed {} '{}'", kind.entity_type().to_lowercase(), name);
        Ok(())
    }

    /// Number of expenses still tagged with a value
    pub fn usage_count(&self, kind: TaxonomyKind, name: &str) -> usize {
        self.ledger
            .expenses()
            .iter()
            .filter(|e| match kind {
                TaxonomyKind::BusinessUnit => e.business_unit == name,
                TaxonomyKind::Category => e.category == name,
            })
            .count()
    }

    fn list_mut(&mut self, kind: TaxonomyKind) -> &mut Vec<String> {
        let data = self.ledger.data_mut();
        match kind {
            TaxonomyKind::BusinessUnit => &mut data.business_units,
            TaxonomyKind::Category => &mut data.categories,
        }
    }
}
