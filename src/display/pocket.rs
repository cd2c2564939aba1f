//! Pocket, concept and payment type display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Concept, Money, PaymentType};
use crate::services::pocket::PocketSummary;

#[derive(Tabled)]
struct PocketRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Concepts")]
    concepts: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format pockets with their concept totals as a table
pub fn format_pocket_list(summaries: &[PocketSummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No pockets found.".to_string();
    }

    let rows: Vec<PocketRow> = summaries
        .iter()
        .map(|s| PocketRow {
            id: s.pocket.id.to_string(),
            name: s.pocket.name.clone(),
            description: s.pocket.description.clone(),
            concepts: s.concept_count,
            total: s.total.format_with_symbol(currency),
            status: if s.pocket.active { "active" } else { "inactive" },
        })
        .collect();

    let grand_total: Money = summaries.iter().map(|s| s.total).sum();
    format!(
        "{}\nTotal planned: {}\n",
        Table::new(rows).with(Style::psql()),
        grand_total.format_with_symbol(currency)
    )
}

#[derive(Tabled)]
struct ConceptRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Concept")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Paid")]
    paid: &'static str,
}

pub fn format_concept_list(concepts: &[Concept], currency: &str) -> String {
    if concepts.is_empty() {
        return "No concepts in this pocket.".to_string();
    }

    let rows: Vec<ConceptRow> = concepts
        .iter()
        .map(|c| ConceptRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            value: c.value.format_with_symbol(currency),
            paid: if c.paid { "yes" } else { "no" },
        })
        .collect();

    let total: Money = concepts.iter().map(|c| c.value).sum();
    format!(
        "{}\nTotal: {}\n",
        Table::new(rows).with(Style::psql()),
        total.format_with_symbol(currency)
    )
}

#[derive(Tabled)]
struct PaymentTypeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

pub fn format_payment_type_list(payment_types: &[PaymentType]) -> String {
    if payment_types.is_empty() {
        return "No payment types found.".to_string();
    }

    let rows: Vec<PaymentTypeRow> = payment_types
        .iter()
        .map(|p| PaymentTypeRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            status: if p.active { "active" } else { "inactive" },
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}
