//! Slide content for the rotating KPI board.
//!
//! Element ids match the dashboard markup (`fatValorAtual`, `kgMetaPerc`, ...).

use crate::format::{format_count, format_currency, format_number, format_percent, MISSING};
use crate::goals::{evaluate_goal, GoalEvaluation, GoalMetric, GoalTable};
use crate::metrics::snapshot::{DashboardData, PriceSnapshot};
use crate::metrics::variation::{describe_change, sign_class};

/// Which KPI a slide shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Revenue,
    Weight,
    Ticket,
    AveragePrice,
}

impl SlideKind {
    /// Slide heading.
    pub fn title(&self) -> &'static str {
        match self {
            SlideKind::Revenue => "Faturamento com IPI",
            SlideKind::Weight => "KG Total",
            SlideKind::Ticket => "Ticket Médio",
            SlideKind::AveragePrice => "Preço Médio",
        }
    }
}

/// One piece of text bound to an element id.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideEntry {
    pub element_id: &'static str,
    pub text: String,
    /// Status or sign class, if any
    pub class: Option<&'static str>,
}

impl SlideEntry {
    fn text(element_id: &'static str, text: impl Into<String>) -> Self {
        Self {
            element_id,
            text: text.into(),
            class: None,
        }
    }

    fn with_class(mut self, class: Option<&'static str>) -> Self {
        self.class = class;
        self
    }
}

/// A rendered slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub kind: SlideKind,
    pub entries: Vec<SlideEntry>,
    /// Goal evaluation behind the slide, for revenue and weight
    pub goal: Option<GoalEvaluation>,
}

impl Slide {
    /// Find an entry by element id.
    pub fn entry(&self, element_id: &str) -> Option<&SlideEntry> {
        self.entries.iter().find(|e| e.element_id == element_id)
    }
}

impl std::fmt::Display for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== {} ==", self.kind.title())?;
        for entry in &self.entries {
            match entry.class {
                Some(class) => writeln!(f, "  {:<20} {} [{}]", entry.element_id, entry.text, class)?,
                None => writeln!(f, "  {:<20} {}", entry.element_id, entry.text)?,
            }
        }
        Ok(())
    }
}

/// `"de 01/07/2025 até 15/07/2025"` for a period ending on a `dd/mm/yyyy` date.
///
/// Without an explicit start the period begins on the first of the end month.
pub fn period_label(start: Option<&str>, end: Option<&str>) -> String {
    let Some((end, month_year)) = end.and_then(|d| d.split_once('/').map(|(_, rest)| (d, rest)))
    else {
        return MISSING.to_string();
    };
    match start.filter(|s| !s.trim().is_empty()) {
        Some(start) => format!("de {} até {}", start.trim(), end),
        None => format!("de 01/{} até {}", month_year, end),
    }
}

fn current_period(data: &DashboardData) -> String {
    let revenue = &data.revenue;
    period_label(revenue.period_start.as_deref(), revenue.reference_date.as_deref())
}

fn prior_period(data: &DashboardData) -> String {
    let revenue = &data.revenue;
    period_label(
        revenue.prior_period_start.as_deref(),
        revenue.prior_reference_date.as_deref(),
    )
}

fn orders_label(count: u64) -> String {
    format!("{} pedidos", format_count(count))
}

fn goal_entries(
    value_id: &'static str,
    percent_id: &'static str,
    eval: &GoalEvaluation,
    target_text: String,
) -> [SlideEntry; 2] {
    [
        SlideEntry::text(value_id, format!("Meta mês: {}", target_text)),
        SlideEntry::text(
            percent_id,
            format!("🎯 {} da meta", format_percent(eval.percent)),
        )
        .with_class(Some(eval.status.css_class())),
    ]
}

fn variation_entry(element_id: &'static str, percent_change: Option<f64>) -> SlideEntry {
    SlideEntry::text(element_id, describe_change(percent_change))
        .with_class(sign_class(percent_change))
}

fn revenue_slide(data: &DashboardData, goals: &GoalTable) -> Slide {
    let revenue = &data.revenue;
    let reference = revenue.reference_date.as_deref();
    let eval = evaluate_goal(revenue.snapshot.current, reference, goals, GoalMetric::Revenue);

    let mut entries = vec![
        SlideEntry::text("fatQtdAtual", orders_label(data.orders.current)),
        SlideEntry::text(
            "fatValorAtual",
            format!("{} (com IPI)", format_currency(revenue.snapshot.current)),
        ),
        SlideEntry::text("fatDataAtual", current_period(data)),
        SlideEntry::text("fatQtdAnterior", orders_label(data.orders.prior_year)),
        SlideEntry::text(
            "fatValorAnterior",
            format!("{} (com IPI)", format_currency(revenue.snapshot.prior_year)),
        ),
        SlideEntry::text("fatDataAnterior", prior_period(data)),
        variation_entry("fatVariacao", revenue.snapshot.percent_change),
        variation_entry("fatQtdVariacao", data.orders.percent_change()),
    ];
    entries.extend(goal_entries(
        "fatMetaValor",
        "fatMetaPerc",
        &eval,
        format_currency(eval.target),
    ));

    Slide {
        kind: SlideKind::Revenue,
        entries,
        goal: Some(eval),
    }
}

fn weight_slide(data: &DashboardData, goals: &GoalTable) -> Slide {
    let weight = &data.weight;
    let reference = data.revenue.reference_date.as_deref();
    let eval = evaluate_goal(weight.current, reference, goals, GoalMetric::Weight);

    let mut entries = vec![
        SlideEntry::text("kgQtdAtual", orders_label(data.orders.current)),
        SlideEntry::text("kgValorAtual", format!("{} kg", format_number(weight.current))),
        SlideEntry::text("kgDataAtual", current_period(data)),
        SlideEntry::text("kgQtdAnterior", orders_label(data.orders.prior_year)),
        SlideEntry::text(
            "kgValorAnterior",
            format!("{} kg", format_number(weight.prior_year)),
        ),
        SlideEntry::text("kgDataAnterior", prior_period(data)),
        variation_entry("kgVariacao", weight.percent_change),
    ];
    entries.extend(goal_entries(
        "kgMetaValor",
        "kgMetaPerc",
        &eval,
        format!("{} kg", format_number(eval.target)),
    ));

    Slide {
        kind: SlideKind::Weight,
        entries,
        goal: Some(eval),
    }
}

fn ticket_slide(data: &DashboardData) -> Slide {
    let ticket = &data.ticket;
    Slide {
        kind: SlideKind::Ticket,
        entries: vec![
            SlideEntry::text("ticketAtual", format_currency(ticket.current)),
            SlideEntry::text("ticketAnterior", format_currency(ticket.prior_year)),
            SlideEntry::text(
                "ticketQtdAtual",
                format!("{} no período", orders_label(data.orders.current)),
            ),
            SlideEntry::text(
                "ticketQtdAnterior",
                format!("{} no período", orders_label(data.orders.prior_year)),
            ),
            variation_entry("ticketVariacao", ticket.percent_change),
        ],
        goal: None,
    }
}

fn price_entries(
    kg_id: &'static str,
    m2_id: &'static str,
    price: &PriceSnapshot,
) -> [SlideEntry; 2] {
    [
        SlideEntry::text(kg_id, format_currency(price.per_kg)),
        SlideEntry::text(m2_id, format_currency(price.per_m2)),
    ]
}

fn price_slide(data: &DashboardData) -> Option<Slide> {
    let price = data.price.as_ref()?;

    let mut entries = Vec::from(price_entries(
        "preco-medio-kg",
        "preco-medio-m2",
        &price.current,
    ));
    if let Some(as_of) = &price.current.as_of {
        entries.push(SlideEntry::text("preco-medio-data", format!("Atualizado em {}", as_of)));
    }
    if let Some(prior) = &price.prior_year {
        entries.extend(price_entries(
            "preco-medio-kg-anterior",
            "preco-medio-m2-anterior",
            prior,
        ));
    }

    Some(Slide {
        kind: SlideKind::AveragePrice,
        entries,
        goal: None,
    })
}

/// Build all slides for one refresh.
///
/// The price slide is included only when price data was loaded.
pub fn build_slides(data: &DashboardData, goals: &GoalTable) -> Vec<Slide> {
    let mut slides = vec![
        revenue_slide(data, goals),
        weight_slide(data, goals),
        ticket_slide(data),
    ];
    slides.extend(price_slide(data));
    slides
}
