//! Integration tests for the refresh → load → render flow.
//!
//! Orders are imported from CSV, turned into KPI files, loaded back and
//! rendered to an in-memory surface.

use chrono::NaiveDate;
use kpiboard::dashboard::{build_slides, render, MemorySurface, SlideKind};
use kpiboard::goals::{GoalStatus, GoalTable, MonthlyGoal};
use kpiboard::storage::data_files::{load_dashboard_data, write_dashboard_data, PRICE_FILE};
use kpiboard::storage::orders::read_orders;
use kpiboard::KpiCalculator;

const ORDERS_CSV: &str = "\
pedido,tipo,data,valor,kg,m2
101,NORMAL,02/07/2025,\"1.000.000,00\",80000,2000
102,NORMAL,10/07/2025,\"500.000,00\",50000,1000
103,BONIFICACAO,11/07/2025,\"99.999,00\",5000,10
104,NORMAL,20/07/2025,\"1,00\",1,1
201,NORMAL,05/07/2024,\"1.200.000,00\",100000,2500
";

fn refreshed_surface(goals: &GoalTable) -> (MemorySurface, Vec<kpiboard::Slide>) {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("pedidos.csv");
    std::fs::write(&csv_path, ORDERS_CSV).unwrap();
    let data_dir = dir.path().join("site").join("dados");

    let orders = read_orders(&csv_path).unwrap();
    let reference = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
    let data = KpiCalculator::new(reference).build(&orders);
    write_dashboard_data(&data_dir, &data).unwrap();
    assert!(data_dir.join(PRICE_FILE).exists());

    let loaded = load_dashboard_data(&data_dir).unwrap();
    assert_eq!(loaded, data);

    let slides = build_slides(&loaded, goals);
    let mut surface = MemorySurface::new();
    render(&slides, &mut surface);
    (surface, slides)
}

#[test]
fn test_full_refresh_flow() {
    let (surface, slides) = refreshed_surface(&GoalTable::default());

    let kinds: Vec<_> = slides.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SlideKind::Revenue,
            SlideKind::Weight,
            SlideKind::Ticket,
            SlideKind::AveragePrice
        ]
    );

    // Revenue slide
    assert_eq!(surface.text("fatQtdAtual"), Some("2 pedidos"));
    assert_eq!(surface.text("fatValorAtual"), Some("R$ 1.500.000,00 (com IPI)"));
    assert_eq!(surface.text("fatDataAtual"), Some("de 01/07/2025 até 15/07/2025"));
    assert_eq!(surface.text("fatDataAnterior"), Some("de 01/07/2024 até 15/07/2024"));
    assert_eq!(surface.text("fatVariacao"), Some("▲ 25,0% vs ano anterior"));
    assert_eq!(surface.class("fatVariacao"), Some("positivo"));
    assert_eq!(surface.text("fatQtdVariacao"), Some("▲ 100,0% vs ano anterior"));
    assert_eq!(surface.text("fatMetaValor"), Some("Meta mês: R$ 2.199.365,46"));
    assert_eq!(surface.text("fatMetaPerc"), Some("🎯 68,2% da meta"));
    assert_eq!(surface.class("fatMetaPerc"), Some("meta-ruim"));

    // Weight slide
    assert_eq!(surface.text("kgValorAtual"), Some("130.000 kg"));
    assert_eq!(surface.text("kgValorAnterior"), Some("100.000 kg"));
    assert_eq!(surface.text("kgMetaValor"), Some("Meta mês: 150.000 kg"));
    assert_eq!(surface.text("kgMetaPerc"), Some("🎯 86,7% da meta"));
    assert_eq!(surface.class("kgMetaPerc"), Some("meta-atencao"));

    // Ticket slide
    assert_eq!(surface.text("ticketAtual"), Some("R$ 750.000,00"));
    assert_eq!(surface.text("ticketQtdAnterior"), Some("1 pedidos no período"));
    assert_eq!(surface.text("ticketVariacao"), Some("▼ 37,5% vs ano anterior"));
    assert_eq!(surface.class("ticketVariacao"), Some("negativo"));

    // Price slide
    assert_eq!(surface.text("preco-medio-kg"), Some("R$ 11,54"));
    assert_eq!(surface.text("preco-medio-m2"), Some("R$ 500,00"));
    assert_eq!(surface.text("preco-medio-kg-anterior"), Some("R$ 12,00"));

    let weight_goal = slides[1].goal.unwrap();
    assert_eq!(weight_goal.month, 7);
    assert_eq!(weight_goal.status, GoalStatus::Warning);
}

#[test]
fn test_injected_goal_table() {
    let goals = GoalTable::from_goals(
        (1..=12).map(|month| MonthlyGoal::new(month, 100_000.0, 1_500_000.0)),
    )
    .unwrap();
    let (surface, slides) = refreshed_surface(&goals);

    assert_eq!(surface.text("fatMetaPerc"), Some("🎯 100,0% da meta"));
    assert_eq!(surface.class("fatMetaPerc"), Some("meta-ok"));
    assert_eq!(surface.class("kgMetaPerc"), Some("meta-ok"));
    assert_eq!(slides[0].goal.unwrap().status, GoalStatus::Ok);
}

#[test]
fn test_production_style_files_without_price() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, json: &str| std::fs::write(dir.path().join(name), json).unwrap();

    write(
        "kpi_faturamento.json",
        r#"{"atual": 1409516.02, "ano_anterior": 1500000.0, "variacao": -6.0,
            "periodo": "31/12/2025", "data_ano_anterior": "31/12/2024"}"#,
    );
    write("kpi_quantidade_pedidos.json", r#"{"atual": 1234, "ano_anterior": 1300}"#);
    write(
        "kpi_ticket_medio.json",
        r#"{"atual": 1142.23, "ano_anterior": 1153.85, "variacao": null}"#,
    );
    write(
        "kpi_kg_total.json",
        r#"{"atual": 0, "ano_anterior": 90000, "variacao": -100.0}"#,
    );

    let data = load_dashboard_data(dir.path()).unwrap();
    let slides = build_slides(&data, &GoalTable::default());
    assert_eq!(slides.len(), 3);

    let mut surface = MemorySurface::new();
    render(&slides, &mut surface);

    assert_eq!(surface.text("fatQtdAtual"), Some("1.234 pedidos"));
    assert_eq!(surface.text("fatMetaPerc"), Some("🎯 100,0% da meta"));
    assert_eq!(surface.class("fatMetaPerc"), Some("meta-ok"));
    assert_eq!(surface.text("fatVariacao"), Some("▼ 6,0% vs ano anterior"));
    assert_eq!(surface.text("ticketVariacao"), Some("-- vs ano anterior"));
    assert_eq!(surface.class("ticketVariacao"), None);
    assert_eq!(surface.text("kgMetaPerc"), Some("🎯 0,0% da meta"));
    assert_eq!(surface.class("kgMetaPerc"), Some("meta-ruim"));
    assert_eq!(surface.text("preco-medio-kg"), None);
}

#[test]
fn test_custom_period_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("pedidos.csv");
    std::fs::write(&csv_path, ORDERS_CSV).unwrap();

    let orders = read_orders(&csv_path).unwrap();
    let calc = KpiCalculator::with_period(
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
        NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
    )
    .unwrap();
    write_dashboard_data(dir.path(), &calc.build(&orders)).unwrap();

    let loaded = load_dashboard_data(dir.path()).unwrap();
    assert_eq!(loaded.revenue.period_start.as_deref(), Some("20/06/2025"));

    let mut surface = MemorySurface::new();
    render(&build_slides(&loaded, &GoalTable::default()), &mut surface);

    assert_eq!(surface.text("fatDataAtual"), Some("de 20/06/2025 até 05/07/2025"));
    assert_eq!(surface.text("fatDataAnterior"), Some("de 20/06/2024 até 05/07/2024"));
    assert_eq!(surface.text("fatQtdAtual"), Some("1 pedidos"));
    assert_eq!(surface.text("fatValorAtual"), Some("R$ 1.000.000,00 (com IPI)"));
    assert_eq!(surface.text("fatQtdAnterior"), Some("1 pedidos"));
}
