//! 腳踏車 MRP 計劃範例
//!
//! 展示從生產計劃到淨需求與產能檢查的完整流程。
//!
//! ```text
//! RUST_LOG=debug cargo run --example bike_plan [config.json]
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use mrp_planner::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn date(m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, m, d).with_context(|| format!("無效日期 2025-{m}-{d}"))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("===== Bike MRP Planning Example =====\n");

    // 步驟 1: 配置（可由第一個參數指定 JSON 檔）
    println!("[1] Load Configuration");
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("讀取配置檔失敗: {path}"))?;
            PlanningConfig::from_json(&json)?
        }
        None => PlanningConfig::default(),
    };
    println!("    {config:?}\n");

    // 步驟 2: BOM 結構
    println!("[2] Create BOM Structure");
    let bom_edges = vec![
        BomEdge::new("BIKE-001", "FRAME-001", Decimal::from(1)),
        BomEdge::new("BIKE-001", "WHEEL-001", Decimal::from(2)),
        BomEdge::new("WHEEL-001", "SPOKE-001", Decimal::from(36)),
        BomEdge::new("WHEEL-001", "RIM-001", Decimal::from(1)),
        BomEdge::new("FRAME-001", "TUBE-001", Decimal::from(3)),
    ];
    println!("    Edges: {}\n", bom_edges.len());

    // 步驟 3: 生產計劃
    println!("[3] Production Plan");
    let plan = vec![
        ProductionPlanLine::new("BIKE-001", Decimal::from(150), date(11, 15)?),
        ProductionPlanLine::new("BIKE-001", Decimal::from(100), date(11, 22)?),
    ];
    println!("    150 bikes on 2025-11-15");
    println!("    100 bikes on 2025-11-22\n");

    // 步驟 4: 庫存、在途採購、提前期、批量、產能
    println!("[4] Inventory / Receipts / Policies");
    let input = PlanningInput::new(plan, bom_edges)
        .with_inventories(vec![
            InventorySnapshot::new("BIKE-001", Decimal::from(10), Decimal::from(5)),
            InventorySnapshot::new("FRAME-001", Decimal::from(30), Decimal::from(10)),
            InventorySnapshot::new("WHEEL-001", Decimal::from(100), Decimal::from(20)),
            InventorySnapshot::new("SPOKE-001", Decimal::from(2000), Decimal::from(500)),
            InventorySnapshot::new("RIM-001", Decimal::from(40), Decimal::from(10)),
            InventorySnapshot::new("TUBE-001", Decimal::from(60), Decimal::from(20)),
        ])
        .with_purchase_orders(vec![
            PurchaseOrderLine::new("FRAME-001", Decimal::from(50), date(11, 10)?)
                .with_source_ref("PO-100"),
        ])
        .with_lead_times(vec![
            LeadTime::new("BIKE-001", 2, 0),
            LeadTime::new("FRAME-001", 5, 0),
            LeadTime::new("WHEEL-001", 3, 0),
            LeadTime::new("SPOKE-001", 0, 7),
            LeadTime::new("RIM-001", 0, 5),
            LeadTime::new("TUBE-001", 0, 10),
        ])
        .with_lot_sizes(vec![
            LotSizeRule::new("SPOKE-001", Decimal::from(1000), Decimal::from(500)),
            LotSizeRule::new("RIM-001", Decimal::ZERO, Decimal::from(50)),
        ])
        .with_resource_requirements(vec![
            ResourceRequirement::new("BIKE-001", "ASSEMBLY", Decimal::ONE),
            ResourceRequirement::new("WHEEL-001", "WHEEL-LINE", Decimal::new(5, 1)),
        ])
        .with_capacities(vec![
            CapacityRecord::new("ASSEMBLY", date(11, 13)?, Decimal::from(120)),
            CapacityRecord::new("ASSEMBLY", date(11, 20)?, Decimal::from(120)),
        ]);
    println!("    Inventories: {}", input.inventories.len());
    println!("    Purchase orders: {}\n", input.purchase_orders.len());

    // 步驟 5: 執行計劃
    println!("[5] Execute Planning Run");
    let outcome = PlanningEngine::new(config).run(&input)?;
    println!(
        "    Completed in {} ms\n",
        outcome.calculation_time_ms.unwrap_or(0)
    );

    // 步驟 6: 顯示結果
    println!("[6] Net Requirements");
    for row in &outcome.net_requirements {
        println!(
            "    {:<10} | Period: {} | Release: {} | Gross: {:>6} | Net: {:>6} | Closing: {:>6}",
            row.component_id,
            row.period_date,
            row.release_date,
            row.gross_requirement,
            row.net_requirement,
            row.closing_inventory
        );
    }
    println!();

    println!("[7] Capacity Checks");
    for check in &outcome.capacity_checks {
        let capacity = check
            .capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        println!(
            "    {:<10} | {} | Used: {:>6} | Capacity: {:>9} | Over: {}",
            check.resource_id, check.date, check.consumption, capacity, check.overage
        );
    }
    println!();

    if !outcome.warnings.is_empty() {
        println!("    Warnings:");
        for warning in &outcome.warnings {
            println!("      - [{}] {}", warning.component_id, warning.message);
        }
        println!();
    }

    println!("[8] JSON Output");
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
