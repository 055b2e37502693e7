// ==========================================
// 合成测试数据生成器
// ==========================================
// 用途: 生成一组 factories.json / orders.json，用于手工验收或压力测试
// 依据: 按工厂/订单索引做确定性取模变化，而非引入随机数依赖，
//       与原型 utils/generate_data.py 的生成逻辑保持同构。
// ==========================================

use aps_engine::domain::{CapacityPeriod, EfficiencyTier, Factory};
use chrono::{Duration, NaiveDate};
use clap::Parser;
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;

const REGIONS: &[&str] = &["CHINA", "VIETNAM", "CAMBODIA", "THAILAND"];
const PRODUCT_TYPES: &[&str] = &["外套", "裤子", "衬衫"];

#[derive(Parser, Debug)]
#[command(name = "generate_test_data", about = "生成合成的工厂/订单测试数据")]
struct Cli {
    #[arg(long, default_value = "factories.json")]
    factory_output_path: String,
    #[arg(long, default_value = "orders.json")]
    order_output_path: String,
    #[arg(long, default_value_t = 20)]
    num_factories: usize,
    #[arg(long, default_value_t = 300)]
    num_orders: usize,
    #[arg(long, default_value = "2025-08-01")]
    base_start_date: String,
    #[arg(long, default_value_t = 16)]
    num_periods: usize,
    #[arg(long, default_value_t = 14)]
    period_duration_days: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let base_start_date = NaiveDate::parse_from_str(&cli.base_start_date, "%Y-%m-%d")?;

    let factories = generate_factories(&cli, base_start_date);
    std::fs::write(&cli.factory_output_path, serde_json::to_string_pretty(&factories)?)?;
    println!("生成工厂数据 {} 条 -> {}", factories.len(), cli.factory_output_path);

    let orders = generate_orders(&cli, &factories, base_start_date);
    std::fs::write(&cli.order_output_path, serde_json::to_string_pretty(&orders)?)?;
    println!("生成订单数据 {} 条 -> {}", orders.len(), cli.order_output_path);

    Ok(())
}

fn generate_factories(cli: &Cli, base_start_date: NaiveDate) -> Vec<Factory> {
    let mut factories = Vec::with_capacity(cli.num_factories);
    let mut region_counters: HashMap<&str, usize> = HashMap::new();

    for idx in 0..cli.num_factories {
        let region = REGIONS[idx % REGIONS.len()];
        let count = region_counters.entry(region).or_insert(0);
        *count += 1;
        let factory_id = format!("F_{}_{:02}", &region[..2], *count);

        // 每 10 个工厂里有 7 个同时具备裁剪工序，其余只有缝纫，
        // 对应原型 cutting_process_probability=0.7 的确定性近似。
        let has_cutting = idx % 10 < 7;

        let mut production_efficiencies = HashMap::new();
        for product in PRODUCT_TYPES {
            let base_eff = 0.60 + 0.01 * ((idx * 7 + product.len()) % 25) as f64;
            let tiers = vec![
                EfficiencyTier { min_quantity: 0, max_quantity: 999, efficiency: round2(base_eff) },
                EfficiencyTier {
                    min_quantity: 1000,
                    max_quantity: 99_999,
                    efficiency: round2(base_eff * 1.05),
                },
            ];
            production_efficiencies.insert(product.to_string(), tiers);
        }

        let mut capacity_periods = Vec::with_capacity(cli.num_periods);
        let mut start = base_start_date;
        for period_idx in 0..cli.num_periods {
            let end = start + Duration::days(cli.period_duration_days - 1);
            let mut capacity_by_process = HashMap::new();
            let wobble = 1.0 + 0.15 * (((idx + period_idx) % 7) as f64 / 7.0 - 0.5);
            capacity_by_process.insert("缝纫".to_string(), (40_000.0 * wobble) as i64);
            if has_cutting {
                capacity_by_process.insert("裁剪".to_string(), (30_000.0 * wobble) as i64);
            }
            capacity_periods.push(CapacityPeriod {
                start_date: start,
                end_date: end,
                capacity_by_process,
            });
            start = end + Duration::days(1);
        }

        factories.push(Factory {
            factory_id,
            region: region.to_string(),
            production_efficiencies,
            capacity_periods,
        });
    }

    factories
}

fn generate_orders(
    cli: &Cli,
    factories: &[Factory],
    base_start_date: NaiveDate,
) -> Vec<serde_json::Value> {
    let mut orders = Vec::with_capacity(cli.num_orders);

    for idx in 0..cli.num_orders {
        let product_type = PRODUCT_TYPES[idx % PRODUCT_TYPES.len()];
        let quantity = 500 + ((idx * 37) % 1000) as i64;
        let needs_cutting = idx % 5 != 0; // 80% 的订单需要裁剪

        let capable_factories: Vec<&str> = factories
            .iter()
            .filter(|f| {
                let supported = f.supported_processes();
                supported.contains("缝纫") && (!needs_cutting || supported.contains("裁剪"))
            })
            .map(|f| f.factory_id.as_str())
            .collect();

        if capable_factories.is_empty() {
            continue;
        }

        let due_date = base_start_date + Duration::days(60 + (idx * 11) as i64 % 180);
        let mut total_process_capacity = serde_json::Map::new();
        total_process_capacity.insert(
            "缝纫".to_string(),
            json!((quantity as f64 * (1.2 + 0.01 * (idx % 60) as f64)) as i64),
        );
        if needs_cutting {
            total_process_capacity.insert(
                "裁剪".to_string(),
                json!((quantity as f64 * (0.8 + 0.01 * (idx % 40) as f64)) as i64),
            );
        }

        let transport_lt: serde_json::Map<String, serde_json::Value> = REGIONS
            .iter()
            .enumerate()
            .map(|(r_idx, region)| (region.to_string(), json!(20 + ((idx + r_idx * 5) % 30) as i64)))
            .collect();

        orders.push(json!({
            "order_id": format!("TEST_{:04}", idx + 1),
            "customer": format!("客户_{}", (b'A' + (idx % 26) as u8) as char),
            "product_type": product_type,
            "style": format!("{}-款{}", product_type, (idx % 100) + 1),
            "quantity": quantity,
            "due_date": due_date.to_string(),
            "material_purchasing_lead_time": 10 + (idx % 20) as i64,
            "material_transportation_to_region_lead_time": transport_lt,
            "production_lead_time": 3 + (idx % 5) as i64,
            "total_process_capacity": total_process_capacity,
            "eligible_factories": capable_factories,
            "order_type": (idx % 3 == 0) as u8,
        }));
    }

    orders
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
