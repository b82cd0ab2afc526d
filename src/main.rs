use anyhow::Context;
use clap::Parser;
use pizza_split::utils::{logger, validation::Validate};
use pizza_split::{AllocationEngine, AllocationResult, CliArgs, OrderFile, PlanOptions};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading order from: {}", args.config);

    let mut order = match OrderFile::from_file(&args.config) {
        Ok(order) => order,
        Err(e) => {
            tracing::error!("❌ Failed to load order file: {}", e);
            eprintln!("❌ Failed to load order file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    args.apply_overrides(&mut order);

    // 驗證訂單
    if let Err(e) = order.validate() {
        tracing::error!("❌ Order validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = AllocationEngine::new(order);

    if args.options {
        let options = engine.options().context("failed to compute plan options")?;
        if args.json {
            println!("{}", options.to_json_pretty()?);
        } else {
            print_options(&options);
        }
        return Ok(());
    }

    match engine.run() {
        Ok(result) => {
            if args.json {
                println!("{}", result.to_json_pretty()?);
            } else {
                print_result(&result);
            }
        }
        Err(e) => {
            tracing::error!("❌ Allocation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_options(options: &PlanOptions) {
    println!("Required slices: {}", options.required_slices);
    for variant in options.available() {
        if let Some(summary) = options.get(variant) {
            println!(
                "  {:<8} {} large + {} small ({} free), {} slices, residual {:+}",
                variant,
                summary.large_pizzas,
                summary.small_pizzas,
                summary.free_pizza_count,
                summary.purchased_slices,
                summary.residual_slices
            );
        }
    }
}

fn print_result(result: &AllocationResult) {
    let plan = result
        .variant
        .map(|variant| variant.to_string())
        .unwrap_or_else(|| "own plan".to_string());
    println!("Scheme: {} ({})", result.scheme.name(), plan);
    println!("  {}", result.scheme.description());
    println!(
        "Pizzas: {} ({} free), {} slices for {} required",
        result.pizza_count, result.free_pizza_count, result.purchased_slices, result.required_slices
    );
    for pizza in &result.pizzas {
        let tag = if pizza.is_free { " free" } else { "" };
        println!("  {} x{} {:.2}{}", pizza.size, pizza.slices, pizza.list_price, tag);
    }
    println!(
        "Total: {:.2}, free pizza value: {:.2}, per slice: {:.2}",
        result.total_cost, result.free_pizza_value, result.price_per_slice
    );
    for share in &result.shares {
        println!(
            "  {:<12} {:>3} slices (asked {:>3})  {:.2}",
            share.id, share.slices, share.required_slices, share.cost
        );
    }
    if result.residual_slices < 0 {
        println!("Missing: {} slices", -result.residual_slices);
    } else if result.common_slices > 0 {
        println!(
            "Common: {} slices worth {:.2}",
            result.common_slices, result.common_cost
        );
    }
}
