use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use gasoil_manager::models::trip::TripStatus;
use gasoil_manager::models::vehicle::Vehicle;
use gasoil_manager::repositories::{FleetStore, HttpFleetStore};
use gasoil_manager::services::consumption_engine::{self, TripReadings, TripResult};
use gasoil_manager::services::FleetSnapshot;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "⛽ Gasoil Manager - Consola".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let api_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let store = HttpFleetStore::new(api_url)?;
    println!("🌐 Servidor: {}", store.base_url());

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📊 Dashboard");
        println!("2. 🧮 Calculadora de consumo");
        println!("3. 🔔 Alertas");
        println!("4. 🚪 Salir");

        let choice = prompt("Selecciona una opción (1-4): ")?;

        // Los errores de una opción no cierran la consola
        let outcome = match choice.as_str() {
            "1" => show_dashboard(&store).await,
            "2" => run_calculator(&store).await,
            "3" => show_alerts(&store).await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Número opcional: vacío → `None`, admite coma decimal
fn prompt_number(label: &str) -> Result<Option<f64>> {
    let raw = prompt(label)?;
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("'{}' no es un número", raw))?;
    Ok(Some(value))
}

async fn show_dashboard(store: &dyn FleetStore) -> Result<()> {
    let snapshot = FleetSnapshot::load(store).await?;
    let stats = snapshot.dashboard();

    println!();
    println!("{}", "📊 DASHBOARD".bright_cyan().bold());
    println!("{}", "============".bright_cyan());
    println!("⛽ Carburante total: {:.1} L", stats.total_fuel);
    println!("🚚 Flota activa: {} vehículos", stats.vehicle_count);
    println!("🛣️ Trayectos: {}", stats.total_trip_count);
    println!("⚠️ Alertas: {}", stats.alert_count.to_string().bright_red());

    println!();
    println!("{}", "🚗 Flota por tipo".bright_blue());
    let distribution = &stats.type_distribution;
    println!(
        "   Camion: {}  Voiture: {}  Fourgon: {}  Frigo: {}",
        distribution.truck, distribution.car, distribution.van, distribution.refrigerated
    );

    println!();
    println!("{}", "📈 Últimos trayectos".bright_blue());
    if stats.recent_series.is_empty() {
        println!("   (sin datos)");
    }
    for point in &stats.recent_series {
        println!("   {:>8}  {:>7.1} L", point.label, point.fuel);
    }

    Ok(())
}

async fn run_calculator(store: &dyn FleetStore) -> Result<()> {
    let snapshot = FleetSnapshot::load(store).await?;

    println!();
    println!("{}", "🧮 CALCULADORA".bright_cyan().bold());
    println!("{}", "==============".bright_cyan());

    let input = prompt("Matrícula (inicio): ")?;
    if input.is_empty() {
        return Ok(());
    }
    let vehicle = snapshot.catalog().find_by_plate_prefix(&input)?.clone();
    println!(
        "✅ {} - {} ({}) · máx {}",
        vehicle.plate.bold(),
        vehicle.driver,
        vehicle.vehicle_type,
        vehicle.max_conso
    );

    let readings = read_readings(&vehicle)?;
    let result = consumption_engine::compute_trip(&readings, &vehicle)?;
    print_preview(&result);

    let confirm = prompt("¿Guardar el trayecto? (s/n): ")?;
    if !matches!(confirm.to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "o") {
        println!("↩️ Trayecto descartado");
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let trip = store.create_trip(result.into_new_trip(today)).await?;
    println!("{} Trayecto {} guardado", "💾".bright_green(), trip.id);
    Ok(())
}

fn read_readings(vehicle: &Vehicle) -> Result<TripReadings> {
    let mut readings = TripReadings::default();

    if vehicle.is_hour_based() {
        readings.hours_start = prompt_number("Horas inicio: ")?;
        readings.hours_end = prompt_number("Horas fin: ")?;
    } else {
        readings.km_start = prompt_number("Km inicio: ")?;
        readings.km_end = prompt_number("Km fin: ")?;
    }
    readings.fuel = prompt_number("Carburante (L): ")?;

    Ok(readings)
}

fn print_preview(result: &TripResult) {
    let rate = format!("{:.2} {}", result.rate, result.unit);
    println!();
    match result.verdict {
        TripStatus::Overage => println!(
            "{} {} (máx {})",
            "⚠️ Dépassement:".bright_red().bold(),
            rate.bright_red(),
            result.max_conso
        ),
        TripStatus::Normal => println!(
            "{} {} (máx {})",
            "✅ Normal:".bright_green().bold(),
            rate.bright_green(),
            result.max_conso
        ),
    }
}

async fn show_alerts(store: &dyn FleetStore) -> Result<()> {
    let snapshot = FleetSnapshot::load(store).await?;
    let alerts = snapshot.alerts();

    println!();
    println!("{}", consumption_engine::alert_details_report(&alerts));
    Ok(())
}
