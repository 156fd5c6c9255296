use anyhow::{anyhow, bail, Result};
use dotenvy::dotenv;
use std::env;
use tracing::{debug, error, info, warn};

use motoscan::config::environment::EnvironmentConfig;
use motoscan::models::auth::{LoginRequest, RegisterRequest};
use motoscan::models::{Motorcycle, MotorcycleDraft, MotorcycleStatus, MotorcycleUpdate};
use motoscan::services::plate_validation::{validate_plate, PlateFormat};
use motoscan::services::status_classifier::filter_by_status;
use motoscan::services::yard_layout::{build_yard_grid, group_by_zone_label};
use motoscan::state::AppState;
use motoscan::AppError;

/// Zona donde quedan las motos recién registradas
const DEFAULT_ZONE: &str = "A";

const USAGE: &str = "\
Uso: motoscan <comando> [argumentos]

Comandos:
  validate <placa>                                  Validar una placa
  login <email> <senha>                             Iniciar sesión
  signup <nome> <email> <senha>                     Crear usuario
  logout                                            Cerrar sesión
  list [status]                                     Listar motos (PRONTA | MECANICO | BO)
  register <placa> <modelo> [status] [zona]         Registrar moto
  update <placa> [modelo=..] [zona=..] [status=..]  Actualizar moto
  delete <placa>                                    Eliminar moto
  yard [status]                                     Mapa del patio
  zones                                             Motos por zona física";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(config.is_development())
        .with_writer(std::io::stderr)
        .init();

    info!("🏍️ MotoScan - {} ({})", config.api_base_url, config.environment);

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let rest = &args[1..];

    let result = if needs_local_state(command) {
        run_with_state(config, command, rest).await
    } else {
        run_stateless(command, rest)
    };

    if let Err(e) = &result {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => error!("❌ [{}] {}", app_error.code(), app_error),
            None => error!("❌ {}", e),
        }
    }
    result
}

/// `validate` y `help` no tocan el almacén local
fn needs_local_state(command: &str) -> bool {
    !matches!(command, "validate" | "help" | "--help" | "-h")
}

fn run_stateless(command: &str, rest: &[String]) -> Result<()> {
    match command {
        "validate" => cmd_validate(rest),
        _ => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

async fn run_with_state(config: EnvironmentConfig, command: &str, rest: &[String]) -> Result<()> {
    let state = AppState::new(config)?;

    if !state.session.is_authenticated().await? {
        debug!("🔓 Sin sesión activa; use `motoscan login`");
    }

    match command {
        "login" => cmd_login(&state, rest).await,
        "signup" => cmd_signup(&state, rest).await,
        "logout" => cmd_logout(&state).await,
        "list" => cmd_list(&state, rest).await,
        "register" => cmd_register(&state, rest).await,
        "update" => cmd_update(&state, rest).await,
        "delete" => cmd_delete(&state, rest).await,
        "yard" => cmd_yard(&state, rest).await,
        "zones" => cmd_zones(&state).await,
        other => Err(anyhow!("comando desconocido '{}'\n\n{}", other, USAGE)),
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("falta el argumento <{}>\n\n{}", name, USAGE))
}

fn parse_status(raw: &str) -> Result<MotorcycleStatus> {
    MotorcycleStatus::from_code(raw)
        .ok_or_else(|| anyhow!("estado inválido '{}': use PRONTA, MECANICO o BO", raw))
}

fn print_motorcycle(moto: &Motorcycle) {
    println!(
        "{:<8} {:<12} zona {:<4} {:<9} {}",
        moto.plate,
        moto.model,
        moto.zone,
        moto.status().code(),
        moto.status().description()
    );
}

fn cmd_validate(args: &[String]) -> Result<()> {
    let raw = arg(args, 0, "placa")?;
    let result = validate_plate(raw);

    match (result.format, result.reason) {
        (Some(format), _) => {
            let label = match format {
                PlateFormat::Legacy => "antigua",
                PlateFormat::Mercosul => "Mercosul",
            };
            println!("✅ {} es válida (formato {})", result.normalized, label);
            Ok(())
        }
        (None, Some(reason)) => bail!("{}: {}", result.normalized, reason),
        (None, None) => bail!("{}: placa inválida", result.normalized),
    }
}

async fn cmd_login(state: &AppState, args: &[String]) -> Result<()> {
    let request = LoginRequest::new(arg(args, 0, "email")?, arg(args, 1, "senha")?);
    state.client.login(&request).await?;
    println!("✅ Sesión iniciada");
    Ok(())
}

async fn cmd_signup(state: &AppState, args: &[String]) -> Result<()> {
    let request = RegisterRequest::new(
        arg(args, 0, "nome")?,
        arg(args, 1, "email")?,
        arg(args, 2, "senha")?,
    );
    if !state.client.register(&request).await? {
        bail!("no fue posible crear el usuario");
    }
    println!("✅ Usuario creado, ya puede iniciar sesión");
    Ok(())
}

async fn cmd_logout(state: &AppState) -> Result<()> {
    state.client.logout().await?;
    println!("👋 Sesión cerrada");
    Ok(())
}

/// Lista del backend; si no responde, la última copia local
async fn fetch_motorcycles(state: &AppState) -> Result<Vec<Motorcycle>> {
    match state.client.list_motorcycles().await {
        Ok(motorcycles) => {
            state.local_motorcycles.replace_all(&motorcycles).await?;
            Ok(motorcycles)
        }
        Err(e @ AppError::Http(_)) => {
            warn!("⚠️ Backend no disponible ({}), usando la lista local", e);
            Ok(state.local_motorcycles.list().await?)
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_list(state: &AppState, args: &[String]) -> Result<()> {
    let filter = args.first().map(|raw| parse_status(raw)).transpose()?;
    let motorcycles = fetch_motorcycles(state).await?;

    let visible = filter_by_status(&motorcycles, filter);

    if visible.is_empty() {
        println!("No hay motos registradas.");
        return Ok(());
    }
    for moto in visible {
        print_motorcycle(moto);
    }
    Ok(())
}

async fn cmd_register(state: &AppState, args: &[String]) -> Result<()> {
    let plate = arg(args, 0, "placa")?;
    let model = arg(args, 1, "modelo")?;
    let status = match args.get(2) {
        Some(raw) => parse_status(raw)?,
        None => MotorcycleStatus::Ready,
    };
    let zone = args.get(3).map(String::as_str).unwrap_or(DEFAULT_ZONE);

    let draft = MotorcycleDraft::new(plate, model, zone, status)?;
    let created = state.client.create_motorcycle(&draft).await?;
    state.local_motorcycles.upsert(created.clone()).await?;

    print_motorcycle(&created);
    Ok(())
}

async fn cmd_update(state: &AppState, args: &[String]) -> Result<()> {
    let plate = arg(args, 0, "placa")?;
    let mut update = MotorcycleUpdate::default();

    for pair in &args[1..] {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("argumento '{}' debe ser clave=valor", pair))?;
        match key {
            "modelo" => update.model = Some(value.to_string()),
            "zona" => update.zone = Some(value.to_string()),
            "status" => update = update.with_status(parse_status(value)?),
            other => bail!("campo '{}' no editable (modelo, zona, status)", other),
        }
    }

    let updated = state.client.update_motorcycle(plate, &update).await?;
    state.local_motorcycles.upsert(updated.clone()).await?;

    print_motorcycle(&updated);
    Ok(())
}

async fn cmd_delete(state: &AppState, args: &[String]) -> Result<()> {
    let plate = arg(args, 0, "placa")?.to_uppercase();
    if !state.client.delete_motorcycle(&plate).await? {
        bail!("no fue posible eliminar la moto {}", plate);
    }
    state.local_motorcycles.remove(&plate).await?;
    println!("🗑️ Moto {} eliminada", plate);
    Ok(())
}

async fn cmd_yard(state: &AppState, args: &[String]) -> Result<()> {
    let filter = args.first().map(|raw| parse_status(raw)).transpose()?;
    let motorcycles = fetch_motorcycles(state).await?;

    let capacity = state.config.zone_capacity;
    let grid = build_yard_grid(&motorcycles, &state.yard, filter);

    println!("Patio - {} motos", motorcycles.len());
    for zone in &grid.zones {
        let slots: Vec<String> = zone
            .slots
            .iter()
            .map(|slot| match slot {
                Some(moto) => moto.plate.clone(),
                None => "-------".to_string(),
            })
            .collect();
        let marker = if zone.at_capacity(capacity) { " ⚠️" } else { "" };
        println!(
            "Zona {} [{:<16}] {}{}",
            zone.zone.area,
            zone.zone.key,
            slots.join(" "),
            marker
        );
    }
    if grid.hidden > 0 {
        println!("{} motos fuera del mapa", grid.hidden);
    }
    Ok(())
}

async fn cmd_zones(state: &AppState) -> Result<()> {
    let motorcycles = fetch_motorcycles(state).await?;
    for (zone, motos) in group_by_zone_label(&motorcycles) {
        println!("Zona {} ({} motos)", zone, motos.len());
        for moto in motos {
            print!("  ");
            print_motorcycle(moto);
        }
    }
    Ok(())
}
