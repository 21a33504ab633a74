mod error;

use clap::{Parser, Subcommand};
use error::CliResult;
use pr_core::{parse_pressure, parse_temperature};
use pr_eos::{
    EngineConfig, IterationRecord, PressureSearch, SearchOutcome, SubstanceLookup,
    SweepDefinition, SweepType, VaporPressureSolver, isotherm_sweep, resolve, state_point,
};
use pr_substances::{SubstanceTable, default_lookup, filter_builtin_catalog};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pr-cli")]
#[command(about = "Peng-Robinson EOS - vapor pressure and pure-fluid properties", long_about = None)]
struct Cli {
    /// Engine configuration YAML (model constants and solver options)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Substance table (YAML or JSON) layered over the built-in catalog
    #[arg(long, global = true)]
    substances: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the vapor-liquid equilibrium pressure at one temperature
    VaporPressure {
        /// Substance name (case-insensitive)
        substance: String,
        /// Temperature, e.g. "150 K", "-20 C", "100 F"
        #[arg(allow_hyphen_values = true)]
        temperature: String,
        /// Initial pressure guess, e.g. "1 MPa", "10 bar"
        #[arg(long)]
        initial_pressure: Option<String>,
        /// Convergence threshold on |phi_v - phi_l|
        #[arg(long)]
        tolerance: Option<f64>,
        /// Iteration budget
        #[arg(long)]
        max_iterations: Option<u32>,
        /// Print every iteration record
        #[arg(long)]
        show_iterations: bool,
    },
    /// Roots, fugacity coefficients and departure functions at one (T, P)
    State {
        substance: String,
        #[arg(allow_hyphen_values = true)]
        temperature: String,
        pressure: String,
    },
    /// Compressibility and fugacity along an isotherm (CSV)
    Isotherm {
        substance: String,
        #[arg(allow_hyphen_values = true)]
        temperature: String,
        /// First pressure of the sweep
        #[arg(long, default_value = "0.1 bar")]
        from: String,
        /// Last pressure of the sweep
        #[arg(long, default_value = "25 bar")]
        to: String,
        #[arg(long, default_value_t = 50)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Vapor pressure over a temperature range (CSV)
    Saturation {
        substance: String,
        /// First temperature of the sweep
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        /// Last temperature of the sweep
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        #[arg(long, default_value_t = 20)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List known substances
    Substances {
        /// Case-insensitive filter
        query: Option<String>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load_yaml(path)?,
        None => EngineConfig::default(),
    };
    tracing::debug!(?config, substances = ?cli.substances, "starting");

    match cli.command {
        Commands::VaporPressure {
            substance,
            temperature,
            initial_pressure,
            tolerance,
            max_iterations,
            show_iterations,
        } => {
            let mut options = config.solver;
            if let Some(text) = initial_pressure {
                options = options.with_initial_pressure(parse_pressure(&text)?);
            }
            if let Some(tolerance) = tolerance {
                options = options.with_tolerance(tolerance);
            }
            if let Some(max_iterations) = max_iterations {
                options = options.with_max_iterations(max_iterations);
            }
            let solver = VaporPressureSolver::from_config(&config)?.with_options(options)?;
            let lookup = default_lookup(cli.substances.as_deref())?;
            cmd_vapor_pressure(
                &solver,
                &*lookup,
                &substance,
                parse_temperature(&temperature)?,
                show_iterations,
            )
        }
        Commands::State {
            substance,
            temperature,
            pressure,
        } => {
            let lookup = default_lookup(cli.substances.as_deref())?;
            cmd_state(
                &config,
                &*lookup,
                &substance,
                parse_temperature(&temperature)?,
                parse_pressure(&pressure)?,
            )
        }
        Commands::Isotherm {
            substance,
            temperature,
            from,
            to,
            points,
            log,
            output,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let sweep = SweepDefinition::new(
                parse_pressure(&from)?,
                parse_pressure(&to)?,
                points,
                sweep_type,
            )?;
            let lookup = default_lookup(cli.substances.as_deref())?;
            cmd_isotherm(
                &config,
                &*lookup,
                &substance,
                parse_temperature(&temperature)?,
                &sweep,
                output.as_deref(),
            )
        }
        Commands::Saturation {
            substance,
            from,
            to,
            points,
            output,
        } => {
            let sweep = SweepDefinition::linear(
                parse_temperature(&from)?,
                parse_temperature(&to)?,
                points,
            )?;
            let solver = VaporPressureSolver::from_config(&config)?;
            let lookup = default_lookup(cli.substances.as_deref())?;
            cmd_saturation(&solver, &*lookup, &substance, &sweep, output.as_deref())
        }
        Commands::Substances { query } => {
            cmd_substances(cli.substances.as_deref(), query.as_deref().unwrap_or(""))
        }
    }
}

fn cmd_vapor_pressure(
    solver: &VaporPressureSolver,
    lookup: &dyn SubstanceLookup,
    substance: &str,
    t: f64,
    show_iterations: bool,
) -> CliResult<()> {
    let params = resolve(lookup, substance)?;
    println!("Substance: {} ({})", substance, params);
    println!("Temperature: {:.3} K", t);

    let search = solver.solve(substance, &params, t)?;
    if show_iterations {
        print_iterations(&search.records);
    }
    print_outcome(&search);
    Ok(())
}

fn print_iterations(records: &[IterationRecord]) {
    println!(
        "\n{:>5} {:>14} {:>10} {:>10} {:>10} {:>10} {:>12} {:>12}  phase",
        "iter", "P [Pa]", "A", "B", "Zv", "Zl", "phi_v", "phi_l"
    );
    for r in records {
        println!(
            "{:>5} {:>14.3} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>12.8} {:>12.8}  {}",
            r.iteration, r.p, r.big_a, r.big_b, r.zv, r.zl, r.phi_zv, r.phi_zl, r.phase
        );
    }
    println!();
}

fn print_outcome(search: &PressureSearch) {
    match search.outcome {
        SearchOutcome::Converged { pressure } => {
            println!(
                "✓ Converged after {} iterations: Psat = {:.3} Pa ({:.6} MPa)",
                search.iterations(),
                pressure,
                pressure / 1.0e6
            );
            if let Some(last) = search.last_record() {
                println!("  Zv = {:.6}, Zl = {:.6}, phi = {:.8}", last.zv, last.zl, last.phi_zv);
            }
        }
        SearchOutcome::Exhausted => {
            println!(
                "✗ No convergence within {} iterations",
                search.iterations()
            );
            if let Some(last) = search.last_record() {
                println!(
                    "  Closest approach: P = {:.3} Pa, |phi_v - phi_l| = {:.3e}",
                    last.p,
                    last.fugacity_gap()
                );
            }
        }
        SearchOutcome::Failed(reason) => {
            println!("✗ Search stopped: {}", reason);
        }
    }
}

fn cmd_state(
    config: &EngineConfig,
    lookup: &dyn SubstanceLookup,
    substance: &str,
    t: f64,
    p: f64,
) -> CliResult<()> {
    let params = resolve(lookup, substance)?;
    let model = pr_eos::ParameterModel::new(config.constants);
    let point = state_point(&model, &params, t, p)?;
    let s = &point.state;

    println!("Substance: {} ({})", substance, params);
    println!("T = {:.3} K, P = {:.3} Pa", t, p);
    println!("  a     = {:.6e} Pa·m⁶/mol²", s.a);
    println!("  da/dT = {:.6e} Pa·m⁶/(mol²·K)", s.da_dt);
    println!("  b     = {:.6e} m³/mol", s.b);
    println!("  A = {:.6}, B = {:.6}", s.big_a, s.big_b);

    let roots: Vec<String> = point
        .roots
        .as_slice()
        .iter()
        .map(|z| format!("{:.6}", z))
        .collect();
    println!("  Z roots: [{}]", roots.join(", "));

    for (label, phase) in [("Vapor", point.vapor), ("Liquid", point.liquid)] {
        if let Some(phase) = phase {
            println!(
                "  {:<6} Z = {:.6}  phi = {:.6}  H-Hig = {:.3} J/mol  S-Sig = {:.4} J/(mol·K)",
                label, phase.z, phase.phi, phase.departures.enthalpy, phase.departures.entropy
            );
        }
    }
    if !point.is_two_phase() {
        println!("  Single phase at this state");
    }
    Ok(())
}

fn cmd_isotherm(
    config: &EngineConfig,
    lookup: &dyn SubstanceLookup,
    substance: &str,
    t: f64,
    sweep: &SweepDefinition,
    output: Option<&Path>,
) -> CliResult<()> {
    let params = resolve(lookup, substance)?;
    let model = pr_eos::ParameterModel::new(config.constants);
    let points = isotherm_sweep(&model, &params, t, sweep)?;

    let mut csv = String::from("p_pa,A,B,zv,zl,phi_v,phi_l,phase\n");
    for pt in &points {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            pt.p, pt.big_a, pt.big_b, pt.zv, pt.zl, pt.phi_zv, pt.phi_zl, pt.phase
        ));
    }
    write_csv(&csv, points.len(), output)
}

fn cmd_saturation(
    solver: &VaporPressureSolver,
    lookup: &dyn SubstanceLookup,
    substance: &str,
    sweep: &SweepDefinition,
    output: Option<&Path>,
) -> CliResult<()> {
    let searches = solver.saturation_sweep(lookup, substance, sweep)?;

    let mut csv = String::from("t_k,p_pa,iterations,outcome\n");
    for search in &searches {
        let (pressure, outcome) = match search.outcome {
            SearchOutcome::Converged { pressure } => (pressure.to_string(), "converged".to_string()),
            SearchOutcome::Exhausted => (String::new(), "exhausted".to_string()),
            SearchOutcome::Failed(reason) => (String::new(), reason.to_string()),
        };
        csv.push_str(&format!(
            "{},{},{},\"{}\"\n",
            search.temperature,
            pressure,
            search.iterations(),
            outcome
        ));
    }
    write_csv(&csv, searches.len(), output)
}

fn write_csv(csv: &str, rows: usize, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_substances(table_path: Option<&Path>, query: &str) -> CliResult<()> {
    if let Some(path) = table_path {
        let table = SubstanceTable::load(path)?;
        let query_lower = query.to_lowercase();
        println!("User table ({}):", path.display());
        for record in table.records() {
            let matches = std::iter::once(&record.name)
                .chain(&record.aliases)
                .any(|name| name.to_lowercase().contains(&query_lower));
            if matches {
                println!(
                    "  {:<20} Tc = {:>8.2} K  Pc = {:>7.3} MPa  omega = {:>7.3}",
                    record.name, record.tc_k, record.pc_mpa, record.omega
                );
            }
        }
        println!();
    }

    let entries = filter_builtin_catalog(query);
    if entries.is_empty() {
        println!("No built-in substances match '{}'", query);
        return Ok(());
    }
    println!("Built-in catalog:");
    for entry in entries {
        println!(
            "  {:<8} {:<18} Tc = {:>8.2} K  Pc = {:>7.3} MPa  omega = {:>7.3}",
            entry.canonical_id, entry.display_name, entry.tc_k, entry.pc_mpa, entry.omega
        );
    }
    Ok(())
}
