use anthro_core::*;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "anthro")]
#[command(about = "Anthropometric assessment engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one measurement file (TOML or JSON)
    Assess {
        file: PathBuf,

        /// Protocol (overrides the file and the config default)
        #[arg(long)]
        protocol: Option<String>,

        /// Print the assessment record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available protocols
    Protocols,

    /// Compare two measurement files of the same client
    Compare {
        before: PathBuf,
        after: PathBuf,

        /// Protocol applied to both files
        #[arg(long)]
        protocol: Option<String>,
    },

    /// Assess every row of a CSV file
    Batch {
        input: PathBuf,
        output: PathBuf,

        /// Protocol for rows that do not name one
        #[arg(long)]
        protocol: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    anthro_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Assess {
            file,
            protocol,
            json,
        } => cmd_assess(&file, protocol.as_deref(), json, &config),
        Commands::Protocols => {
            cmd_protocols();
            Ok(())
        }
        Commands::Compare {
            before,
            after,
            protocol,
        } => cmd_compare(&before, &after, protocol.as_deref(), &config),
        Commands::Batch {
            input,
            output,
            protocol,
        } => cmd_batch(&input, &output, protocol.as_deref(), &config),
    }
}

/// Command-line protocol, else the file's, else the config default
fn resolve_protocol(
    cli_protocol: Option<&str>,
    file: &MeasurementFile,
    config: &Config,
) -> Result<Protocol> {
    match cli_protocol {
        Some(id) => id.parse(),
        None => Ok(file.protocol_or(config.assessment.default_protocol)),
    }
}

fn cmd_assess(path: &Path, protocol: Option<&str>, json: bool, config: &Config) -> Result<()> {
    let file = MeasurementFile::load(path)?;
    let protocol = resolve_protocol(protocol, &file, config)?;
    tracing::info!("Assessing {:?} with {}", path, protocol);
    let assessment = assess(&file.input, protocol);

    if json {
        let record = AssessmentRecord::new(assessment, chrono::Utc::now());
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        display_assessment(file.client.as_deref(), &assessment, config.report.decimals);
    }
    Ok(())
}

fn cmd_protocols() {
    println!("{:<10} {:<38} {:<14} {:<14} SITES", "ID", "NAME", "RANGE (M)", "RANGE (F)");
    for protocol in Protocol::ALL {
        let spec = protocol.spec();
        let m = protocol.clamp_range(Sex::M);
        let f = protocol.clamp_range(Sex::F);
        let sites = |sex: Sex| {
            let names: Vec<_> = protocol
                .required_skinfolds(sex)
                .iter()
                .map(|s| s.name())
                .collect();
            if names.is_empty() {
                "abdomen/waist perimeter".to_string()
            } else {
                names.join("+")
            }
        };
        let (male_sites, female_sites) = (sites(Sex::M), sites(Sex::F));
        let site_text = if male_sites == female_sites {
            male_sites
        } else {
            format!("M: {} | F: {}", male_sites, female_sites)
        };

        println!(
            "{:<10} {:<38} {:<14} {:<14} {}",
            spec.id,
            spec.name,
            format!("{}-{}%", m.min, m.max),
            format!("{}-{}%", f.min, f.max),
            site_text
        );
    }
}

fn cmd_compare(before: &Path, after: &Path, protocol: Option<&str>, config: &Config) -> Result<()> {
    let before_file = MeasurementFile::load(before)?;
    let after_file = MeasurementFile::load(after)?;

    let before_assessment = assess(
        &before_file.input,
        resolve_protocol(protocol, &before_file, config)?,
    );
    let after_assessment = assess(
        &after_file.input,
        resolve_protocol(protocol, &after_file, config)?,
    );

    let report = compare(&before_assessment, &after_assessment);
    let d = config.report.decimals;

    println!("\n{:<18} {:>10} {:>10} {:>10}  TREND", "METRIC", "BEFORE", "AFTER", "DELTA");
    for delta in &report.deltas {
        let trend = match delta.trend {
            Trend::Improved => "improved",
            Trend::Worsened => "worsened",
            Trend::Unchanged => "-",
        };
        println!(
            "{:<18} {:>10.d$} {:>10.d$} {:>+10.d$}  {}",
            delta.metric,
            delta.before,
            delta.after,
            delta.delta,
            trend,
            d = d
        );
    }
    println!();
    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, protocol: Option<&str>, config: &Config) -> Result<()> {
    let default_protocol = match protocol {
        Some(id) => id.parse()?,
        None => config.assessment.default_protocol,
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let summary = anthro_core::batch::assess_csv(reader, writer, default_protocol)?;

    println!("✓ Assessed {} clients", summary.written);
    if summary.skipped > 0 {
        println!("  Skipped {} rows (see log)", summary.skipped);
    }
    println!("  CSV: {}", output.display());
    Ok(())
}

fn display_assessment(client: Option<&str>, a: &Assessment, d: usize) {
    println!("\n╭─────────────────────────────────────────╮");
    match client {
        Some(name) => println!("│  ASSESSMENT: {}", name),
        None => println!("│  ASSESSMENT"),
    }
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Protocol: {} ({})", a.protocol.spec().name, a.protocol);
    println!(
        "  Sex: {}  Age: {}  Weight: {:.d$} kg  Height: {:.d$} cm",
        a.input.sex,
        a.input.age,
        a.input.weight_kg,
        a.input.height_cm,
        d = d
    );
    println!();

    if a.protocol.spec().estimator.is_density_based() || a.skinfold_sum_mm > 0.0 {
        println!("  Skinfold sum:  {:.d$} mm", a.skinfold_sum_mm, d = d);
    }

    if a.has_body_fat() {
        let c = &a.composition;
        println!("  Body fat:      {:.d$} %", c.body_fat_percent, d = d);
        println!("  Fat mass:      {:.d$} kg", c.fat_mass_kg, d = d);
        println!("  Lean mass:     {:.d$} kg", c.lean_mass_kg, d = d);
        println!("  BMR:           {:.d$} kcal", a.metabolism.bmr_kcal, d = d);
        println!("  TDEE:          {:.d$} kcal", a.metabolism.tdee_kcal, d = d);
    } else {
        println!("  Body fat:      not computed (insufficient data)");
    }
    println!();

    print_classification("BMI", a.bmi.as_ref(), d);
    print_classification("Body fat", a.body_fat.as_ref(), d);
    print_classification("Waist/hip", a.whr.as_ref(), d.max(2));
    println!();
}

fn print_classification(name: &str, result: Option<&ClassificationResult>, d: usize) {
    match result {
        Some(c) => println!(
            "  {:<10} {:>8.d$}  {} [{}]",
            name,
            c.value,
            c.label,
            c.severity.color(),
            d = d
        ),
        None => println!("  {:<10} {:>8}  not computed", name, "-"),
    }
}
