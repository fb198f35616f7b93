//! RV64 cycle-accurate simulator CLI.
//!
//! This binary runs an assembled flat binary through one of the engines:
//! 1. **Run:** Execute to completion and dump registers and statistics.
//! 2. **Debug run:** Same, but honoring breakpoints and per-step pacing.

use clap::{Parser, Subcommand};
use rv5s_core::sim::loader;
use rv5s_core::{CancelToken, Config, HazardMode, RunExit, VmManager, VmRegistry, VmType};
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "rv5s",
    author,
    version,
    about = "RV64 cycle-accurate simulator",
    long_about = "Execute an assembled flat binary on a single-cycle or 5-stage pipelined RV64 engine.\n\nExamples:\n  rv5s run -f program.bin\n  rv5s run -f program.bin --vm pipelined --hazard hazard-and-forwarding\n  rv5s run -f program.bin --debug -b 0x10 -b 0x40"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a flat binary to completion.
    Run {
        /// Assembled flat binary to execute.
        #[arg(short, long)]
        file: String,

        /// JSON configuration file (missing fields take defaults).
        #[arg(short, long)]
        config: Option<String>,

        /// Engine: single-cycle | pipelined.
        #[arg(long)]
        vm: Option<String>,

        /// Hazard mode for the pipelined engine: no-hazard-no-forwarding |
        /// forwarding-no-hazard | hazard-no-forwarding | hazard-and-forwarding |
        /// static-branch-prediction | dynamic-branch-prediction.
        #[arg(long)]
        hazard: Option<String>,

        /// Use the paced debug run loop, honoring breakpoints.
        #[arg(long)]
        debug: bool,

        /// Breakpoint address (repeatable; hex with 0x prefix or decimal).
        #[arg(short, long)]
        breakpoint: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            file,
            config,
            vm,
            hazard,
            debug,
            breakpoint,
        }) => cmd_run(&file, config.as_deref(), vm.as_deref(), hazard.as_deref(), debug, &breakpoint),
        None => {
            eprintln!("RV64 simulator: pass a subcommand");
            eprintln!();
            eprintln!("  rv5s run -f <binary>                 Run to completion");
            eprintln!("  rv5s run -f <binary> --vm pipelined  Select the engine");
            eprintln!();
            eprintln!("  rv5s --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the binary, builds the configured engine, runs it, and dumps state.
fn cmd_run(
    file: &str,
    config_path: Option<&str>,
    vm: Option<&str>,
    hazard: Option<&str>,
    debug: bool,
    breakpoints: &[String],
) {
    let mut config = match config_path {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("error: {message}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(tag) = vm {
        match parse_vm_type(tag) {
            Some(vm_type) => config.vm_type = vm_type,
            None => {
                eprintln!("error: unknown VM '{tag}' (expected single-cycle or pipelined)");
                process::exit(1);
            }
        }
    }
    if let Some(tag) = hazard {
        match parse_hazard_mode(tag) {
            Some(mode) => config.hazard_mode = mode,
            None => {
                eprintln!("error: unknown hazard mode '{tag}'");
                process::exit(1);
            }
        }
    }

    let program = match loader::load_flat_binary(file) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("error: cannot read {file}: {error}");
            process::exit(1);
        }
    };

    let registry = VmRegistry::with_default_vms(&config);
    let mut manager = match VmManager::new(registry, config.vm_type) {
        Ok(manager) => manager,
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    };

    if let Err(error) = manager.load_program(&program) {
        eprintln!("error: {error}");
        process::exit(1);
    }

    for spec in breakpoints {
        match parse_address(spec) {
            Some(pc) => manager.add_breakpoint(pc),
            None => {
                eprintln!("error: bad breakpoint address '{spec}'");
                process::exit(1);
            }
        }
    }

    println!(
        "[*] {:?} / {:?}: {} ({} bytes)",
        manager.vm_type(),
        config.hazard_mode,
        file,
        program.byte_len()
    );

    let cancel = CancelToken::new();
    let exit = if debug {
        manager.debug_run(&cancel)
    } else {
        manager.run(&cancel)
    };

    match exit {
        RunExit::Completed => println!("[*] completed"),
        RunExit::Stopped => println!("[*] stopped"),
        RunExit::Breakpoint(pc) => println!("[*] breakpoint at {pc:#x}"),
    }

    dump_state(&manager);
}

/// Reads and parses a JSON configuration file.
fn load_config(path: &str) -> Result<Config, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("bad config {path}: {e}"))
}

fn parse_vm_type(tag: &str) -> Option<VmType> {
    match tag {
        "single-cycle" => Some(VmType::SingleCycle),
        "pipelined" => Some(VmType::Pipelined),
        _ => None,
    }
}

fn parse_hazard_mode(tag: &str) -> Option<HazardMode> {
    match tag {
        "no-hazard-no-forwarding" => Some(HazardMode::NoHazardNoForwarding),
        "forwarding-no-hazard" => Some(HazardMode::ForwardingNoHazard),
        "hazard-no-forwarding" => Some(HazardMode::HazardNoForwarding),
        "hazard-and-forwarding" => Some(HazardMode::HazardAndForwarding),
        "static-branch-prediction" => Some(HazardMode::StaticBranchPrediction),
        "dynamic-branch-prediction" => Some(HazardMode::DynamicBranchPrediction),
        _ => None,
    }
}

fn parse_address(spec: &str) -> Option<u64> {
    if let Some(hex) = spec.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        spec.parse().ok()
    }
}

/// Prints the register file and the run's statistics.
fn dump_state(manager: &VmManager) {
    println!();
    println!("pc = {:#x}", manager.pc());
    let registers = manager.registers();
    for row in 0..8 {
        let mut line = String::new();
        for col in 0..4 {
            let idx = row * 4 + col;
            line.push_str(&format!("x{idx:<2} = {:#018x}  ", registers.read_gpr(idx)));
        }
        println!("{}", line.trim_end());
    }

    let stats = manager.stats();
    println!();
    println!(
        "cycles: {}  retired: {}  stalls: {}",
        stats.cycles, stats.instructions_retired, stats.stall_cycles
    );
    println!(
        "branches: {} resolved, {} taken, {} flushes",
        stats.branches_resolved, stats.branches_taken, stats.branch_flushes
    );
}
