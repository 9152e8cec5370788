//! ls8 CLI - run LS-8 program images.

use std::process::ExitCode;

use ls8::log::{self, Level};
use ls8::{disassemble, error, format_listing, info, load_program_file, trace, warn, Cpu};

fn print_usage() {
    eprintln!("ls8 - LS-8 virtual machine");
    eprintln!();
    eprintln!("Usage: ls8 [options] <program.ls8>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --trace          Log machine state before every instruction");
    eprintln!("  --max-steps <n>  Stop after n instructions");
    eprintln!("  --disasm         Print a disassembly listing instead of running");
    eprintln!("  -q, --quiet      Only log warnings and errors");
    eprintln!("  -h, --help       Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  ls8 programs/print8.ls8");
    eprintln!("  ls8 --max-steps 1000 programs/call.ls8");
}

struct Options {
    path: String,
    trace: bool,
    max_steps: Option<u64>,
    disasm: bool,
    quiet: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut trace = false;
    let mut max_steps = None;
    let mut disasm = false;
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => trace = true,
            "--disasm" => disasm = true,
            "-q" | "--quiet" => quiet = true,
            "--max-steps" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| "--max-steps requires a value".to_string())?;
                let steps = value
                    .parse()
                    .map_err(|_| format!("invalid step count: {}", value))?;
                max_steps = Some(steps);
            }
            arg if arg.starts_with('-') => return Err(format!("unknown option: {}", arg)),
            arg => {
                if path.replace(arg.to_string()).is_some() {
                    return Err("only one program file may be given".to_string());
                }
            }
        }
        i += 1;
    }

    Ok(Options {
        path: path.ok_or_else(|| "no program file given".to_string())?,
        trace,
        max_steps,
        disasm,
        quiet,
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::from(1);
        }
    };

    if options.trace {
        log::set_level(Level::Trace);
    } else if options.quiet {
        log::set_level(Level::Warn);
    }

    let program = match load_program_file(&options.path) {
        Ok(program) => program,
        Err(e) => {
            error!("{}: {}", options.path, e);
            return ExitCode::from(1);
        }
    };

    if options.disasm {
        print!("{}", format_listing(&disassemble(&program, 0)));
        return ExitCode::SUCCESS;
    }

    let mut cpu = Cpu::new();
    if let Err(e) = cpu.load(&program) {
        error!("{}: program does not fit in memory: {}", options.path, e);
        return ExitCode::from(1);
    }
    info!("loaded {} bytes from {}", program.len(), options.path);

    let budget = options.max_steps.unwrap_or(u64::MAX);
    let result = if options.trace {
        run_traced(&mut cpu, budget)
    } else if options.max_steps.is_some() {
        cpu.run_for_steps(budget)
    } else {
        cpu.run()
    };

    match result {
        Ok(steps) if cpu.is_halted() => {
            info!("halted after {} instructions", steps);
            ExitCode::SUCCESS
        }
        Ok(steps) => {
            warn!("step budget exhausted after {} instructions at PC {:02X}", steps, cpu.pc());
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{} (at PC {:02X})", e, cpu.pc());
            error!("{}", cpu.trace_line());
            ExitCode::from(1)
        }
    }
}

fn run_traced(cpu: &mut Cpu, budget: u64) -> Result<u64, ls8::ExecutionError> {
    let mut steps = 0;
    while !cpu.is_halted() && steps < budget {
        trace!("{}", cpu.trace_line());
        cpu.step()?;
        steps += 1;
    }
    Ok(steps)
}
