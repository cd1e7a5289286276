//! CLI entry point for permguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `permguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use permguard_app::{
    CheckInput, ExplainOutput, fold_state, parse_report_json, render_annotations, render_markdown,
    render_text, run_check, run_explain, run_init, run_rules, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use permguard_render::{FoldDefault, FoldState};
use permguard_repo::{IoFailureReason, RemediationError};
use permguard_settings::Overrides;
use permguard_types::PermguardReport;

#[derive(Parser, Debug)]
#[command(
    name = "permguard",
    version,
    about = "Android manifest permission guard for Unity Bluetooth projects"
)]
struct Cli {
    /// Project root (manifest and template paths resolve against it).
    #[arg(long, default_value = ".", global = true)]
    project_root: Utf8PathBuf,

    /// Path to permguard config TOML, relative to the project root.
    #[arg(long, default_value = "permguard.toml", global = true)]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Target Android API level (overrides `target_version` in the config).
    #[arg(long, global = true)]
    target_version: Option<u32>,

    /// Override the manifest path.
    #[arg(long, global = true)]
    manifest: Option<String>,

    /// Override the template manifest path.
    #[arg(long, global = true)]
    template: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Expand {
    /// Show the canonical line of every rule.
    All,
    /// Show canonical lines for missing declarations only.
    Missing,
    /// Show no canonical lines.
    None,
}

impl From<Expand> for FoldDefault {
    fn from(value: Expand) -> Self {
        match value {
            Expand::All => FoldDefault::Expanded,
            Expand::Missing => FoldDefault::ExpandMissing,
            Expand::None => FoldDefault::Collapsed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the manifest and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/permguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/permguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Which canonical lines to show in the terminal view.
        #[arg(long, value_enum, default_value = "missing")]
        expand: Expand,

        /// Flip the expanded state of one rule row (repeatable).
        #[arg(long = "toggle", value_name = "RULE_ID")]
        toggle: Vec<String>,
    },

    /// Copy the template manifest into place if no manifest exists.
    Init,

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/permguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/permguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule id or code with remediation guidance.
    Explain {
        /// The rule id (e.g., "ble.bluetooth_scan") or code (e.g., "missing_permission").
        identifier: String,
    },

    /// List the resolved rule catalog.
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
            expand,
            ref toggle,
        } => cmd_check(
            &cli,
            report_out,
            write_markdown.then_some(markdown_out),
            expand,
            toggle,
        ),
        Commands::Init => cmd_init(&cli),
        Commands::Md {
            ref report,
            ref output,
        } => cmd_md(report, output.as_deref()),
        Commands::Annotations { ref report, max } => cmd_annotations(report, max),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
        Commands::Rules => cmd_rules(&cli),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        target_version: cli.target_version,
        manifest: cli.manifest.clone(),
        template: cli.template.clone(),
    }
}

fn project_root(cli: &Cli) -> Utf8PathBuf {
    cli.project_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.project_root.clone())
}

/// Load config if present; a missing file is allowed (defaults apply).
fn read_config(root: &Utf8Path, config: &Utf8Path) -> String {
    let path = root.join(config);
    match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("no config at {path}: {err}");
            String::new()
        }
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8PathBuf>,
    expand: Expand,
    toggle: &[String],
) -> anyhow::Result<()> {
    let root = project_root(cli);

    let result = (|| -> anyhow::Result<i32> {
        if !root.exists() {
            anyhow::bail!("project root does not exist: {}", root);
        }
        let cfg_text = read_config(&root, &cli.config);

        let output = run_check(CheckInput {
            project_root: &root,
            config_text: &cfg_text,
            overrides: overrides(cli),
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(markdown_out) = markdown_out {
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        let fold = fold_state(&renderable, expand.into(), toggle);
        print!("{}", render_text(&renderable, &fold));
        if !output.report.data.manifest_exists {
            eprintln!(
                "permguard: no manifest at {}; run `permguard init` to copy the template",
                output.report.data.manifest
            );
        }

        Ok(verdict_exit_code(output.report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("permguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_init(cli: &Cli) -> anyhow::Result<()> {
    let root = project_root(cli);
    let cfg_text = read_config(&root, &cli.config);

    let result = run_init(CheckInput {
        project_root: &root,
        config_text: &cfg_text,
        overrides: overrides(cli),
    });

    match result {
        Ok(output) => {
            println!(
                "permguard: copied template to {} ({} bytes)",
                output.manifest, output.bytes_written
            );
            let renderable = to_renderable(&output.report);
            print!("{}", render_text(&renderable, &FoldState::default()));
            Ok(())
        }
        Err(err) => {
            match err.downcast_ref::<RemediationError>() {
                Some(remediation) if remediation.reason() == IoFailureReason::DestinationExists => {
                    eprintln!("permguard: {remediation}; nothing was copied");
                }
                _ => eprintln!("permguard error: {err:#}"),
            }
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &PermguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {}", path))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {}", path))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<PermguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(item) => {
            print!("{}", permguard_app::format_explanation(&item));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                permguard_app::format_not_found(&identifier, available_rule_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_rules(cli: &Cli) -> anyhow::Result<()> {
    let root = project_root(cli);
    let cfg_text = read_config(&root, &cli.config);
    let output = run_rules(&cfg_text, overrides(cli))?;
    print!("{}", permguard_app::format_rules(&output));
    Ok(())
}
