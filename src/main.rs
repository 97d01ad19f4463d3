//! ancestry - selection breadcrumbs for HTML documents

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug};

use ancestry::{
    ArenaDom, Document, EndpointLocator, NodeData, NodeId, OffsetUnit, Result, TrailOptions,
};

#[derive(Parser)]
#[command(name = "ancestry")]
#[command(version, about = "Show the ancestry of a selection in an HTML document", long_about = None)]
#[command(after_help = "LOCATORS:
    /2/1@3        2nd child of the document, then its 1st child, offset 3
    #intro/1@2    1st child of the element with id=\"intro\", offset 2
    null          no node

EXAMPLES:
    ancestry page.html --outline                  List nodes with their locators
    ancestry page.html -a '#intro/1@2'            Caret inside #intro
    ancestry page.html -a /1/2/1@0 -f /1/2/3@4    Range selection")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Anchor endpoint
    #[arg(short, long, value_name = "LOCATOR")]
    anchor: Option<EndpointLocator>,

    /// Focus endpoint (defaults to the anchor)
    #[arg(short, long, value_name = "LOCATOR", requires = "anchor")]
    focus: Option<EndpointLocator>,

    /// Unit used for text lengths
    #[arg(short, long, value_enum, default_value_t = OffsetUnit::Utf16)]
    unit: OffsetUnit,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List every node with its locator instead of showing a selection
    #[arg(long, conflicts_with_all = ["anchor", "focus"])]
    outline: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = if cli.outline {
        show_outline(&cli)
    } else {
        show_breadcrumbs(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn show_breadcrumbs(cli: &Cli) -> Result<()> {
    let mut doc = Document::open(&cli.input)?;
    if let Some(anchor) = &cli.anchor {
        doc.select_locators(anchor, cli.focus.as_ref())?;
        debug!("selection: {:?}", doc.selection());
    }

    let options = TrailOptions {
        unit: cli.unit,
    };
    let crumbs = doc.breadcrumbs(&options);

    match cli.format {
        Format::Text => print!("{crumbs}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&crumbs)?),
    }
    Ok(())
}

fn show_outline(cli: &Cli) -> Result<()> {
    let doc = Document::open(&cli.input)?;
    let dom = doc.dom();

    match cli.format {
        Format::Text => {
            for id in dom.descendants(dom.document()) {
                let depth = dom.depth(id);
                println!(
                    "{:indent$}{}  {}",
                    "",
                    locator(dom, id),
                    summary(dom, id),
                    indent = depth * 2
                );
            }
        }
        Format::Json => {
            let entries: Vec<_> = dom
                .descendants(dom.document())
                .map(|id| {
                    serde_json::json!({
                        "locator": locator(dom, id),
                        "node": summary(dom, id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn locator(dom: &ArenaDom, id: NodeId) -> String {
    EndpointLocator::for_node(dom, id, 0)
        .map(|l| l.to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn summary(dom: &ArenaDom, id: NodeId) -> String {
    let Some(node) = dom.get(id) else {
        return String::new();
    };
    let name = node.data.node_name().to_lowercase();
    match &node.data {
        NodeData::Text(text) | NodeData::Comment(text) => {
            let preview: String = text.chars().take(40).collect();
            let ellipsis = if text.chars().count() > 40 { "..." } else { "" };
            format!("{name} {preview:?}{ellipsis}")
        }
        NodeData::Element { id: Some(el_id), .. } => format!("{name}#{el_id}"),
        _ => name,
    }
}
