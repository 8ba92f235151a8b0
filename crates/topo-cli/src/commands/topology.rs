use crate::cli::TopologyArgs;
use crate::error::{CliError, Result};
use std::io::{self, Write};
use topoconflict::core::models::segment::Side;
use topoconflict::core::topology::parser::{ParsedTopology, parse_topology};
use tracing::{info, warn};

pub fn run(args: TopologyArgs) -> Result<()> {
    let parsed = parse_topology(&args.topology, args.length)?;
    info!(
        outside = parsed.domains.outside.len(),
        inside = parsed.domains.inside.len(),
        "Parsed topology string."
    );
    if parsed.exceeds_length(args.length) {
        warn!(
            length = args.length,
            "Topology segments extend past the declared sequence length."
        );
    }

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &parsed.domains)
            .map_err(|e| CliError::Other(e.into()))?;
        writeln!(stdout)?;
    } else {
        render_table(&parsed, &mut stdout)?;
    }
    Ok(())
}

fn render_table(parsed: &ParsedTopology, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<8} {:>8} {:>8}", "side", "start", "end")?;
    for side in [Side::Outside, Side::Inside] {
        let label = match side {
            Side::Outside => "outside",
            Side::Inside => "inside",
        };
        for segment in parsed.domains.segments(side) {
            writeln!(out, "{:<8} {:>8} {:>8}", label, segment.start, segment.end)?;
        }
    }
    if let Some(token) = &parsed.dangling_token {
        writeln!(out, "unterminated token: {}", token)?;
    }
    Ok(())
}
