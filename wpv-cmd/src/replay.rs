//! Scripted selection sessions.
//!
//! A script has one event per line; blank lines and lines starting with `#`
//! are ignored:
//!
//! ```text
//! click SCH-012:UI
//! ctrl AGU-001:UI
//! search sch
//! box 0 0 15 15
//! ctrl-box 20 0 25 10
//! reservoir U INFERIOR, HOLLIN
//! select-all
//! clear
//! ```
//!
//! `reservoir` takes a comma-separated tag list; with no tags it removes the
//! filter.

use anyhow::Context;
use log::info;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use wpv_core::WellSource;
use wpv_data::{CatalogOptions, CycleOutcome, SearchPolicy, Session, WellCatalog};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(String),
    CtrlClick(String),
    Search(String),
    Box { x0: f64, y0: f64, x1: f64, y1: f64 },
    CtrlBox { x0: f64, y0: f64, x1: f64, y1: f64 },
    Reservoir(Vec<String>),
    SelectAll,
    Clear,
}

fn parse_corners(verb: &str, rest: &str) -> anyhow::Result<[f64; 4]> {
    let corners = rest
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("bad {} coordinates `{}`", verb, rest))?;
    let [x0, y0, x1, y1] = corners[..] else {
        anyhow::bail!("`{}` takes four coordinates, got {}", verb, corners.len());
    };
    Ok([x0, y0, x1, y1])
}

impl FromStr for Event {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let id = || -> anyhow::Result<String> {
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                anyhow::bail!("`{}` takes exactly one well id", verb);
            }
            Ok(rest.to_string())
        };
        match verb {
            "click" => Ok(Event::Click(id()?)),
            "ctrl" => Ok(Event::CtrlClick(id()?)),
            "search" => Ok(Event::Search(rest.to_string())),
            "clear" if rest.is_empty() => Ok(Event::Clear),
            "select-all" if rest.is_empty() => Ok(Event::SelectAll),
            "reservoir" => Ok(Event::Reservoir(
                rest.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            )),
            "box" => {
                let [x0, y0, x1, y1] = parse_corners(verb, rest)?;
                Ok(Event::Box { x0, y0, x1, y1 })
            }
            "ctrl-box" => {
                let [x0, y0, x1, y1] = parse_corners(verb, rest)?;
                Ok(Event::CtrlBox { x0, y0, x1, y1 })
            }
            _ => anyhow::bail!("unknown event `{}`", line),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Click(id) => write!(f, "click {}", id),
            Event::CtrlClick(id) => write!(f, "ctrl {}", id),
            Event::Search(text) => write!(f, "search {}", text),
            Event::Box { x0, y0, x1, y1 } => write!(f, "box {} {} {} {}", x0, y0, x1, y1),
            Event::CtrlBox { x0, y0, x1, y1 } => {
                write!(f, "ctrl-box {} {} {} {}", x0, y0, x1, y1)
            }
            Event::Reservoir(tags) if tags.is_empty() => write!(f, "reservoir"),
            Event::Reservoir(tags) => write!(f, "reservoir {}", tags.join(", ")),
            Event::SelectAll => write!(f, "select-all"),
            Event::Clear => write!(f, "clear"),
        }
    }
}

/// Parse a whole script. Errors name the offending line.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<(usize, Event)>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            let event = line
                .parse::<Event>()
                .with_context(|| format!("line {}", i + 1))?;
            Ok((i + 1, event))
        })
        .collect()
}

/// Feed every scripted event through one session and write a summary line
/// per event. A failed cycle is reported and the replay continues.
pub fn run_replay<S: WellSource, W: Write>(
    source: &S,
    options: &CatalogOptions,
    script: &str,
    select_matches: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let events = parse_script(script)?;
    let catalog = WellCatalog::load(source, options)?;
    let mut session = Session::new(&catalog, source);
    let policy = if select_matches {
        SearchPolicy::SelectMatches
    } else {
        SearchPolicy::ListOnly
    };

    info!("[WPV] replay: {} events", events.len());
    for (line, event) in &events {
        let result = match event {
            Event::Click(id) => session.click_well(id),
            Event::CtrlClick(id) => session.ctrl_click_well(id),
            Event::Box { x0, y0, x1, y1 } => session.select_box(*x0, *y0, *x1, *y1, false),
            Event::CtrlBox { x0, y0, x1, y1 } => session.select_box(*x0, *y0, *x1, *y1, true),
            Event::Reservoir(tags) => session.set_reservoir_filter(tags),
            Event::SelectAll => session.select_all_visible(),
            Event::Clear => session.clear(),
            Event::Search(text) => match session.search(text, policy) {
                Ok(matches) if policy == SearchPolicy::ListOnly => {
                    writeln!(
                        out,
                        "{:>4} {}: {} matches [{}]",
                        line,
                        event,
                        matches.len(),
                        matches.join(" ")
                    )?;
                    continue;
                }
                Ok(_) => Ok(CycleOutcome::Rendered),
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(_) => {
                let Some(charts) = session.charts() else {
                    continue;
                };
                writeln!(
                    out,
                    "{:>4} {}: generation {}, {} selected, {} production dates, {} injection dates",
                    line,
                    event,
                    charts.generation,
                    charts.selection.len(),
                    charts.aggregation.oil.len(),
                    charts.aggregation.water_injected.len(),
                )?;
            }
            Err(e) => writeln!(out, "{:>4} {}: failed, keeping last charts: {}", line, event, e)?,
        }
    }
    Ok(())
}
