//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use rorepr_render::model::HttpMethod;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::render::RenderArgs;

pub struct CheckParams {
    pub expr: String,
    pub dump: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            expr: m.get_one::<String>("expr").cloned().unwrap_or_default(),
            dump: m.get_flag("dump"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            expr: p.expr,
            dump: p.dump,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RenderParams {
    pub fixture: PathBuf,
    pub target: String,
    pub method: HttpMethod,
    pub follow_links: Option<String>,
    pub accept: Option<String>,
    pub base_uri: String,
    pub compact: bool,
    pub color: ColorChoice,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            fixture: m.get_one::<PathBuf>("fixture").cloned().unwrap_or_default(),
            target: m
                .get_one::<String>("target")
                .cloned()
                .unwrap_or_else(|| "/".to_string()),
            method: m
                .get_one::<HttpMethod>("method")
                .copied()
                .unwrap_or(HttpMethod::Get),
            follow_links: m.get_one::<String>("follow_links").cloned(),
            accept: m.get_one::<String>("accept").cloned(),
            base_uri: m.get_one::<String>("base_uri").cloned().unwrap_or_default(),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            fixture: p.fixture,
            target: p.target,
            method: p.method,
            follow_links: p.follow_links,
            accept: p.accept,
            base_uri: p.base_uri,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ReprTypesParams;

impl ReprTypesParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
