//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use rorepr_render::model::HttpMethod;

/// Follow-links expression (positional).
pub fn expr_arg() -> Arg {
    Arg::new("expr")
        .value_name("EXPR")
        .required(true)
        .allow_hyphen_values(true)
        .help("x-ro-follow-links expression, e.g. 'members[propertyId=name].links'")
}

/// Print the follow tree (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .help("Print the follow tree built from the expression")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Domain model fixture (-f/--fixture).
pub fn fixture_arg() -> Arg {
    Arg::new("fixture")
        .short('f')
        .long("fixture")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON fixture describing user, types, objects and invocations")
}

/// Resource path with optional query (positional).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .value_name("PATH")
        .default_value("/")
        .help("Resource path, e.g. 'objects/CUS/1' or 'objects/CUS/1/actions/placeOrder/invoke?product=tea'")
}

/// HTTP method (-X/--method).
pub fn method_arg() -> Arg {
    Arg::new("method")
        .short('X')
        .long("method")
        .value_name("METHOD")
        .default_value("GET")
        .value_parser(|s: &str| s.parse::<HttpMethod>())
        .help("HTTP method: GET, PUT, POST or DELETE")
}

/// Follow-links expression sent with the request (-L/--follow-links).
pub fn follow_links_arg() -> Arg {
    Arg::new("follow_links")
        .short('L')
        .long("follow-links")
        .value_name("EXPR")
        .help("x-ro-follow-links expression")
}

/// Accept header (--accept).
pub fn accept_arg() -> Arg {
    Arg::new("accept")
        .long("accept")
        .value_name("MEDIA")
        .help("Accept header, e.g. 'application/json;profile=\"urn:org.restfulobjects:repr-types/user\"'")
}

/// Base URI for generated hrefs (--base-uri).
pub fn base_uri_arg() -> Arg {
    Arg::new("base_uri")
        .long("base-uri")
        .value_name("URI")
        .default_value("http://localhost:8080/restful/")
        .help("Base URI every href is resolved against")
}

/// Single-line JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Print JSON on a single line")
}
