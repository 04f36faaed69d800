//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("rorepr")
        .about("Restful Objects representations with x-ro-follow-links")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(render_command())
        .subcommand(repr_types_command())
}

/// Validate a follow-links expression.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate an x-ro-follow-links expression")
        .after_help(
            r#"EXAMPLES:
  rorepr check 'members[propertyId=name].links'
  rorepr check --dump 'links[rel=describedby].value,members'"#,
        )
        .arg(expr_arg())
        .arg(dump_arg())
        .arg(color_arg())
}

/// Render a resource from a fixture.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Render the representation of a resource from a fixture")
        .after_help(
            r#"EXAMPLES:
  rorepr render -f demo.json /
  rorepr render -f demo.json objects/CUS/1 -L 'members[memberType=property].links'
  rorepr render -f demo.json -X POST 'objects/CUS/1/actions/placeOrder/invoke?product=tea&quantity=5'"#,
        )
        .arg(fixture_arg())
        .arg(target_arg())
        .arg(method_arg())
        .arg(follow_links_arg())
        .arg(accept_arg())
        .arg(base_uri_arg())
        .arg(compact_arg())
        .arg(color_arg())
}

/// List representation types.
pub fn repr_types_command() -> Command {
    Command::new("repr-types").about("List representation types and their media types")
}
