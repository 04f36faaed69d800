use rorepr_follow::{FOLLOW_LINKS_PARAM, FollowSpecs, parser};

pub struct CheckArgs {
    pub expr: String,
    pub dump: bool,
    pub color: bool,
}

/// What `check` reports: rendered diagnostics, and the follow tree when asked for.
pub struct CheckReport {
    pub is_valid: bool,
    pub diagnostics: Option<String>,
    pub tree: Option<String>,
}

pub fn run(args: CheckArgs) {
    let report = check(&args);

    if let Some(diagnostics) = &report.diagnostics {
        eprint!("{}", diagnostics);
    }
    if !report.is_valid {
        std::process::exit(1);
    }

    // Silent on success unless --dump
    if let Some(tree) = report.tree {
        print!("{}", tree);
    }
}

pub fn check(args: &CheckArgs) -> CheckReport {
    let parse = parser::parse(&args.expr);
    let is_valid = parse.is_valid();

    let diagnostics = (!parse.diagnostics().is_empty()).then(|| {
        parse
            .diagnostics()
            .printer(&args.expr)
            .path(FOLLOW_LINKS_PARAM)
            .colored(args.color)
            .render()
    });
    let tree = (is_valid && args.dump).then(|| FollowSpecs::create(parse.spec()).dump());

    CheckReport {
        is_valid,
        diagnostics,
        tree,
    }
}
